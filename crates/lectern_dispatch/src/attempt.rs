//! Per-attempt bookkeeping for the retry loop.

use crate::{ErrorClass, TransientErrorClassifier};
use lectern_core::Completion;
use lectern_error::RemoteError;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::Instant;

/// One iteration of the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct Attempt {
    /// Zero-based position within the dispatch
    sequence_number: u32,
    /// When the attempt began, before pacing
    started_at: Instant,
}

impl Attempt {
    /// Start the attempt with the given zero-based sequence number.
    pub fn begin(sequence_number: u32) -> Self {
        Self {
            sequence_number,
            started_at: Instant::now(),
        }
    }

    /// One-based attempt number, for logs and attempt counts.
    pub fn number(&self) -> u32 {
        self.sequence_number + 1
    }

    /// True when no further attempt is allowed after this one.
    pub fn is_last(&self, max_attempts: NonZeroU32) -> bool {
        self.number() >= max_attempts.get()
    }
}

/// What a single attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The call succeeded
    Success(Completion),
    /// The call failed transiently and may be retried after a delay
    RetryableFailure {
        /// Retry class that produced the delay
        class: ErrorClass,
        /// Human-readable failure reason
        reason: String,
        /// How long to wait before the next attempt
        suggested_delay: Duration,
    },
    /// The call failed and must not be retried
    FatalFailure(String),
}

impl Outcome {
    /// Turn a remote failure into an outcome using the classifier's policy.
    pub fn from_remote_error(error: &RemoteError, classifier: &TransientErrorClassifier) -> Self {
        let class = classifier.classify(error);
        let reason = error.kind().to_string();
        match classifier.recommended_delay(class) {
            Some(suggested_delay) => Self::RetryableFailure {
                class,
                reason,
                suggested_delay,
            },
            None => Self::FatalFailure(reason),
        }
    }
}
