//! The retrying, paced dispatcher.

use crate::{Attempt, BackoffPolicy, Outcome, StreamAssembler, TransientErrorClassifier};
use lectern_core::{Completion, CompletionRequest};
use lectern_error::{ConfigError, DispatchError, DispatchErrorKind, DispatchResult, LecternResult};
use lectern_interface::StreamingBackend;
use lectern_rate_limit::{LecternConfig, RateLimiter};
use std::num::NonZeroU32;
use tracing::{debug, error, info, instrument, warn};

/// Sends one logical request through pacing, retries, and stream assembly.
///
/// Construct one dispatcher per configuration and reuse it for every call: it
/// owns the backend and the rate limiter state. Dispatching takes `&mut self`,
/// so a dispatcher serves one sequential caller.
///
/// Each dispatch issues at most `max_attempts` remote calls and ends in exactly
/// one terminal value: a [`Completion`] or a [`DispatchError`]. Transient
/// failures are retried after the classifier's delay; a fatal failure ends the
/// dispatch immediately.
///
/// Streamed requests are retried only while opening the stream. Once fragments
/// have reached the observer, a failure is terminal so no fragment is shown
/// twice.
#[derive(Debug)]
pub struct Dispatcher<B> {
    backend: B,
    limiter: RateLimiter,
    classifier: TransientErrorClassifier,
    max_attempts: NonZeroU32,
}

impl<B: StreamingBackend> Dispatcher<B> {
    /// Assemble a dispatcher from its parts.
    pub fn new(
        backend: B,
        limiter: RateLimiter,
        classifier: TransientErrorClassifier,
        max_attempts: NonZeroU32,
    ) -> Self {
        Self {
            backend,
            limiter,
            classifier,
            max_attempts,
        }
    }

    /// Build a dispatcher from the `[rate_limit]` and `[retry]` sections.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a zero pacing budget or zero attempt budget.
    #[instrument(skip_all, fields(provider = backend.provider_name()))]
    pub fn from_config(backend: B, config: &LecternConfig) -> LecternResult<Self> {
        let limiter = RateLimiter::from_config(&config.rate_limit)
            .map_err(|e| ConfigError::new(e.kind().to_string()))?;
        let classifier = TransientErrorClassifier::new(BackoffPolicy::from_config(&config.retry));
        let max_attempts = config.retry.attempts()?;
        debug!(
            rpm = limiter.requests_per_minute(),
            max_attempts = max_attempts.get(),
            "Built dispatcher from configuration"
        );
        Ok(Self::new(backend, limiter, classifier, max_attempts))
    }

    /// The backend requests are sent to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The pacing state.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// The failure classifier.
    pub fn classifier(&self) -> &TransientErrorClassifier {
        &self.classifier
    }

    /// Default attempt budget used by [`dispatch`](Self::dispatch).
    pub fn max_attempts(&self) -> NonZeroU32 {
        self.max_attempts
    }

    /// Dispatch with the default attempt budget, discarding streamed fragments
    /// until the completion is assembled.
    pub async fn dispatch(&mut self, request: &CompletionRequest) -> DispatchResult<Completion> {
        let max_attempts = self.max_attempts;
        self.dispatch_with_observer(request, max_attempts, |_: &str| {})
            .await
    }

    /// Dispatch with an explicit attempt budget.
    pub async fn dispatch_with_attempts(
        &mut self,
        request: &CompletionRequest,
        max_attempts: NonZeroU32,
    ) -> DispatchResult<Completion> {
        self.dispatch_with_observer(request, max_attempts, |_: &str| {})
            .await
    }

    /// Dispatch, forwarding each streamed fragment to `on_fragment` as it
    /// arrives. For non-streaming requests the observer is never called.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchErrorKind::Fatal`] for a non-retryable failure and
    /// [`DispatchErrorKind::RetriesExhausted`] when every attempt failed
    /// transiently.
    #[instrument(
        skip(self, request, on_fragment),
        fields(
            provider = self.backend.provider_name(),
            model = %request.model(),
            stream = *request.stream(),
            max_attempts = max_attempts.get(),
        )
    )]
    pub async fn dispatch_with_observer<F>(
        &mut self,
        request: &CompletionRequest,
        max_attempts: NonZeroU32,
        mut on_fragment: F,
    ) -> DispatchResult<Completion>
    where
        F: FnMut(&str),
    {
        let mut last_reason = String::new();

        for sequence_number in 0..max_attempts.get() {
            let attempt = Attempt::begin(sequence_number);
            debug!(attempt = attempt.number(), "Starting attempt");

            match self.attempt(request, &mut on_fragment).await {
                Outcome::Success(completion) => {
                    info!(
                        attempt = attempt.number(),
                        elapsed = ?attempt.started_at().elapsed(),
                        "Completion received"
                    );
                    return Ok(completion.with_attempts(attempt.number()));
                }
                Outcome::FatalFailure(reason) => {
                    error!(attempt = attempt.number(), %reason, "Fatal failure, not retrying");
                    return Err(DispatchError::new(DispatchErrorKind::Fatal(reason)));
                }
                Outcome::RetryableFailure {
                    class,
                    reason,
                    suggested_delay,
                } => {
                    if attempt.is_last(max_attempts) {
                        warn!(attempt = attempt.number(), %class, %reason, "Final attempt failed");
                    } else {
                        warn!(
                            attempt = attempt.number(),
                            %class,
                            %reason,
                            delay = ?suggested_delay,
                            "Transient failure, backing off"
                        );
                        tokio::time::sleep(suggested_delay).await;
                    }
                    last_reason = reason;
                }
            }
        }

        error!(attempts = max_attempts.get(), "Retries exhausted");
        Err(DispatchError::new(DispatchErrorKind::RetriesExhausted {
            attempts: max_attempts.get(),
            last_reason,
        }))
    }

    /// Pace, issue one remote call, and reduce its result to an [`Outcome`].
    async fn attempt<F>(&mut self, request: &CompletionRequest, on_fragment: &mut F) -> Outcome
    where
        F: FnMut(&str),
    {
        self.limiter.wait_if_needed().await;

        let failure = if *request.stream() {
            match self.backend.complete_stream(request).await {
                Ok(stream) => {
                    return match StreamAssembler::new().consume(stream, on_fragment).await {
                        Ok(text) => Outcome::Success(Completion::from_stream(text)),
                        Err(e) => Outcome::FatalFailure(e.kind().to_string()),
                    };
                }
                Err(e) => e,
            }
        } else {
            match self.backend.complete(request).await {
                Ok(response) => return Outcome::Success(Completion::from_response(response)),
                Err(e) => e,
            }
        };

        Outcome::from_remote_error(&failure, &self.classifier)
    }
}
