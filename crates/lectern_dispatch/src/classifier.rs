//! Transient-versus-fatal classification of remote failures.

use lectern_error::{RemoteError, RemoteErrorKind};
use lectern_rate_limit::RetryConfig;
use std::time::Duration;

/// Retry class of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ErrorClass {
    /// The endpoint is throttling; wait out a cooldown, then retry
    RateLimited,
    /// Network-level failure; back off briefly, then retry
    Connectivity,
    /// Retrying cannot help
    Fatal,
}

impl ErrorClass {
    /// Classify a failure signal.
    ///
    /// Total over [`RemoteErrorKind`]: anything not positively known to be
    /// transient is `Fatal`, so an unfamiliar failure can never cause silent
    /// retry loops.
    ///
    /// # Examples
    ///
    /// ```
    /// use lectern_dispatch::ErrorClass;
    /// use lectern_error::RemoteErrorKind;
    ///
    /// let throttled = RemoteErrorKind::RateLimited("Too many requests".to_string());
    /// assert_eq!(ErrorClass::of(&throttled), ErrorClass::RateLimited);
    ///
    /// let quota = RemoteErrorKind::QuotaExhausted("insufficient_quota".to_string());
    /// assert_eq!(ErrorClass::of(&quota), ErrorClass::Fatal);
    /// ```
    pub fn of(kind: &RemoteErrorKind) -> Self {
        match kind {
            RemoteErrorKind::RateLimited(_) => Self::RateLimited,
            RemoteErrorKind::Connection(_) => Self::Connectivity,
            RemoteErrorKind::QuotaExhausted(_)
            | RemoteErrorKind::Authentication(_)
            | RemoteErrorKind::Api { .. }
            | RemoteErrorKind::MalformedResponse(_)
            | RemoteErrorKind::Unrecognized(_) => Self::Fatal,
        }
    }

    /// True for classes the dispatcher retries.
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::Fatal)
    }
}

/// Fixed delays applied before retrying each transient class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct BackoffPolicy {
    /// Wait after a rate-limit signal
    rate_limit_cooldown: Duration,
    /// Wait after a connectivity failure
    connectivity_backoff: Duration,
}

impl BackoffPolicy {
    /// Creates a policy with explicit delays.
    pub fn new(rate_limit_cooldown: Duration, connectivity_backoff: Duration) -> Self {
        Self {
            rate_limit_cooldown,
            connectivity_backoff,
        }
    }

    /// Creates a policy from the `[retry]` configuration section.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.rate_limit_cooldown(), config.connectivity_backoff())
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(20), Duration::from_secs(5))
    }
}

/// Maps remote failures to a retry class and the delay to apply.
///
/// # Examples
///
/// ```
/// use lectern_dispatch::{ErrorClass, TransientErrorClassifier};
/// use lectern_error::{RemoteError, RemoteErrorKind};
/// use std::time::Duration;
///
/// let classifier = TransientErrorClassifier::default();
/// let err = RemoteError::new(RemoteErrorKind::Connection("reset by peer".to_string()));
///
/// let class = classifier.classify(&err);
/// assert_eq!(class, ErrorClass::Connectivity);
/// assert_eq!(classifier.recommended_delay(class), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransientErrorClassifier {
    policy: BackoffPolicy,
}

impl TransientErrorClassifier {
    /// Creates a classifier with the given backoff policy.
    pub fn new(policy: BackoffPolicy) -> Self {
        Self { policy }
    }

    /// The backoff policy in use.
    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Classify a remote failure.
    pub fn classify(&self, error: &RemoteError) -> ErrorClass {
        ErrorClass::of(error.kind())
    }

    /// Delay before the next attempt, or `None` when the class must not retry.
    pub fn recommended_delay(&self, class: ErrorClass) -> Option<Duration> {
        match class {
            ErrorClass::RateLimited => Some(self.policy.rate_limit_cooldown),
            ErrorClass::Connectivity => Some(self.policy.connectivity_backoff),
            ErrorClass::Fatal => None,
        }
    }
}
