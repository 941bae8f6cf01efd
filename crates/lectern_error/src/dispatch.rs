//! Terminal failures of a dispatched request.

/// Why a dispatch ended without a completion.
///
/// Retryable failures never appear here: they are consumed by the retry loop.
/// A dispatch that fails therefore always ends in one of these two kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DispatchErrorKind {
    /// A failure that retrying cannot fix
    #[display("{}", _0)]
    Fatal(String),
    /// Every allowed attempt failed with a retryable error
    #[display("retries exhausted after {} attempts (last failure: {})", attempts, last_reason)]
    RetriesExhausted {
        /// Number of remote calls issued
        attempts: u32,
        /// Reason reported by the final attempt
        last_reason: String,
    },
}

/// Dispatch failure with location tracking.
///
/// # Examples
///
/// ```
/// use lectern_error::{DispatchError, DispatchErrorKind};
///
/// let err = DispatchError::new(DispatchErrorKind::RetriesExhausted {
///     attempts: 3,
///     last_reason: "Rate limited: slow down".to_string(),
/// });
/// assert!(err.is_exhausted());
/// assert!(err.reason().starts_with("retries exhausted"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Dispatch Error: {} at line {} in {}", kind, line, file)]
pub struct DispatchError {
    /// The kind of error that occurred
    pub kind: DispatchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DispatchError {
    /// Create a new DispatchError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DispatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DispatchErrorKind {
        &self.kind
    }

    /// Human-readable failure reason, without source location.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }

    /// True when the dispatch ran out of attempts.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind, DispatchErrorKind::RetriesExhausted { .. })
    }
}

/// Result type for a dispatched request.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
