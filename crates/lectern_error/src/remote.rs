//! Failure signals produced by a remote completion call.

/// What went wrong on the remote side of a completion call.
///
/// Every transport maps its native failures onto one of these variants. The
/// dispatcher never inspects transport errors directly; it classifies this
/// kind instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RemoteErrorKind {
    /// The endpoint signaled throttling (HTTP 429 without a quota code)
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// Network-level failure: timeout, reset, DNS, refused connection
    #[display("Connection error: {}", _0)]
    Connection(String),
    /// The account's quota is exhausted and will not recover by waiting
    #[display("Quota exhausted: {}", _0)]
    QuotaExhausted(String),
    /// Credential missing, invalid, or lacking permission
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Any other non-success HTTP status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message reported by the endpoint
        message: String,
    },
    /// The endpoint answered with a body that could not be decoded
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// A failure the transport could not attribute to any known cause
    #[display("Unrecognized failure: {}", _0)]
    Unrecognized(String),
}

/// Remote call failure with source location tracking.
///
/// # Examples
///
/// ```
/// use lectern_error::{RemoteError, RemoteErrorKind};
///
/// let err = RemoteError::new(RemoteErrorKind::RateLimited("slow down".to_string()));
/// assert!(format!("{}", err).contains("Rate limited: slow down"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Remote Error: {} at line {} in {}", kind, line, file)]
pub struct RemoteError {
    /// The kind of failure that occurred
    pub kind: RemoteErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RemoteError {
    /// Create a new RemoteError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RemoteErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RemoteErrorKind {
        &self.kind
    }
}

impl From<RemoteErrorKind> for RemoteError {
    #[track_caller]
    fn from(kind: RemoteErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type for a single remote call.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
