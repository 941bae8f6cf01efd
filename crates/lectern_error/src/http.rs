//! HTTP error types.

/// Transport-level HTTP error with source location.
///
/// Used when the HTTP client itself cannot be built or configured. Failures of
/// an individual remote call are reported as [`RemoteError`](crate::RemoteError)
/// so the dispatcher can classify them.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use lectern_error::HttpError;
    ///
    /// let err = HttpError::new("TLS backend unavailable");
    /// assert!(err.message.contains("TLS backend"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
