//! Async runtime error types.

/// Failure to start or drive the async runtime, with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Runtime Error: {} at line {} in {}", message, line, file)]
pub struct RuntimeError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl RuntimeError {
    /// Create a new RuntimeError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use lectern_error::RuntimeError;
    ///
    /// let err = RuntimeError::new("Failed to start async runtime");
    /// assert!(err.to_string().starts_with("Runtime Error"));
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
