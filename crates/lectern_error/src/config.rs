//! Configuration error types.

/// Configuration error with source location.
///
/// Raised for unreadable configuration files, out-of-range settings such as a
/// zero requests-per-minute budget, and a missing API credential.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use lectern_error::ConfigError;
    ///
    /// let err = ConfigError::new("requests_per_minute must be positive");
    /// assert!(err.message.contains("requests_per_minute"));
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
