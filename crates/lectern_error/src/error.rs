//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, DispatchError, HttpError, RemoteError, RuntimeError, StreamError,
};

/// Every error condition the Lectern crates can surface.
///
/// # Examples
///
/// ```
/// use lectern_error::{LecternError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: LecternError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LecternErrorKind {
    /// HTTP client error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Request builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Remote call failure outside the dispatcher
    #[from(RemoteError)]
    Remote(RemoteError),
    /// Stream assembly error
    #[from(StreamError)]
    Stream(StreamError),
    /// Async runtime startup failure
    #[from(RuntimeError)]
    Runtime(RuntimeError),
    /// Terminal dispatch failure
    #[from(DispatchError)]
    Dispatch(DispatchError),
}

/// Lectern error with kind discrimination.
///
/// # Examples
///
/// ```
/// use lectern_error::{LecternResult, ConfigError};
///
/// fn might_fail() -> LecternResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lectern Error: {}", _0)]
pub struct LecternError(Box<LecternErrorKind>);

impl LecternError {
    /// Create a new error from a kind.
    pub fn new(kind: LecternErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LecternErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to LecternErrorKind
impl<T> From<T> for LecternError
where
    T: Into<LecternErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lectern operations.
pub type LecternResult<T> = std::result::Result<T, LecternError>;
