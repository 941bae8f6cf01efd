//! Errors raised while assembling a streamed completion.

use crate::RemoteErrorKind;

/// Ways a fragment stream can fail before it completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StreamErrorKind {
    /// The source reported a failure after the stream had started
    #[display("Stream interrupted: {}", _0)]
    Interrupted(RemoteErrorKind),
    /// The source ran dry without sending its completion marker
    #[display("Stream ended after {} fragments without a completion marker", _0)]
    MissingTerminator(usize),
}

/// Stream assembly error with location tracking.
///
/// # Examples
///
/// ```
/// use lectern_error::{StreamError, StreamErrorKind};
///
/// let err = StreamError::new(StreamErrorKind::MissingTerminator(2));
/// assert!(format!("{}", err).contains("without a completion marker"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Stream Error: {} at line {} in {}", kind, line, file)]
pub struct StreamError {
    /// The kind of error that occurred
    pub kind: StreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StreamError {
    /// Create a new StreamError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StreamErrorKind {
        &self.kind
    }
}

/// Result type for stream assembly.
pub type StreamResult<T> = std::result::Result<T, StreamError>;
