//! The value a successful dispatch hands back.

use crate::{CompletionResponse, FinishReason, Usage};
use serde::{Deserialize, Serialize};

/// A finished completion.
///
/// Built either from a full non-streaming response or from assembled stream
/// text. Streamed completions carry no usage or response metadata.
///
/// # Examples
///
/// ```
/// use lectern_core::Completion;
///
/// let completion = Completion::from_stream("Hello, world").with_attempts(2);
/// assert_eq!(completion.text(), "Hello, world");
/// assert_eq!(*completion.attempts(), 2);
/// assert!(completion.usage().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Completion {
    /// Completion text
    text: String,
    /// Token accounting, when the endpoint reported it
    usage: Option<Usage>,
    /// Why generation stopped, when known
    finish_reason: Option<FinishReason>,
    /// Full response metadata for non-streaming calls
    response: Option<CompletionResponse>,
    /// Remote calls issued to obtain this completion
    attempts: u32,
}

impl Completion {
    /// Wraps a non-streaming response.
    pub fn from_response(response: CompletionResponse) -> Self {
        Self {
            text: response.text().unwrap_or_default().to_string(),
            usage: Some(*response.usage()),
            finish_reason: response.finish_reason(),
            response: Some(response),
            attempts: 1,
        }
    }

    /// Wraps text assembled from a stream.
    pub fn from_stream(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
            finish_reason: None,
            response: None,
            attempts: 1,
        }
    }

    /// Records how many remote calls the dispatch consumed.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }
}
