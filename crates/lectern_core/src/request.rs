//! The request a caller hands to the dispatcher.

use crate::Message;
use lectern_error::BuilderError;
use serde::{Deserialize, Serialize};

/// A single prompt-to-completion request.
///
/// Immutable once built. The dispatcher only borrows it, so the same request
/// can be re-issued on every retry attempt unchanged.
///
/// # Examples
///
/// ```
/// use lectern_core::CompletionRequest;
///
/// let request = CompletionRequest::builder()
///     .prompt("Explain quantum computing in one sentence")
///     .model("gpt-3.5-turbo")
///     .max_output_tokens(50u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.model(), "gpt-3.5-turbo");
/// assert_eq!(*request.max_output_tokens(), Some(50));
/// assert!(!*request.stream());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "BuilderError"))]
pub struct CompletionRequest {
    /// Prompt text sent as a single user message
    prompt: String,

    /// Model identifier (e.g. "gpt-3.5-turbo")
    model: String,

    /// Upper bound on generated tokens
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,

    /// Whether the completion should be streamed fragment by fragment
    #[builder(default)]
    #[serde(default)]
    stream: bool,
}

impl CompletionRequest {
    /// Creates a new request builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }

    /// The conversation sent to the endpoint: the prompt as one user message.
    pub fn messages(&self) -> Vec<Message> {
        vec![Message::user(self.prompt.clone())]
    }
}

impl CompletionRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("prompt must not be empty".to_string());
        }
        if self.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err("model must not be empty".to_string());
        }
        Ok(())
    }
}
