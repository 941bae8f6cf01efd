//! Non-streaming response types.

use chrono::{DateTime, Utc};
use lectern_error::BuilderError;
use serde::{Deserialize, Serialize};

/// Why generation stopped.
///
/// # Examples
///
/// ```
/// use lectern_core::FinishReason;
///
/// assert_eq!(FinishReason::from_wire("stop"), FinishReason::Stop);
/// assert_eq!(FinishReason::from_wire("length"), FinishReason::Length);
/// assert_eq!(FinishReason::from_wire("content_filter"), FinishReason::Other);
/// assert_eq!(FinishReason::Length.to_string(), "length");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FinishReason {
    /// Model completed naturally
    Stop,
    /// Hit the output token limit
    Length,
    /// Tool calls, content filtering, or anything else
    Other,
}

impl FinishReason {
    /// Maps a wire-format finish reason, folding unknown values into `Other`.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "stop" => Self::Stop,
            "length" => Self::Length,
            _ => Self::Other,
        }
    }
}

/// Token accounting reported by the endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display(
    "prompt={} completion={} total={}",
    prompt_tokens,
    completion_tokens,
    total_tokens
)]
pub struct Usage {
    /// Tokens consumed by the prompt
    prompt_tokens: u32,
    /// Tokens generated in the completion
    completion_tokens: u32,
    /// Sum of prompt and completion tokens
    total_tokens: u32,
}

impl Usage {
    /// Creates a usage record.
    pub fn new(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

/// One generated alternative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Choice {
    /// Generated text
    content: String,
    /// Why generation stopped
    finish_reason: FinishReason,
}

impl Choice {
    /// Creates a choice.
    pub fn new(content: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            content: content.into(),
            finish_reason,
        }
    }
}

/// The full non-streaming response.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use lectern_core::{Choice, CompletionResponse, FinishReason, Usage};
///
/// let response = CompletionResponse::builder()
///     .id("chatcmpl-123")
///     .model("gpt-3.5-turbo-0125")
///     .created_at(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
///     .choices(vec![Choice::new("Hello!", FinishReason::Stop)])
///     .usage(Usage::new(9, 3, 12))
///     .build()
///     .unwrap();
///
/// assert_eq!(response.text(), Some("Hello!"));
/// assert_eq!(response.finish_reason(), Some(FinishReason::Stop));
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
#[builder(setter(into), build_fn(error = "BuilderError"))]
pub struct CompletionResponse {
    /// Endpoint-assigned response identifier
    id: String,
    /// Model that actually served the request
    model: String,
    /// When the endpoint created the response
    created_at: DateTime<Utc>,
    /// Generated alternatives, in endpoint order
    choices: Vec<Choice>,
    /// Token accounting
    #[builder(default)]
    usage: Usage,
}

impl CompletionResponse {
    /// Creates a new response builder.
    pub fn builder() -> CompletionResponseBuilder {
        CompletionResponseBuilder::default()
    }

    /// Text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.content.as_str())
    }

    /// Finish reason of the first choice, if any.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.choices.first().map(|choice| choice.finish_reason)
    }
}
