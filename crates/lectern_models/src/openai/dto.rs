//! Wire types of the chat completions endpoint.

use chrono::DateTime;
use lectern_core::{Choice, CompletionRequest, CompletionResponse, FinishReason, Message, Usage};
use lectern_error::{RemoteError, RemoteErrorKind, RemoteResult};
use serde::{Deserialize, Serialize};

/// Body of a `POST /chat/completions` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Enable streaming mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(req: &CompletionRequest) -> Self {
        Self {
            model: req.model().clone(),
            messages: req.messages(),
            max_tokens: *req.max_output_tokens(),
            stream: req.stream().then_some(true),
        }
    }
}

/// Non-streaming response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    /// Unique identifier for the completion
    pub id: String,
    /// Unix timestamp of when the completion was created
    pub created: i64,
    /// Model used for completion
    pub model: String,
    /// Generated completions
    pub choices: Vec<ResponseChoice>,
    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<WireUsage>,
}

/// A completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ResponseChoice {
    /// Index of this choice
    #[serde(default)]
    pub index: u32,
    /// The generated message
    pub message: ResponseMessage,
    /// Reason why generation finished
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message in a choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ResponseMessage {
    /// Role of the message (typically "assistant")
    pub role: String,
    /// Generated content; absent for tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WireUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

impl ChatCompletionResponse {
    /// Convert to the provider-neutral response.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteErrorKind::MalformedResponse`] when the creation
    /// timestamp is out of range.
    pub fn into_response(self) -> RemoteResult<CompletionResponse> {
        let created_at = DateTime::from_timestamp(self.created, 0).ok_or_else(|| {
            RemoteError::new(RemoteErrorKind::MalformedResponse(format!(
                "invalid creation timestamp {}",
                self.created
            )))
        })?;

        let choices = self
            .choices
            .into_iter()
            .map(|choice| {
                Choice::new(
                    choice.message.content.unwrap_or_default(),
                    choice
                        .finish_reason
                        .as_deref()
                        .map_or(FinishReason::Other, FinishReason::from_wire),
                )
            })
            .collect::<Vec<_>>();

        let usage = self
            .usage
            .map(|u| Usage::new(u.prompt_tokens, u.completion_tokens, u.total_tokens))
            .unwrap_or_default();

        CompletionResponse::builder()
            .id(self.id)
            .model(self.model)
            .created_at(created_at)
            .choices(choices)
            .usage(usage)
            .build()
            .map_err(|e| RemoteError::new(RemoteErrorKind::MalformedResponse(e.to_string())))
    }
}

/// One `data:` payload of a streamed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionChunk {
    /// Unique identifier
    #[serde(default)]
    pub id: String,
    /// Delta choices
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

impl ChatCompletionChunk {
    /// Text carried by the first choice, if any.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
    }
}

/// A choice in a streaming chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkChoice {
    /// Delta content
    #[serde(default)]
    pub delta: ChunkDelta,
    /// Finish reason, on the final content chunk
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Delta content in a streaming chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkDelta {
    /// Role, sent on the first chunk only
    #[serde(default)]
    pub role: Option<String>,
    /// Incremental text
    #[serde(default)]
    pub content: Option<String>,
}

/// Error body returned with a non-success status.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_completion_request() {
        let req = CompletionRequest::builder()
            .prompt("Hello")
            .model("gpt-3.5-turbo")
            .max_output_tokens(16u32)
            .build()
            .unwrap();

        let body = serde_json::to_value(ChatCompletionRequest::from(&req)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "Hello"}],
                "max_tokens": 16,
            })
        );
    }

    #[test]
    fn test_stream_flag_is_serialized_when_set() {
        let req = CompletionRequest::builder()
            .prompt("Hello")
            .model("gpt-3.5-turbo")
            .stream(true)
            .build()
            .unwrap();

        let body = serde_json::to_value(ChatCompletionRequest::from(&req)).unwrap();

        assert_eq!(body["stream"], serde_json::json!(true));
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_response_conversion() {
        let raw = r#"{
            "id": "chatcmpl-abc",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Navy blue and white."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 14, "completion_tokens": 5, "total_tokens": 19}
        }"#;

        let wire: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let response = wire.into_response().unwrap();

        assert_eq!(response.id(), "chatcmpl-abc");
        assert_eq!(response.text(), Some("Navy blue and white."));
        assert_eq!(response.finish_reason(), Some(FinishReason::Stop));
        assert_eq!(*response.usage(), Usage::new(14, 5, 19));
        assert_eq!(response.created_at().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_null_content_becomes_empty_text() {
        let raw = r#"{
            "id": "x", "created": 0, "model": "m",
            "choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "tool_calls"}]
        }"#;

        let response = serde_json::from_str::<ChatCompletionResponse>(raw)
            .unwrap()
            .into_response()
            .unwrap();

        assert_eq!(response.text(), Some(""));
        assert_eq!(response.finish_reason(), Some(FinishReason::Other));
        assert_eq!(*response.usage(), Usage::default());
    }

    #[test]
    fn test_chunk_content() {
        let chunk: ChatCompletionChunk =
            serde_json::from_str(r#"{"id":"c","choices":[{"delta":{"content":"Hi"}}]}"#).unwrap();
        assert_eq!(chunk.into_content(), Some("Hi".to_string()));

        let empty: ChatCompletionChunk = serde_json::from_str(r#"{"id":"c","choices":[]}"#).unwrap();
        assert_eq!(empty.into_content(), None);
    }
}
