//! OpenAI chat completions integration.

mod client;
mod dto;
mod errors;
mod sse;

pub use client::OpenAIClient;
pub use dto::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChunkChoice, ChunkDelta,
    ResponseChoice, ResponseMessage, WireUsage,
};
pub use errors::{status_error_kind, transport_error_kind};
pub use sse::SseDecoder;
