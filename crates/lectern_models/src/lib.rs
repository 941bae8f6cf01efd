//! Completion backends for the Lectern dispatcher.
//!
//! Currently one provider is implemented: the OpenAI chat completions
//! endpoint, which also serves any OpenAI-compatible server reachable through
//! a custom base URL.
//!
//! ```no_run
//! use lectern_core::CompletionRequest;
//! use lectern_interface::CompletionBackend;
//! use lectern_models::OpenAIClient;
//! use lectern_rate_limit::LecternConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LecternConfig::load()?;
//! let client = OpenAIClient::from_config(&config.client)?;
//!
//! let request = CompletionRequest::builder()
//!     .prompt("Say 'test' and nothing else.")
//!     .model("gpt-3.5-turbo")
//!     .build()?;
//! let response = client.complete(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChunkChoice, ChunkDelta,
    OpenAIClient, ResponseChoice, ResponseMessage, SseDecoder, WireUsage, status_error_kind,
    transport_error_kind,
};
