//! Core data types for the Lectern completion dispatcher.
//!
//! This crate provides the request, response, and streaming event types shared
//! by the dispatcher and every backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod fragment;
mod message;
mod model_selection;
mod request;
mod response;
mod role;

pub use completion::Completion;
pub use fragment::FragmentEvent;
pub use message::Message;
pub use model_selection::{BUDGET_MODEL, COMPLEX_MODEL, MODERATE_MODEL, TaskComplexity, select_model};
pub use request::{CompletionRequest, CompletionRequestBuilder};
pub use response::{Choice, CompletionResponse, CompletionResponseBuilder, FinishReason, Usage};
pub use role::Role;
