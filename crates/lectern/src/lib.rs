//! Lectern - paced, retrying LLM completion dispatch
//!
//! Lectern sends a single prompt to a remote completion endpoint and returns
//! the completion, shielding the caller from the endpoint's throttling and
//! flaky connectivity.
//!
//! # Features
//!
//! - **Pacing**: request starts are spaced to a requests-per-minute budget
//! - **Retries**: rate-limit and connectivity failures are retried after fixed
//!   delays, up to a bounded number of attempts
//! - **Fail fast**: authentication, quota, and malformed-request failures end
//!   the call immediately
//! - **Streaming**: fragments are forwarded to an observer as they arrive and
//!   reassembled into the final text
//!
//! # Quick Start
//!
//! ```no_run
//! use lectern::{BlockingDispatcher, CompletionRequest, LecternConfig, OpenAIClient};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LecternConfig::load()?;
//!     let client = OpenAIClient::from_config(&config.client)?;
//!     let mut dispatcher = BlockingDispatcher::from_config(client, &config)?;
//!
//!     let request = CompletionRequest::builder()
//!         .prompt("Explain quantum computing in one sentence")
//!         .model("gpt-3.5-turbo")
//!         .build()?;
//!
//!     match dispatcher.dispatch(&request) {
//!         Ok(completion) => println!("{}", completion.text()),
//!         Err(e) => eprintln!("API call failed: {}", e.reason()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `lectern_error` - Error types
//! - `lectern_core` - Request, response, and streaming data types
//! - `lectern_interface` - Backend traits
//! - `lectern_rate_limit` - Pacing and configuration
//! - `lectern_dispatch` - Retry loop, failure classification, stream assembly
//! - `lectern_models` - OpenAI backend
//!
//! This crate (`lectern`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blocking;
mod logging;

pub use blocking::BlockingDispatcher;
pub use logging::init_logging;

pub use lectern_core::*;
pub use lectern_dispatch::*;
pub use lectern_error::*;
pub use lectern_interface::*;
pub use lectern_models::*;
pub use lectern_rate_limit::*;
