//! Retrying, paced completion dispatcher with stream assembly.
//!
//! - [`TransientErrorClassifier`] sorts remote failures into rate-limited,
//!   connectivity, and fatal classes.
//! - [`Dispatcher`] paces each attempt through a
//!   [`RateLimiter`](lectern_rate_limit::RateLimiter), retries transient
//!   failures after fixed delays, and stops at the first fatal one.
//! - [`StreamAssembler`] rebuilds streamed text while forwarding fragments to
//!   an observer.
//!
//! ```no_run
//! use lectern_core::CompletionRequest;
//! use lectern_dispatch::Dispatcher;
//! use lectern_interface::StreamingBackend;
//! use lectern_rate_limit::LecternConfig;
//!
//! # async fn run<B: StreamingBackend>(backend: B) -> Result<(), Box<dyn std::error::Error>> {
//! let config = LecternConfig::load()?;
//! let mut dispatcher = Dispatcher::from_config(backend, &config)?;
//!
//! let request = CompletionRequest::builder()
//!     .prompt("2 most preferred colours for a casual office shirt")
//!     .model("gpt-3.5-turbo")
//!     .build()?;
//!
//! match dispatcher.dispatch(&request).await {
//!     Ok(completion) => println!("{}", completion.text()),
//!     Err(e) => eprintln!("API call failed: {}", e.reason()),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod attempt;
mod classifier;
mod dispatcher;

pub use assembler::StreamAssembler;
pub use attempt::{Attempt, Outcome};
pub use classifier::{BackoffPolicy, ErrorClass, TransientErrorClassifier};
pub use dispatcher::Dispatcher;
