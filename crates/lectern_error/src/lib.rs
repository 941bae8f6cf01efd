//! Error types for the Lectern completion dispatcher.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! [`RemoteError`] is the failure signal of a single remote call and is what
//! the retry loop classifies. [`DispatchError`] is what a caller receives once
//! the retry loop has given up.
//!
//! # Examples
//!
//! ```
//! use lectern_error::{LecternResult, ConfigError};
//!
//! fn load_key() -> LecternResult<String> {
//!     Err(ConfigError::new("OPENAI_API_KEY not set"))?
//! }
//!
//! match load_key() {
//!     Ok(key) => println!("Got: {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod dispatch;
mod error;
mod http;
mod remote;
mod runtime;
mod stream;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use dispatch::{DispatchError, DispatchErrorKind, DispatchResult};
pub use error::{LecternError, LecternErrorKind, LecternResult};
pub use http::HttpError;
pub use remote::{RemoteError, RemoteErrorKind, RemoteResult};
pub use runtime::RuntimeError;
pub use stream::{StreamError, StreamErrorKind, StreamResult};
