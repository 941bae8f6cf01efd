//! Client-side pacing and configuration.
//!
//! This crate keeps request starts spaced to a requests-per-minute budget and
//! loads the TOML settings (pacing, retry budget, remote client) the
//! dispatcher is built from.
//!
//! ```no_run
//! use lectern_rate_limit::{LecternConfig, RateLimiter};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LecternConfig::load()?;
//! let mut limiter = RateLimiter::from_config(&config.rate_limit)?;
//! limiter.wait_if_needed().await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod limiter;

pub use config::{ClientConfig, LecternConfig, PacingConfig, RetryConfig};
pub use error::{RateLimitError, RateLimitErrorKind, RateLimitResult};
pub use limiter::RateLimiter;
