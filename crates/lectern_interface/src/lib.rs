//! Trait definitions for the Lectern completion dispatcher.
//!
//! A backend is the only thing that touches the network. The dispatcher drives
//! it through these traits, which keeps retry and pacing logic testable with
//! scripted in-memory backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{CompletionBackend, FragmentStream, StreamingBackend};
