//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the lectern binary.

mod commands;
mod complete;
mod paced;
mod select;

pub use commands::{Cli, Commands};
pub use complete::{run_compare, run_complete, run_stream};
pub use paced::run_paced;
pub use select::run_select_model;
