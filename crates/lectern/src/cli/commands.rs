//! CLI command definitions.

use clap::{Parser, Subcommand};
use lectern::TaskComplexity;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Lectern - paced, retrying LLM completion dispatcher
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(about = "Paced, retrying LLM completion dispatcher with streaming support", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load configuration from this file instead of the standard locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one prompt and print the completion
    Complete {
        /// Prompt text
        prompt: String,

        /// Model identifier (defaults to the configured model)
        #[arg(long)]
        model: Option<String>,

        /// Upper bound on generated tokens
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Attempt budget (defaults to the configured budget)
        #[arg(long)]
        attempts: Option<NonZeroU32>,

        /// Also print id, model, creation time, usage, and finish reason
        #[arg(long)]
        details: bool,
    },

    /// Stream a completion, printing fragments as they arrive
    Stream {
        /// Prompt text
        prompt: String,

        /// Model identifier (defaults to the configured model)
        #[arg(long)]
        model: Option<String>,
    },

    /// Send the same prompt to several models
    Compare {
        /// Prompt text
        prompt: String,

        /// Comma-separated model identifiers
        #[arg(long, value_delimiter = ',', required = true)]
        models: Vec<String>,

        /// Upper bound on generated tokens
        #[arg(long)]
        max_tokens: Option<u32>,
    },

    /// Send numbered test prompts through the rate limiter
    Paced {
        /// Number of prompts to send
        #[arg(long, default_value = "5")]
        count: u32,

        /// Requests per minute
        #[arg(long, default_value = "1")]
        rpm: u32,
    },

    /// Recommend a model for a task
    SelectModel {
        /// Task complexity: simple, moderate, or complex
        #[arg(long)]
        complexity: TaskComplexity,

        /// Prefer the cheapest adequate model
        #[arg(long)]
        budget_sensitive: bool,
    },
}
