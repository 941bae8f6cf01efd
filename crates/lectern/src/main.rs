//! Lectern CLI binary.
//!
//! This binary provides command-line access to the dispatcher:
//! - Send a prompt and print the completion, optionally with full details
//! - Stream a completion live
//! - Compare models and demonstrate pacing

use clap::Parser;
use lectern::LecternConfig;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    use cli::{
        Cli, Commands, run_compare, run_complete, run_paced, run_select_model, run_stream,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    lectern::init_logging(cli.verbose);

    let run = || -> anyhow::Result<()> {
        if let Commands::SelectModel {
            complexity,
            budget_sensitive,
        } = &cli.command
        {
            run_select_model(*complexity, *budget_sensitive);
            return Ok(());
        }

        let config = match &cli.config {
            Some(path) => LecternConfig::from_file(path)?,
            None => LecternConfig::load()?,
        };

        match &cli.command {
            Commands::Complete {
                prompt,
                model,
                max_tokens,
                attempts,
                details,
            } => run_complete(
                &config,
                prompt,
                model.as_deref(),
                *max_tokens,
                *attempts,
                *details,
            ),
            Commands::Stream { prompt, model } => run_stream(&config, prompt, model.as_deref()),
            Commands::Compare {
                prompt,
                models,
                max_tokens,
            } => run_compare(&config, prompt, models, *max_tokens),
            Commands::Paced { count, rpm } => run_paced(&config, *count, *rpm),
            Commands::SelectModel { .. } => Ok(()),
        }
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
