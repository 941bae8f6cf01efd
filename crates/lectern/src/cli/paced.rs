//! Pacing demonstration handler.

use super::complete::failed;
use anyhow::{Context, Result};
use lectern::{BlockingDispatcher, CompletionRequest, LecternConfig, OpenAIClient};
use std::time::Instant;
use tracing::{info, instrument};

/// Handle `paced`: send `Test {i}` prompts at `rpm` requests per minute.
#[instrument(skip(config))]
pub fn run_paced(config: &LecternConfig, count: u32, rpm: u32) -> Result<()> {
    let mut config = config.clone();
    config.rate_limit.requests_per_minute = rpm;
    config.validate()?;

    let client = OpenAIClient::from_config(&config.client)?;
    let mut dispatcher = BlockingDispatcher::from_config(client, &config)?;
    let start = Instant::now();

    for i in 1..=count {
        let request = CompletionRequest::builder()
            .prompt(format!("Test {}", i))
            .model(config.client.default_model.as_str())
            .build()
            .context("Invalid request")?;

        let completion = dispatcher.dispatch(&request).map_err(failed)?;
        info!(request = i, elapsed = ?start.elapsed(), "Request completed");
        println!("Response {}: {}", i, completion.text());
    }
    Ok(())
}
