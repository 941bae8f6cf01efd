//! Single-prompt command handlers.

use anyhow::{Context, Result, anyhow};
use lectern::{
    BlockingDispatcher, Completion, CompletionRequest, DispatchError, LecternConfig, OpenAIClient,
};
use std::io::Write;
use std::num::NonZeroU32;
use tracing::instrument;

fn dispatcher(config: &LecternConfig) -> Result<BlockingDispatcher<OpenAIClient>> {
    let client = OpenAIClient::from_config(&config.client)?;
    Ok(BlockingDispatcher::from_config(client, config)?)
}

fn request(
    config: &LecternConfig,
    prompt: &str,
    model: Option<&str>,
    max_tokens: Option<u32>,
    stream: bool,
) -> Result<CompletionRequest> {
    let mut builder = CompletionRequest::builder();
    builder
        .prompt(prompt)
        .model(model.unwrap_or(&config.client.default_model))
        .stream(stream);
    if let Some(max_tokens) = max_tokens {
        builder.max_output_tokens(max_tokens);
    }
    builder.build().context("Invalid request")
}

pub(crate) fn failed(error: DispatchError) -> anyhow::Error {
    anyhow!("API call failed: {}", error.reason())
}

fn print_details(completion: &Completion) {
    if let Some(response) = completion.response() {
        println!("ID: {}", response.id());
        println!("Model: {}", response.model());
        println!("Created: {}", response.created_at());
    }
    if let Some(usage) = completion.usage() {
        println!("Usage: {}", usage);
    }
    if let Some(reason) = completion.finish_reason() {
        println!("Finish reason: {}", reason);
    }
    println!("Attempts: {}", completion.attempts());
}

/// Handle `complete`.
#[instrument(skip(config, prompt))]
pub fn run_complete(
    config: &LecternConfig,
    prompt: &str,
    model: Option<&str>,
    max_tokens: Option<u32>,
    attempts: Option<NonZeroU32>,
    details: bool,
) -> Result<()> {
    let mut dispatcher = dispatcher(config)?;
    let request = request(config, prompt, model, max_tokens, false)?;
    let attempts = attempts.unwrap_or(dispatcher.inner().max_attempts());

    let completion = dispatcher
        .dispatch_with_attempts(&request, attempts)
        .map_err(failed)?;

    println!("{}", completion.text());
    if details {
        println!();
        print_details(&completion);
    }
    Ok(())
}

/// Handle `stream`.
#[instrument(skip(config, prompt))]
pub fn run_stream(config: &LecternConfig, prompt: &str, model: Option<&str>) -> Result<()> {
    let mut dispatcher = dispatcher(config)?;
    let request = request(config, prompt, model, None, true)?;
    let attempts = dispatcher.inner().max_attempts();

    let mut stdout = std::io::stdout();
    dispatcher
        .dispatch_with_observer(&request, attempts, |fragment| {
            let _ = write!(stdout, "{}", fragment);
            let _ = stdout.flush();
        })
        .map_err(failed)?;
    println!();
    Ok(())
}

/// Handle `compare`.
#[instrument(skip(config, prompt))]
pub fn run_compare(
    config: &LecternConfig,
    prompt: &str,
    models: &[String],
    max_tokens: Option<u32>,
) -> Result<()> {
    let mut dispatcher = dispatcher(config)?;

    for model in models {
        let request = request(config, prompt, Some(model), max_tokens, false)?;
        println!("Model: {}", model);
        match dispatcher.dispatch(&request) {
            Ok(completion) => {
                println!("Response: {}", completion.text());
                if let Some(usage) = completion.usage() {
                    println!("Tokens used: {}", usage.total_tokens());
                }
            }
            Err(e) => println!("API call failed: {}", e.reason()),
        }
        println!();
    }
    Ok(())
}
