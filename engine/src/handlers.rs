//! Command handlers for CLI operations
//!
//! This module implements the handlers for all CLI commands:
//! - enhance: run one enhancement to completion
//! - history: show the last N enhancement results
//! - models: list configured models
//! - key: manage the Groq API key
//! - config: show the active configuration
//!
//! The enhance handler is the coordinating task from the concurrency
//! model: it spawns the pipeline onto a worker task and is the sole
//! consumer of the event stream, so status updates and the completion
//! are observed in order on one task.

use anyhow::{Context, Result};
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::ErrorHint;
use crate::events::{Event, EventBus, EventType};
use crate::history::EnhancementHistory;
use crate::pipeline::EnhancementPipeline;
use crate::secrets::{SecretManager, GROQ_API_KEY, SERVICE_NAME};

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Run one enhancement to completion
///
/// Reads stdin when no text argument is given. Status events are printed
/// to stderr as they arrive so the result on stdout stays pipeable.
pub async fn handle_enhance(
    text: Option<String>,
    codebase: Option<PathBuf>,
    model: Option<String>,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            buf
        }
    };

    let bus = Arc::new(EventBus::new());
    let pipeline = Arc::new(EnhancementPipeline::new(config, Arc::clone(&bus)));

    if let Some(model) = model {
        pipeline.reconfigure(Some(model));
    }

    // Status printer: the coordinating consumer of the event stream
    let mut events = bus.subscribe(EventType::Status).await;
    let printer = tokio::spawn(async move {
        while let Some(Event::Status { message }) = events.recv().await {
            eprintln!("{}", message);
        }
    });

    let worker = {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move { pipeline.enhance(&text, codebase.as_deref()).await })
    };

    let result = worker.await.context("Enhancement task panicked")?;
    printer.abort();

    match result {
        Ok(enhanced) => {
            match format {
                OutputFormat::Text => println!("{}", enhanced),
                OutputFormat::Json => println!("{}", json!({ "result": enhanced })),
            }
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("{} ({})", e, e.user_hint())),
    }
}

/// Show the last N enhancement results
pub fn handle_history(limit: usize, config: &Config, format: OutputFormat) -> Result<()> {
    let history = EnhancementHistory::load(config.history_path(), config.history.max_entries);
    let entries: Vec<&String> = history.entries().iter().take(limit).collect();

    match format {
        OutputFormat::Json => println!("{}", json!(entries)),
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No enhancements yet.");
            }
            for (i, entry) in entries.iter().enumerate() {
                println!("--- {} ---", i + 1);
                println!("{}", entry);
            }
        }
    }

    Ok(())
}

/// List the configured models, marking the selected one
pub fn handle_models(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "selected": config.llm.groq.model, "models": config.llm.groq.models })
        ),
        OutputFormat::Text => {
            for model in &config.llm.groq.models {
                let marker = if *model == config.llm.groq.model {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, model);
            }
        }
    }

    Ok(())
}

/// Store the API key in the OS keychain
pub fn handle_key_set() -> Result<()> {
    eprint!("Enter Groq API key: ");
    use std::io::Write;
    std::io::stderr().flush().ok();

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read API key")?;
    let key = input.trim();

    if key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    let manager = SecretManager::new(SERVICE_NAME);
    manager.set_secret(GROQ_API_KEY, key)?;
    println!("API key stored in the OS keychain.");
    Ok(())
}

/// Check whether an API key is available
pub fn handle_key_status(format: OutputFormat) -> Result<()> {
    let manager = SecretManager::new(SERVICE_NAME);
    let available = manager.has_secret(GROQ_API_KEY);

    match format {
        OutputFormat::Json => println!("{}", json!({ "api_key_available": available })),
        OutputFormat::Text => {
            if available {
                println!("API key is available.");
            } else {
                println!(
                    "No API key found. Set one with `taskforge key set` or TASKFORGE_GROQ_API_KEY."
                );
            }
        }
    }

    Ok(())
}

/// Remove the API key from the OS keychain
pub fn handle_key_clear() -> Result<()> {
    let manager = SecretManager::new(SERVICE_NAME);
    manager.delete_secret(GROQ_API_KEY)?;
    println!("API key removed from the OS keychain.");
    Ok(())
}

/// Print the active configuration
pub fn handle_config_show(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(config).context("Failed to serialize config")?;
            println!("{}", toml);
        }
    }

    Ok(())
}

/// Print the configuration file path
pub fn handle_config_path() -> Result<()> {
    println!("{}", Config::default_config_path()?.display());
    Ok(())
}
