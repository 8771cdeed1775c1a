// Taskforge prompt enhancer
// Main entry point for the taskforge binary

use clap::Parser;
use taskforge_engine::cli::{Cli, Command, ConfigAction, KeyAction};
use taskforge_engine::config::Config;
use taskforge_engine::handlers::{
    handle_config_path, handle_config_show, handle_enhance, handle_history, handle_key_clear,
    handle_key_set, handle_key_status, handle_models, OutputFormat,
};
use taskforge_engine::telemetry::{init_telemetry, init_telemetry_with_level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize basic telemetry first (before config is loaded)
    init_telemetry();

    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GIT_COMMIT_HASH");
    let timestamp = env!("BUILD_TIMESTAMP");

    tracing::debug!("Taskforge v{} ({} - {})", version, commit, timestamp);

    // Determine output format
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Load configuration (or use custom path if provided)
    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // Re-initialize telemetry with the CLI/config-driven log level
    // (only takes effect if RUST_LOG env var is not set)
    let log_level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(log_level);

    // Handle commands
    match cli.command {
        Command::Enhance {
            text,
            codebase,
            model,
        } => handle_enhance(text, codebase, model, &config, format).await,

        Command::History { limit } => handle_history(limit, &config, format),

        Command::Models => handle_models(&config, format),

        Command::Key { action } => match action {
            KeyAction::Set => handle_key_set(),
            KeyAction::Status => handle_key_status(format),
            KeyAction::Clear => handle_key_clear(),
        },

        Command::Config { action } => match action {
            ConfigAction::Show => handle_config_show(&config, format),
            ConfigAction::Path => handle_config_path(),
        },
    }
}
