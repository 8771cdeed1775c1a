//! CLI interface for taskforge
//!
//! This module provides the command-line interface using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskforge prompt enhancer
///
/// Turns rough developer notes into structured, actionable task lists via
/// a hosted LLM, optionally attaching relevant files from a codebase.
#[derive(Parser, Debug)]
#[command(name = "taskforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enhance text into a structured task list (reads stdin when no text
    /// is given)
    Enhance {
        /// The raw notes to enhance
        text: Option<String>,

        /// Codebase root for relevance context (overrides config)
        #[arg(long, value_name = "PATH")]
        codebase: Option<PathBuf>,

        /// Model to use for this run (overrides config)
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,
    },

    /// Show recent enhancement results
    History {
        /// Number of entries to show (default: 10)
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// List the configured models
    Models,

    /// Manage the Groq API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// API key management actions
#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Store the API key in the OS keychain (prompts on stdin)
    Set,

    /// Check whether an API key is available
    Status,

    /// Remove the API key from the OS keychain
    Clear,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Print the configuration file path
    Path,
}
