//! Configuration management
//!
//! This module handles loading, validation, and management of the taskforge
//! configuration. Configuration is stored in TOML format at
//! ~/.taskforge/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Optional codebase root, log level, data directory
//! - **llm**: Provider selection and Groq settings
//! - **history**: Enhancement history bounds
//!
//! # Path Expansion
//!
//! The configuration system automatically:
//! - Expands ~ to the user's home directory
//! - Creates the data directory if it doesn't exist
//! - Verifies the codebase root is a directory when one is configured
//!
//! Note: the API key is never stored in this file. It lives in the OS
//! keychain (see the `secrets` module) or the TASKFORGE_GROQ_API_KEY
//! environment variable.

use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Represents the complete taskforge configuration loaded from
/// ~/.taskforge/config.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Core engine settings
    #[serde(default)]
    pub core: CoreConfig,

    /// LLM provider configuration
    #[serde(default)]
    pub llm: LLMConfig,

    /// Enhancement history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Core engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Root of the codebase used for relevance context (supports ~ expansion).
    /// When unset, prompts are assembled without a codebase section.
    #[serde(default)]
    pub codebase: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Data directory path (supports ~ expansion)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// Selected provider (currently only "groq")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Groq provider settings
    #[serde(default)]
    pub groq: GroqConfig,
}

/// Groq provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Base URL for the Groq OpenAI-compatible API
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,

    /// Selected model name
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// Models offered by the `taskforge models` command
    #[serde(default = "default_groq_models")]
    pub models: Vec<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_completion_tokens: u32,
    // Note: API key stored in OS keychain, not in config
}

/// Enhancement history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of retained enhancements
    #[serde(default = "default_history_max")]
    pub max_entries: usize,

    /// History file name inside the data directory
    #[serde(default = "default_history_file")]
    pub file: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("~/.taskforge")
}

fn default_provider() -> String {
    "groq".to_string()
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_model() -> String {
    "moonshotai/kimi-k2-instruct".to_string()
}

fn default_groq_models() -> Vec<String> {
    [
        "moonshotai/kimi-k2-instruct",
        "openai/gpt-oss-120b",
        "qwen/qwen3-32b",
        "deepseek-r1-distill-llama-70b",
        "gemma2-9b-it",
        "llama-3.3-70b-versatile",
        "meta-llama/llama-4-maverick-17b-128e-instruct",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_temperature() -> f64 {
    0.5
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_history_max() -> usize {
    10
}

fn default_history_file() -> String {
    "enhancement_history.json".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            codebase: None,
            log_level: default_log_level(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            groq: GroqConfig::default(),
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            base_url: default_groq_base_url(),
            model: default_groq_model(),
            models: default_groq_models(),
            temperature: default_temperature(),
            max_completion_tokens: default_max_tokens(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_history_max(),
            file: default_history_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            core: CoreConfig::default(),
            llm: LLMConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.taskforge/config.toml)
    ///
    /// If the configuration file doesn't exist, creates a default configuration.
    /// Validates the configuration after loading and returns descriptive errors
    /// if validation fails.
    pub fn load_or_create() -> Result<Self, EngineError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate_and_process()?;

        Ok(config)
    }

    /// Create default configuration and save to path
    fn create_default(path: &Path) -> Result<Self, EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let mut config = Self::default();
        config.validate_and_process()?;

        let toml_string = toml::to_string_pretty(&config)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| EngineError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(config)
    }

    /// Get the default configuration file path (~/.taskforge/config.toml)
    pub fn default_config_path() -> Result<PathBuf, EngineError> {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".taskforge").join("config.toml"))
    }

    /// Absolute path of the history file inside the data directory
    pub fn history_path(&self) -> PathBuf {
        self.core.data_dir.join(&self.history.file)
    }

    /// Validate and process configuration
    ///
    /// - Validates the log level and provider name
    /// - Expands ~ in paths
    /// - Creates the data directory if it doesn't exist
    /// - Verifies the codebase root (when set) is an existing directory
    fn validate_and_process(&mut self) -> Result<(), EngineError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.core.log_level.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                valid_log_levels.join(", ")
            )));
        }

        if self.llm.provider != "groq" {
            return Err(EngineError::Config(format!(
                "Invalid provider '{}'. Must be: groq",
                self.llm.provider
            )));
        }

        if !self.llm.groq.models.contains(&self.llm.groq.model) {
            return Err(EngineError::Config(format!(
                "Model '{}' is not in the configured model list",
                self.llm.groq.model
            )));
        }

        self.core.data_dir = expand_path(&self.core.data_dir)?;
        if !self.core.data_dir.exists() {
            fs::create_dir_all(&self.core.data_dir).map_err(|e| {
                EngineError::Config(format!("Failed to create data directory: {}", e))
            })?;
        }

        if let Some(codebase) = &self.core.codebase {
            let codebase = expand_path(codebase)?;
            if !codebase.is_dir() {
                return Err(EngineError::Config(format!(
                    "Codebase root is not a directory: {:?}",
                    codebase
                )));
            }
            self.core.codebase = Some(codebase);
        }

        Ok(())
    }
}

/// Expand ~ in path to user's home directory
pub fn expand_path(path: &Path) -> Result<PathBuf, EngineError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| EngineError::Config("Invalid UTF-8 in path".to_string()))?;

    if let Some(rest) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(rest))
    } else if path_str == "~" {
        dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}
