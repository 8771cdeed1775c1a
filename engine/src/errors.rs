//! Error types and handling
//!
//! This module provides the error types used throughout the taskforge engine.
//! All errors implement the `ErrorHint` trait which provides user-friendly
//! hints and indicates whether errors are recoverable.
//!
//! Error messages shown to users must never contain the API key; anything
//! that might embed one goes through `SecretManager::scrub` first.

use thiserror::Error;

/// Trait for engine error extensions
///
/// Provides additional context for errors: a hint that is safe to display
/// to end users, and whether the error leaves the engine ready for the
/// next request.
pub trait ErrorHint {
    /// Returns a user-friendly hint for the error
    fn user_hint(&self) -> &str;

    /// Returns whether the error is recoverable
    ///
    /// Every error in this engine is recoverable in the sense that the
    /// process stays alive, but non-recoverable here means manual
    /// intervention (fixing config, setting a key) is needed before a
    /// retry can succeed.
    fn is_recoverable(&self) -> bool;
}

/// Main engine error type
///
/// # Error Categories
///
/// - **Configuration**: Invalid or missing configuration, missing API key
/// - **Upstream**: LLM API or network failures
/// - **In-flight**: single-flight rejection of a concurrent enhancement
/// - **History**: persistence failures for the enhancement history
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key is not set")]
    MissingApiKey,

    #[error("Keyring error: {0}")]
    Keyring(String),

    // Request pipeline errors
    #[error("An enhancement is already in progress")]
    EnhancementInFlight,

    #[error("Nothing to enhance: input text is empty")]
    EmptyInput,

    // LLM / network errors
    #[error("Upstream error: {0}")]
    Upstream(String),

    // History persistence errors
    #[error("History error: {0}")]
    History(String),
}

impl ErrorHint for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            EngineError::Config(_) => "Check ~/.taskforge/config.toml for invalid values",
            EngineError::MissingApiKey => {
                "Set your Groq API key with `taskforge key set` or TASKFORGE_GROQ_API_KEY"
            }
            EngineError::Keyring(_) => {
                "OS keychain access failed; the TASKFORGE_GROQ_API_KEY env var bypasses it"
            }
            EngineError::EnhancementInFlight => {
                "Still enhancing the previous text; wait for it to finish"
            }
            EngineError::EmptyInput => "Provide some text to enhance",
            EngineError::Upstream(_) => "The LLM API call failed; check your network and model",
            EngineError::History(_) => "Enhancement succeeded but the history file was not updated",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            EngineError::Config(_) | EngineError::MissingApiKey | EngineError::Keyring(_) => false,
            EngineError::EnhancementInFlight
            | EngineError::EmptyInput
            | EngineError::Upstream(_)
            | EngineError::History(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_is_recoverable() {
        let err = EngineError::Upstream("connection refused".to_string());
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_missing_key_is_not_recoverable() {
        let err = EngineError::MissingApiKey;
        assert!(!err.is_recoverable());
        assert!(err.user_hint().contains("taskforge key set"));
    }

    #[test]
    fn test_in_flight_display() {
        let err = EngineError::EnhancementInFlight;
        assert_eq!(err.to_string(), "An enhancement is already in progress");
    }
}
