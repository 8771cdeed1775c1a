//! LLM Provider Abstraction Layer
//!
//! A common interface for the hosted completion API. The `LLMProvider`
//! trait is the seam the pipeline depends on: given a single assembled
//! prompt it returns raw text or fails. Providers are opaque, potentially
//! multi-second calls; timeouts belong to the HTTP client, not this layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod groq;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Message in a chat-completions request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender (user, system)
    pub role: MessageRole,

    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User message
    User,

    /// System message
    System,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

/// LLM Provider trait that all providers must implement
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "groq")
    fn name(&self) -> &str;

    /// Returns the model identifier this provider is configured for
    fn model(&self) -> &str;

    /// Send a single assembled prompt and return the raw completion text.
    ///
    /// # Errors
    /// * `LLMError` on authentication, rate-limit, network, or response
    ///   parsing failures.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
