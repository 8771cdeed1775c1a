//! Taskforge Engine Library
//!
//! This library provides the core functionality of the taskforge prompt
//! enhancer. It is used by both the main binary and integration tests.

/// Error types and user-facing hints
pub mod errors;

/// Configuration management module
pub mod config;

/// Secret management module
pub mod secrets;

/// Keyword extraction from request text
pub mod keywords;

/// Codebase-context relevance engine
pub mod relevance;

/// Prompt template and assembly
pub mod prompt;

/// LLM provider abstraction layer
pub mod llm;

/// Response cleaning pass
pub mod clean;

/// Bounded enhancement history
pub mod history;

/// Event bus for pipeline-to-frontend communication
pub mod events;

/// Enhancement request pipeline
pub mod pipeline;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
