//! Configuration loading and validation

use std::fs;
use tempfile::tempdir;

use taskforge_engine::config::Config;
use taskforge_engine::errors::EngineError;

/// Write a config file and load it through the full validation path.
fn load_toml(contents: &str) -> Result<Config, EngineError> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    Config::load_from_path(&path)
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let config = load_toml(&format!(
        r#"
[core]
data_dir = "{}"
log_level = "debug"
"#,
        dir.path().display()
    ))
    .unwrap();

    assert_eq!(config.core.log_level, "debug");
    assert_eq!(config.llm.provider, "groq");
    assert_eq!(config.llm.groq.model, "moonshotai/kimi-k2-instruct");
    assert_eq!(config.llm.groq.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(config.llm.groq.temperature, 0.5);
    assert_eq!(config.history.max_entries, 10);
}

#[test]
fn test_minimal_file_is_all_defaults() {
    let dir = tempdir().unwrap();
    let config = load_toml(&format!(
        r#"
[core]
data_dir = "{}"
"#,
        dir.path().display()
    ))
    .unwrap();

    assert_eq!(config.core.log_level, "info");
    assert!(config.core.codebase.is_none());
    assert!(config
        .llm
        .groq
        .models
        .contains(&"gemma2-9b-it".to_string()));
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = load_toml(
        r#"
[core]
log_level = "verbose"
"#,
    );

    match result {
        Err(EngineError::Config(msg)) => assert!(msg.contains("log level")),
        other => panic!("expected config error, got {:?}", other.map(|c| c.core.log_level)),
    }
}

#[test]
fn test_unknown_provider_rejected() {
    let result = load_toml(
        r#"
[llm]
provider = "openai"
"#,
    );

    match result {
        Err(EngineError::Config(msg)) => assert!(msg.contains("provider")),
        other => panic!("expected config error, got {:?}", other.map(|c| c.core.log_level)),
    }
}

#[test]
fn test_model_must_be_in_model_list() {
    let result = load_toml(
        r#"
[llm.groq]
model = "made-up-model"
"#,
    );

    match result {
        Err(EngineError::Config(msg)) => assert!(msg.contains("made-up-model")),
        other => panic!("expected config error, got {:?}", other.map(|c| c.core.log_level)),
    }
}

#[test]
fn test_custom_model_list_accepts_its_own_model() {
    let dir = tempdir().unwrap();
    let config = load_toml(&format!(
        r#"
[core]
data_dir = "{}"

[llm.groq]
model = "my-fine-tune"
models = ["my-fine-tune"]
"#,
        dir.path().display()
    ))
    .unwrap();

    assert_eq!(config.llm.groq.model, "my-fine-tune");
}

#[test]
fn test_missing_codebase_dir_rejected() {
    let dir = tempdir().unwrap();
    let result = load_toml(&format!(
        r#"
[core]
data_dir = "{}"
codebase = "/no/such/codebase/root"
"#,
        dir.path().display()
    ));

    match result {
        Err(EngineError::Config(msg)) => assert!(msg.contains("Codebase root")),
        other => panic!("expected config error, got {:?}", other.map(|c| c.core.log_level)),
    }
}

#[test]
fn test_data_dir_created_on_load() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("data");

    let config = load_toml(&format!(
        r#"
[core]
data_dir = "{}"
"#,
        data_dir.display()
    ))
    .unwrap();

    assert!(data_dir.is_dir());
    assert_eq!(config.history_path(), data_dir.join("enhancement_history.json"));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let result = load_toml("core = [broken");
    assert!(matches!(result, Err(EngineError::Config(_))));
}
