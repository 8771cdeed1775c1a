//! Missing-credential behavior
//!
//! Lives in its own test binary so no other test's environment override
//! can leak in: the `TASKFORGE_GROQ_API_KEY` set by the pipeline tests
//! would otherwise satisfy the credential check.

use std::sync::Arc;
use tempfile::tempdir;

use taskforge_engine::config::Config;
use taskforge_engine::errors::EngineError;
use taskforge_engine::events::EventBus;
use taskforge_engine::pipeline::EnhancementPipeline;

#[tokio::test]
async fn test_missing_key_fails_before_any_network_call() {
    std::env::remove_var("TASKFORGE_GROQ_API_KEY");

    let data_dir = tempdir().unwrap();
    let mut config = Config::default();
    // Unroutable base URL: if the pipeline ever got past the credential
    // check the request would hang or error differently
    config.llm.groq.base_url = "http://127.0.0.1:1/v1".to_string();
    config.core.data_dir = data_dir.path().to_path_buf();

    let pipeline = EnhancementPipeline::new(&config, Arc::new(EventBus::new()));

    let result = pipeline.enhance("fix login bug", None).await;
    assert!(matches!(result, Err(EngineError::MissingApiKey)));

    // Single-flight flag released on the failure path
    assert!(!pipeline.is_enhancing());

    // No history entry either
    assert!(!data_dir.path().join("enhancement_history.json").exists());
}
