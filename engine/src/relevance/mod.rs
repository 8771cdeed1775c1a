//! Codebase-context relevance engine
//!
//! Given the keyword set for a request and a codebase root, produce the
//! "relevant files" block for the outgoing prompt. The precomputed index
//! is preferred; when it is missing the engine announces a live search on
//! the event bus and walks the tree instead. A malformed index degrades
//! to the live scan as well; the keyword heuristic is best-effort and
//! no failure here is surfaced to the caller.

pub mod index;
pub mod scanner;

use crate::events::{Event, EventBus};
use std::collections::BTreeSet;
use std::path::Path;

/// Uniform cap on files in the formatted block, whichever path produced it.
pub const MAX_RELEVANT_FILES: usize = 10;

/// Join up to `MAX_RELEVANT_FILES` paths into a labeled bulleted block.
fn format_block(label: &str, files: impl IntoIterator<Item = String>) -> String {
    let listed: Vec<String> = files.into_iter().take(MAX_RELEVANT_FILES).collect();
    if listed.is_empty() {
        return String::new();
    }

    format!("Relevant files found ({}):\n- {}", label, listed.join("\n- "))
}

/// Produce the relevance block for a request, or an empty string when
/// nothing matches (or there are no keywords to match).
///
/// The caller guarantees `root` is an existing directory.
pub async fn gather_context(root: &Path, keywords: &BTreeSet<String>, bus: &EventBus) -> String {
    if keywords.is_empty() {
        return String::new();
    }

    match index::lookup(root, keywords) {
        Ok(Some(files)) => format_block("from index", files),
        Ok(None) => {
            bus.publish(Event::Status {
                message: "No index found. Performing live file search...".to_string(),
            })
            .await;
            live_scan(root, keywords)
        }
        Err(e) => {
            tracing::warn!("Error reading index file: {}", e);
            live_scan(root, keywords)
        }
    }
}

fn live_scan(root: &Path, keywords: &BTreeSet<String>) -> String {
    let files = scanner::scan(root, keywords, MAX_RELEVANT_FILES);
    format_block("live search", files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn test_index_hit_skips_live_scan() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join(".enhancer_cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("index.json"), r#"{"login": ["auth/login.py"]}"#).unwrap();
        // A file a live scan would find, to prove the index path was taken
        fs::write(dir.path().join("login_other.py"), "").unwrap();

        let bus = EventBus::new();
        let block = gather_context(dir.path(), &keywords(&["login", "bug"]), &bus).await;

        assert!(block.contains("from index"));
        assert!(block.contains("auth/login.py"));
        assert!(!block.contains("login_other.py"));
    }

    #[tokio::test]
    async fn test_missing_index_publishes_status_and_scans() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("login.py"), "").unwrap();

        let bus = EventBus::new();
        let mut rx = bus.subscribe(crate::events::EventType::Status).await;

        let block = gather_context(dir.path(), &keywords(&["login"]), &bus).await;

        assert!(block.contains("live search"));
        assert!(block.contains("login.py"));
        match rx.recv().await.unwrap() {
            Event::Status { message } => assert!(message.contains("live file search")),
            other => panic!("Wrong event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_index_falls_back_to_live_scan() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join(".enhancer_cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("index.json"), "{broken").unwrap();
        fs::write(dir.path().join("login.py"), "").unwrap();

        let bus = EventBus::new();
        let block = gather_context(dir.path(), &keywords(&["login"]), &bus).await;

        assert!(block.contains("live search"));
        assert!(block.contains("login.py"));
    }

    #[tokio::test]
    async fn test_empty_index_accumulator_yields_empty_block() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join(".enhancer_cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("index.json"), r#"{"other": ["x.py"]}"#).unwrap();

        let bus = EventBus::new();
        let block = gather_context(dir.path(), &keywords(&["login"]), &bus).await;
        assert_eq!(block, "");
    }

    #[tokio::test]
    async fn test_no_keywords_yields_empty_block() {
        let dir = tempdir().unwrap();
        let bus = EventBus::new();
        assert_eq!(gather_context(dir.path(), &BTreeSet::new(), &bus).await, "");
    }

    #[test]
    fn test_format_block_caps_entries() {
        let files = (0..15).map(|i| format!("f{}.py", i));
        let block = format_block("from index", files);
        assert_eq!(block.matches("\n- ").count(), MAX_RELEVANT_FILES);
        assert!(!block.contains("f10.py"));
    }
}
