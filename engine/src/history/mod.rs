//! Enhancement history
//!
//! Bounded, most-recent-first log of enhancement results, persisted
//! wholesale to a JSON array after every successful insert. Survives
//! process restarts; a corrupt file is logged and reset rather than
//! treated as fatal.

use crate::errors::EngineError;
use std::fs;
use std::path::{Path, PathBuf};

/// Default cap on retained entries.
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Most-recent-first list of prior enhancement results.
pub struct EnhancementHistory {
    entries: Vec<String>,
    max_entries: usize,
    path: PathBuf,
}

impl EnhancementHistory {
    /// Load history from the given file, or start empty if the file does
    /// not exist. A malformed file is logged and replaced by an empty
    /// history on the next insert.
    pub fn load(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Corrupt history file {:?}: {}", path, e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            entries,
            max_entries,
            path,
        }
    }

    /// Prepend a result, truncate to the cap, and persist.
    ///
    /// Blank text is ignored. Persistence failure is reported but the
    /// in-memory state keeps the entry.
    pub fn add(&mut self, text: &str) -> Result<(), EngineError> {
        if text.trim().is_empty() {
            return Ok(());
        }

        self.entries.insert(0, text.to_string());
        self.entries.truncate(self.max_entries);
        self.save()
    }

    /// Overwrite the history file with the current entries.
    fn save(&self) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| EngineError::History(format!("Failed to create {:?}: {}", parent, e)))?;
        }

        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| EngineError::History(format!("Failed to serialize history: {}", e)))?;

        fs::write(&self.path, json)
            .map_err(|e| EngineError::History(format!("Failed to write {:?}: {}", self.path, e)))
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let history = EnhancementHistory::load(dir.path().join("none.json"), DEFAULT_MAX_ENTRIES);
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_most_recent_first() {
        let dir = tempdir().unwrap();
        let mut history = EnhancementHistory::load(dir.path().join("h.json"), DEFAULT_MAX_ENTRIES);

        history.add("first").unwrap();
        history.add("second").unwrap();

        assert_eq!(history.entries()[0], "second");
        assert_eq!(history.entries()[1], "first");
    }

    #[test]
    fn test_truncates_to_cap() {
        let dir = tempdir().unwrap();
        let mut history = EnhancementHistory::load(dir.path().join("h.json"), DEFAULT_MAX_ENTRIES);

        for i in 0..15 {
            history.add(&format!("entry {}", i)).unwrap();
        }

        assert_eq!(history.entries().len(), DEFAULT_MAX_ENTRIES);
        assert_eq!(history.entries()[0], "entry 14");
    }

    #[test]
    fn test_blank_text_ignored() {
        let dir = tempdir().unwrap();
        let mut history = EnhancementHistory::load(dir.path().join("h.json"), DEFAULT_MAX_ENTRIES);

        history.add("   \n ").unwrap();
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_persists_across_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.json");

        {
            let mut history = EnhancementHistory::load(&path, DEFAULT_MAX_ENTRIES);
            history.add("kept").unwrap();
        }

        let reloaded = EnhancementHistory::load(&path, DEFAULT_MAX_ENTRIES);
        assert_eq!(reloaded.entries(), &["kept".to_string()]);
    }

    #[test]
    fn test_corrupt_file_resets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.json");
        fs::write(&path, "{not json").unwrap();

        let history = EnhancementHistory::load(&path, DEFAULT_MAX_ENTRIES);
        assert!(history.entries().is_empty());
    }
}
