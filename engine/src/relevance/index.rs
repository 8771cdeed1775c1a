//! Relevance index lookup
//!
//! The index is a cache artifact produced by an external indexing tool:
//! a JSON object mapping lower-cased keywords to arrays of relative file
//! paths, stored at `<root>/.enhancer_cache/index.json`. It is consumed
//! read-only and never validated against the current file tree.

use crate::errors::EngineError;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the index artifact under the codebase root.
pub fn index_path(root: &Path) -> PathBuf {
    root.join(".enhancer_cache").join("index.json")
}

/// Look up keywords in the precomputed index.
///
/// Returns `Ok(None)` when no index file exists (the caller falls back to
/// a live scan), `Ok(Some(files))` with the union of file lists for every
/// keyword present as a key (possibly empty), and `Err` when the file
/// exists but cannot be parsed. A parse failure is recoverable: the
/// caller logs it and falls back to a live scan.
pub fn lookup(
    root: &Path,
    keywords: &BTreeSet<String>,
) -> Result<Option<BTreeSet<String>>, EngineError> {
    let path = index_path(root);
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)
        .map_err(|e| EngineError::Config(format!("Failed to read index {:?}: {}", path, e)))?;

    let index: HashMap<String, Vec<String>> = serde_json::from_str(&contents)
        .map_err(|e| EngineError::Config(format!("Malformed index {:?}: {}", path, e)))?;

    let mut relevant = BTreeSet::new();
    for keyword in keywords {
        if let Some(files) = index.get(keyword) {
            relevant.extend(files.iter().cloned());
        }
    }

    Ok(Some(relevant))
}
