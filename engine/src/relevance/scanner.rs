//! Live relevance scanner
//!
//! Fallback used when no precomputed index exists: walk the codebase tree
//! and match keywords against filenames and a short content sample. This
//! is a best-effort heuristic, not a correctness-critical index: every
//! per-file I/O error is swallowed and the file skipped.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Directory names whose subtrees are never visited.
const SKIP_DIRS: [&str; 3] = [".git", "__pycache__", "node_modules"];

/// Bytes of file content sampled for keyword matching.
const CONTENT_SAMPLE_BYTES: usize = 512;

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIP_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Does any keyword appear as a substring of the haystack?
fn matches_any(haystack: &str, keywords: &BTreeSet<String>) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

/// Lower-cased lossy decode of the first `CONTENT_SAMPLE_BYTES` of a file.
///
/// Returns `None` for unreadable files; binary files decode lossily and
/// simply fail to match.
fn content_sample(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    let mut buf = [0u8; CONTENT_SAMPLE_BYTES];
    let n = file.read(&mut buf).ok()?;
    Some(String::from_utf8_lossy(&buf[..n]).to_lowercase())
}

/// Walk the tree rooted at `root` collecting up to `cap` files matched by
/// filename or content sample. Paths are returned relative to `root`.
///
/// The walk stops outright once the cap is reached.
pub fn scan(root: &Path, keywords: &BTreeSet<String>, cap: usize) -> Vec<String> {
    let mut matches = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        if matches.len() >= cap {
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().to_lowercase();

        let matched = matches_any(&file_name, keywords)
            || content_sample(path)
                .map(|sample| matches_any(&sample, keywords))
                .unwrap_or(false);

        if matched {
            let relative = path.strip_prefix(root).unwrap_or(path);
            matches.push(relative.to_string_lossy().to_string());
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_filename_match() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/login.py"), "def login(): pass").unwrap();

        let found = scan(dir.path(), &keywords(&["login"]), 10);
        assert_eq!(found, vec!["src/login.py".to_string()]);
    }

    #[test]
    fn test_content_sample_match() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("handler.rs"), "fn save_profile() {}").unwrap();

        let found = scan(dir.path(), &keywords(&["save_profile"]), 10);
        assert_eq!(found, vec!["handler.rs".to_string()]);
    }

    #[test]
    fn test_skip_dirs_never_visited() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git/hooks")).unwrap();
        fs::write(dir.path().join(".git/hooks/pre-commit"), "login hook").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/login.py"), "").unwrap();

        let found = scan(dir.path(), &keywords(&["login"]), 10);
        assert_eq!(found, vec!["src/login.py".to_string()]);
    }

    #[test]
    fn test_cap_applies() {
        let dir = tempdir().unwrap();
        for i in 0..15 {
            fs::write(dir.path().join(format!("login_{:02}.py", i)), "").unwrap();
        }

        let found = scan(dir.path(), &keywords(&["login"]), 10);
        assert_eq!(found.len(), 10);
    }

    #[test]
    fn test_binary_file_skipped_silently() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), [0u8, 159, 146, 150]).unwrap();
        fs::write(dir.path().join("login.txt"), "login").unwrap();

        let found = scan(dir.path(), &keywords(&["login"]), 10);
        assert_eq!(found, vec!["login.txt".to_string()]);
    }
}
