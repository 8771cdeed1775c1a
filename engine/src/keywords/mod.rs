//! Keyword extraction from request text
//!
//! Turns free-form developer notes into the candidate keyword set used by
//! the relevance engine. Two sources are unioned:
//!
//! 1. Path-like substrings (anything with a dot-extension, e.g.
//!    `utils/parser.py`), kept verbatim so they can be matched against the
//!    relevance index exactly as written.
//! 2. Lower-cased word tokens, minus a fixed stop-word list.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Articles, prepositions and conjunctions that never identify a file.
const STOP_WORDS: [&str; 13] = [
    "the", "a", "an", "is", "to", "in", "on", "for", "of", "with", "and", "or", "but",
];

/// Matches path-like substrings: word chars, `-`, `.`, `/` with at least one
/// dot followed by a word-char run (a crude "has a file extension" test).
fn path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\w\-./]+\.\w+").expect("Invalid path pattern"))
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w+\b").expect("Invalid word pattern"))
}

/// Extract the keyword set from request text.
///
/// Duplicates collapse and iteration order is deterministic. Empty input
/// yields an empty set; there are no error conditions.
pub fn extract(text: &str) -> BTreeSet<String> {
    let mut keywords: BTreeSet<String> = path_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let lowered = text.to_lowercase();
    for word in word_pattern().find_iter(&lowered) {
        let word = word.as_str();
        if !STOP_WORDS.contains(&word) {
            keywords.insert(word.to_string());
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_like_substring_kept_verbatim() {
        let keywords = extract("the parser in utils/parser.py is broken");
        assert!(keywords.contains("utils/parser.py"));
    }

    #[test]
    fn test_stop_words_removed() {
        let keywords = extract("the a an");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_tokens_lowercased() {
        let keywords = extract("Fix the Login BUG");
        assert!(keywords.contains("fix"));
        assert!(keywords.contains("login"));
        assert!(keywords.contains("bug"));
        assert!(!keywords.contains("the"));
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let keywords = extract("login login LOGIN");
        assert_eq!(keywords.len(), 1);
    }

    #[test]
    fn test_dotted_name_without_separator_is_path_like() {
        let keywords = extract("check config.toml please");
        assert!(keywords.contains("config.toml"));
    }
}
