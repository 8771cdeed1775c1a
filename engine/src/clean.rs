//! Response cleaning
//!
//! Reasoning-capable models leak `<think>...</think>` blocks into their
//! output; this pass strips them and normalizes whitespace so the result
//! pastes cleanly into an issue tracker.

use regex::Regex;

/// Cleans raw model output using precompiled patterns.
pub struct ResponseCleaner {
    think_block: Regex,
    think_tag: Regex,
    newline_runs: Regex,
    space_runs: Regex,
}

impl ResponseCleaner {
    pub fn new() -> Self {
        Self {
            think_block: Regex::new(r"(?is)<think>.*?</think>").expect("Invalid think pattern"),
            think_tag: Regex::new(r"(?i)</?think[^>]*>").expect("Invalid think tag pattern"),
            newline_runs: Regex::new(r"\n\s*\n").expect("Invalid newline pattern"),
            space_runs: Regex::new(r"[ \t]+").expect("Invalid space pattern"),
        }
    }

    /// Strip think blocks and stray think tags, collapse runs of blank
    /// lines to exactly one, collapse horizontal whitespace runs to a
    /// single space, and trim.
    pub fn clean(&self, text: &str) -> String {
        let text = self.think_block.replace_all(text, "");
        let text = self.think_tag.replace_all(&text, "");
        let text = self.newline_runs.replace_all(&text, "\n\n");
        let text = self.space_runs.replace_all(&text, " ");
        text.trim().to_string()
    }
}

impl Default for ResponseCleaner {
    fn default() -> Self {
        Self::new()
    }
}
