//! Tracking of references that must not be injected again.

use regex::Regex;
use std::collections::HashSet;

/// References already present in the file being rewritten.
///
/// One tracker lives for exactly one file rewrite. File-level references
/// come from scanning the text outside every block; block-level ones are
/// the references injected into the block currently being rendered, so
/// that separate blocks of the same type each receive the full list.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    referenced: HashSet<String>,
    scanned: HashSet<String>,
    injected: HashSet<String>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every reference `detect` finds in `outside`.
    ///
    /// Each block type is scanned at most once; the outside text is the
    /// same for every block of a file.
    pub fn prescan(&mut self, block_type: &str, outside: &str, detect: &Regex) {
        if !self.scanned.insert(block_type.to_string()) {
            return;
        }
        for caps in detect.captures_iter(outside) {
            if let Some(reference) = caps.get(1) {
                self.record(reference.as_str());
            }
        }
    }

    /// Record an existing reference; quotes and whitespace are ignored.
    pub fn record(&mut self, reference: &str) {
        let cleaned: String = reference
            .chars()
            .filter(|c| !matches!(c, '\'' | '"') && !c.is_whitespace())
            .collect();
        tracing::trace!(reference = %cleaned, "Found existing reference");
        self.referenced.insert(cleaned);
    }

    /// Start rendering a new block.
    pub fn begin_block(&mut self) {
        self.injected.clear();
    }

    pub fn mark_injected(&mut self, path: &str) {
        self.injected.insert(path.to_string());
    }

    pub fn already_referenced(&self, path: &str) -> bool {
        self.referenced.contains(path) || self.injected.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_strips_quotes_and_whitespace() {
        let mut tracker = DuplicateTracker::new();
        tracker.record(" 'lib/a.js' ");
        assert!(tracker.already_referenced("lib/a.js"));
    }

    #[test]
    fn test_prescan_collects_first_group() {
        let detect = Regex::new(r#"<script.*src=['"]([^'"]+)"#).unwrap();
        let mut tracker = DuplicateTracker::new();
        tracker.prescan(
            "js",
            "<script src=\"a.js\"></script>\n<script src='b.js'></script>",
            &detect,
        );
        assert!(tracker.already_referenced("a.js"));
        assert!(tracker.already_referenced("b.js"));
        assert!(!tracker.already_referenced("c.js"));
    }

    #[test]
    fn test_prescan_runs_once_per_block_type() {
        let detect = Regex::new(r#"src="([^"]+)""#).unwrap();
        let mut tracker = DuplicateTracker::new();
        tracker.prescan("js", "src=\"a.js\"", &detect);
        tracker.prescan("js", "src=\"b.js\"", &detect);
        assert!(tracker.already_referenced("a.js"));
        assert!(!tracker.already_referenced("b.js"));
    }

    #[test]
    fn test_injected_paths_reset_per_block() {
        let mut tracker = DuplicateTracker::new();
        tracker.begin_block();
        tracker.mark_injected("a.js");
        assert!(tracker.already_referenced("a.js"));

        tracker.begin_block();
        assert!(!tracker.already_referenced("a.js"));
    }
}
