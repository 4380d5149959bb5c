//! Fallback ignore matcher - evaluates a root `.gitignore` without git
//!
//! This module contains pure matching logic with no I/O dependencies.
//! It is an approximation used only when `git check-ignore` cannot run:
//! a single root-level ignore file, no escapes, and a plain last-match-wins
//! fold per path.

use std::collections::BTreeSet;

use crate::core::models::{PathEntry, RuleSet, ScanWarning};

/// Evaluates candidates against a parsed root ignore file
#[derive(Debug, Clone, Default)]
pub struct FallbackPatternMatcher {
    rules: RuleSet,
}

impl FallbackPatternMatcher {
    /// Create a matcher over an existing rule set
    #[must_use]
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Parse ignore-file content; malformed lines are skipped and reported
    #[must_use]
    pub fn from_content(content: &str) -> (Self, Vec<ScanWarning>) {
        let (rules, warnings) = RuleSet::parse(content);
        (Self::new(rules), warnings)
    }

    /// The underlying rules
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Verdict for a single path
    #[must_use]
    pub fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        self.rules.is_ignored(path, is_dir)
    }

    /// The subset of candidates the rules ignore
    ///
    /// Each path is decided on its own, so the order of `candidates` does
    /// not affect the result.
    #[must_use]
    pub fn evaluate(&self, candidates: &[PathEntry]) -> BTreeSet<String> {
        if self.rules.is_empty() {
            return BTreeSet::new();
        }
        candidates
            .iter()
            .filter(|entry| self.is_ignored(&entry.path, entry.is_dir()))
            .map(|entry| entry.path.clone())
            .collect()
    }
}
