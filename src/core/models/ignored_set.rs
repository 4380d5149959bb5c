//! The immutable result of one ignore resolution
//!
//! Members come from two sources that are kept apart:
//! - **pruned**: directories (and default-excluded files) dropped by name
//!   before any ignore-file evaluation; their contents were never listed
//! - **matched**: candidates that git (or the fallback matcher) reported as
//!   ignored
//!
//! Because pruned subtrees are never enumerated, membership checks also
//! look at a path's ancestors.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::entry::{ancestors, basename, normalize};

/// Paths excluded from a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IgnoredSet {
    pruned: BTreeSet<String>,
    matched: BTreeSet<String>,
}

impl IgnoredSet {
    /// Build the set from eagerly pruned paths and oracle/fallback matches
    ///
    /// The root (empty path) is never a member.
    #[must_use]
    pub fn from_parts<P, M>(pruned: P, matched: M) -> Self
    where
        P: IntoIterator<Item = String>,
        M: IntoIterator<Item = String>,
    {
        let pruned: BTreeSet<String> =
            pruned.into_iter().map(|p| normalize(&p)).filter(|p| !p.is_empty()).collect();
        let matched = matched
            .into_iter()
            .map(|p| normalize(&p))
            .filter(|p| !p.is_empty() && !pruned.contains(p))
            .collect();
        Self { pruned, matched }
    }

    /// An empty set (raw mode)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Exact membership
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        let path = normalize(path);
        self.pruned.contains(&path) || self.matched.contains(&path)
    }

    /// Whether a path is excluded, either directly or through an ancestor
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        let path = normalize(path);
        if path.is_empty() {
            return false;
        }
        self.pruned.contains(&path)
            || self.matched.contains(&path)
            || ancestors(&path).any(|dir| self.pruned.contains(dir) || self.matched.contains(dir))
    }

    /// Whether a path was excluded purely by eager pruning (itself or an ancestor)
    #[must_use]
    pub fn is_pruned(&self, path: &str) -> bool {
        let path = normalize(path);
        if path.is_empty() {
            return false;
        }
        self.pruned.contains(&path) || ancestors(&path).any(|dir| self.pruned.contains(dir))
    }

    /// Total number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.pruned.len() + self.matched.len()
    }

    /// Whether the set has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pruned.is_empty() && self.matched.is_empty()
    }

    /// Members excluded by eager pruning, sorted
    pub fn pruned(&self) -> impl Iterator<Item = &str> {
        self.pruned.iter().map(String::as_str)
    }

    /// Members reported by the oracle or fallback matcher, sorted
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.matched.iter().map(String::as_str)
    }

    /// Pruned members grouped by name, e.g. `node_modules -> 3`
    ///
    /// Lets a report say how many dependency folders were skipped without
    /// walking them.
    #[must_use]
    pub fn pruned_summary(&self) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        for path in &self.pruned {
            *summary.entry(basename(path).to_string()).or_insert(0) += 1;
        }
        summary
    }
}
