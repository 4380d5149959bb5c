//! Output formatting for human and JSON modes
//!
//! A [`ScanReport`] is built once from a [`Resolution`] and can be rendered
//! either as human-readable text or machine-parseable JSON.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{EntryKind, ScanWarning};
use crate::resolver::{Resolution, VerdictSource};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Summary of one scan
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Scan root as given
    pub root: String,
    /// Where the non-pruned verdicts came from
    pub source: VerdictSource,
    /// Entries that survived eager pruning
    pub candidates: usize,
    /// Members of the ignored set
    pub ignored: usize,
    /// Candidates not ignored
    pub kept: usize,
    /// Pruned entries grouped by name
    pub pruned: BTreeMap<String, usize>,
    /// Files matching a preserve pattern
    pub preserved: Vec<String>,
    /// Symbolic links seen (not followed)
    pub symlinks: usize,
    /// Non-fatal problems
    pub warnings: Vec<ScanWarning>,
    /// Whether the scan was interrupted
    pub cancelled: bool,
    /// Kept paths, when a listing was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<Vec<ListedPath>>,
}

/// A kept path in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedPath {
    /// Root-relative path
    pub path: String,
    /// Entry kind
    pub kind: EntryKind,
}

impl ScanReport {
    /// Build a report; with `list`, kept paths up to `max_depth` are included
    #[must_use]
    pub fn new(root: &Path, resolution: &Resolution, list: bool, max_depth: Option<usize>) -> Self {
        let kept = resolution.kept().count();
        let listing = list.then(|| {
            resolution
                .kept()
                .filter(|entry| max_depth.is_none_or(|max| entry.depth <= max))
                .map(|entry| ListedPath {
                    path: entry.path.clone(),
                    kind: entry.kind,
                })
                .collect()
        });

        Self {
            root: root.display().to_string(),
            source: resolution.source,
            candidates: resolution.candidates.len(),
            ignored: resolution.ignored.len(),
            kept,
            pruned: resolution.ignored.pruned_summary(),
            preserved: resolution.preserved.clone(),
            symlinks: resolution.symlinks,
            warnings: resolution.warnings.clone(),
            cancelled: resolution.cancelled,
            listing,
        }
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();

        if self.cancelled {
            let _ = writeln!(out, "{}", "Scan interrupted; results are partial.".yellow());
        }
        let _ = writeln!(out, "{} {}", "Scanned".bold(), self.root);
        let _ = writeln!(out, "  source:     {}", self.source);
        let _ = writeln!(out, "  candidates: {}", self.candidates);
        let _ = writeln!(out, "  ignored:    {}", self.ignored);
        let _ = writeln!(out, "  kept:       {}", self.kept);
        if self.symlinks > 0 {
            let _ = writeln!(out, "  symlinks:   {} (not followed)", self.symlinks);
        }

        if !self.pruned.is_empty() {
            let _ = writeln!(out, "\n{}", "Pruned:".bold());
            for (name, count) in &self.pruned {
                if *count == 1 {
                    let _ = writeln!(out, "  {name}");
                } else {
                    let _ = writeln!(out, "  {name} (x{count})");
                }
            }
        }

        if !self.preserved.is_empty() {
            let _ = writeln!(out, "\n{}", "Preserved:".bold());
            for path in &self.preserved {
                let _ = writeln!(out, "  {}", path.green());
            }
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\n{}", "Warnings:".yellow().bold());
            for warning in &self.warnings {
                let _ = writeln!(out, "  {warning}");
            }
        }

        if let Some(listing) = &self.listing {
            let _ = writeln!(out);
            for entry in listing {
                if entry.kind == EntryKind::Directory {
                    let _ = writeln!(out, "{}/", entry.path.blue());
                } else {
                    let _ = writeln!(out, "{}", entry.path);
                }
            }
        }

        out
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
