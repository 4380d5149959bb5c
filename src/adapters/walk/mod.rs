//! Eager pruning walk
//!
//! Walks a scan root top-down and decides, before entering a directory,
//! whether it is worth entering at all. Directories whose name matches the
//! default index are recorded and skipped, so nothing under them is ever
//! listed or stat'ed.
//!
//! Pruning is unconditional: a `.gitignore` negation cannot bring a pruned
//! directory back, because the walk never reaches it.

use std::path::Path;

use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::models::{
    EntryKind, PathEntry, ScanContext, ScanPhase, ScanWarning, basename, to_slash_path,
};
use crate::core::services::{DefaultIgnoreIndex, FileVerdict};

/// Why an entry was pruned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    /// Directory name matched an exclude pattern
    ExcludedDirectory,
    /// File name matched an exclude pattern
    ExcludedFile,
    /// The entry could not be read
    Unreadable,
}

/// An entry dropped during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedEntry {
    /// Root-relative path
    pub path: String,
    /// Why it was dropped
    pub reason: PruneReason,
}

/// Everything the walk produced
#[derive(Debug, Clone, Default)]
pub struct PruneOutcome {
    /// Surviving entries, in walk order
    pub candidates: Vec<PathEntry>,
    /// Pruned entries, sorted by path
    pub pruned: Vec<PrunedEntry>,
    /// Candidate files matching a preserve pattern
    pub preserved: Vec<String>,
    /// Number of symbolic links seen (recorded, never followed)
    pub symlinks: usize,
    /// Non-fatal problems
    pub warnings: Vec<ScanWarning>,
    /// Whether the walk stopped early
    pub cancelled: bool,
}

impl PruneOutcome {
    /// Directories below the root that hold their own `.git` entry
    ///
    /// Submodules, nested clones and linked worktrees: git answers for
    /// their contents only when asked from inside them.
    #[must_use]
    pub fn nested_roots(&self) -> Vec<String> {
        self.pruned
            .iter()
            .filter(|p| p.reason != PruneReason::Unreadable && basename(&p.path) == ".git")
            .filter_map(|p| p.path.rsplit_once('/').map(|(parent, _)| parent.to_string()))
            .collect()
    }
}

/// Top-down walker that skips excluded subtrees
#[derive(Debug, Clone, Copy)]
pub struct EagerPruner<'a> {
    index: &'a DefaultIgnoreIndex,
}

impl<'a> EagerPruner<'a> {
    /// Create a pruner over an index
    #[must_use]
    pub const fn new(index: &'a DefaultIgnoreIndex) -> Self {
        Self { index }
    }

    /// Walk `ctx.root()` and split its entries into candidates and pruned paths
    ///
    /// In raw mode nothing is pruned and every entry becomes a candidate.
    /// The interrupt is polled before every entry.
    #[must_use]
    pub fn prune(&self, ctx: &ScanContext<'_>) -> PruneOutcome {
        let root = ctx.root();
        let raw = ctx.raw();
        let mut outcome = PruneOutcome::default();
        let mut pruned_dirs = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| raw || self.should_descend(root, entry, &mut pruned_dirs));

        for item in walker {
            if ctx.is_cancelled() {
                info!("scan interrupted while walking; keeping partial results");
                outcome.cancelled = true;
                outcome.warnings.push(ScanWarning::Cancelled {
                    phase: ScanPhase::Pruning,
                });
                break;
            }

            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    record_walk_error(root, &err, &mut outcome);
                    continue;
                },
            };
            if entry.depth() == 0 {
                continue;
            }
            let Some(rel) = relative(root, entry.path()) else {
                continue;
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_symlink() {
                outcome.symlinks += 1;
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            if kind != EntryKind::Directory && !raw {
                match self.index.classify_file(&rel) {
                    FileVerdict::Excluded => {
                        outcome.pruned.push(PrunedEntry {
                            path: rel,
                            reason: PruneReason::ExcludedFile,
                        });
                        continue;
                    },
                    FileVerdict::Preserved => outcome.preserved.push(rel.clone()),
                    FileVerdict::Keep => {},
                }
            }

            outcome.candidates.push(PathEntry::new(rel, kind, entry.depth()));
        }

        outcome.pruned.extend(pruned_dirs);
        outcome.pruned.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(
            "walk: {} candidates, {} pruned, {} symlinks",
            outcome.candidates.len(),
            outcome.pruned.len(),
            outcome.symlinks
        );
        outcome
    }

    /// Filtering step: decide whether a directory's children are visited
    fn should_descend(&self, root: &Path, entry: &DirEntry, pruned: &mut Vec<PrunedEntry>) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let Some(rel) = relative(root, entry.path()) else {
            return true;
        };
        if self.index.excludes_dir(&rel) {
            debug!("pruned directory {rel}");
            pruned.push(PrunedEntry {
                path: rel,
                reason: PruneReason::ExcludedDirectory,
            });
            return false;
        }
        true
    }
}

/// A directory we could not read is pruned; the scan carries on
fn record_walk_error(root: &Path, err: &walkdir::Error, outcome: &mut PruneOutcome) {
    let rel = err.path().and_then(|p| relative(root, p)).unwrap_or_default();
    let message = err.io_error().map_or_else(|| err.to_string(), ToString::to_string);
    warn!("cannot read {}: {message}", if rel.is_empty() { "scan root" } else { &rel });

    outcome.warnings.push(ScanWarning::PruneIo {
        path: rel.clone(),
        message,
    });
    if !rel.is_empty() {
        outcome.candidates.retain(|c| c.path != rel);
        outcome.pruned.push(PrunedEntry {
            path: rel,
            reason: PruneReason::Unreadable,
        });
    }
}

fn relative(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(to_slash_path)
}
