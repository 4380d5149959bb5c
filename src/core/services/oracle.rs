//! Ignore oracle - batched queries against the VCS ignore check
//!
//! Candidates are sent in bounded batches. The first failing batch makes
//! the oracle unavailable for the rest of the call; results from earlier
//! batches are discarded rather than mixed with fallback verdicts.
//!
//! Candidates inside a nested working copy (a directory holding its own
//! `.git`, such as a submodule) are asked about from that directory: git
//! refuses paths that cross into a submodule.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::debug;

use crate::core::models::{PathEntry, ScanContext, ancestors};
use crate::core::ports::{IgnoreCheck, OracleError};

/// Default number of paths per `git check-ignore` invocation
///
/// Keeps the command line well below the smallest common limit (32K on Windows).
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// How an oracle query ended
#[derive(Debug)]
pub enum OracleOutcome {
    /// Every batch answered
    Completed(BTreeSet<String>),

    /// Interrupted between batches; holds what earlier batches reported
    Cancelled(BTreeSet<String>),

    /// The oracle cannot be trusted for this call
    Unavailable {
        /// Batch that failed, `None` if the precondition check failed
        batch: Option<usize>,
        /// What went wrong
        error: OracleError,
    },
}

/// Batched ignore queries over a [`IgnoreCheck`] implementation
#[derive(Debug, Clone, Copy)]
pub struct IgnoreOracle<'a> {
    check: &'a dyn IgnoreCheck,
    batch_size: usize,
}

impl<'a> IgnoreOracle<'a> {
    /// Create an oracle; a zero batch size is treated as one
    #[must_use]
    pub fn new(check: &'a dyn IgnoreCheck, batch_size: usize) -> Self {
        Self {
            check,
            batch_size: batch_size.max(1),
        }
    }

    /// Ask the VCS which candidates it ignores
    ///
    /// `nested_roots` are root-relative directories that are working copies
    /// of their own. Cancellation is observed before each batch. Descendants
    /// of an ignored directory are added to the result, since git never looks
    /// inside one.
    pub fn query(
        &self,
        ctx: &ScanContext<'_>,
        candidates: &[PathEntry],
        nested_roots: &[String],
    ) -> OracleOutcome {
        let root = ctx.root();
        if let Err(error) = self.check.probe(root) {
            return OracleOutcome::Unavailable { batch: None, error };
        }

        let mut ignored = BTreeSet::new();
        let mut batch = 0;

        for (prefix, paths) in group_by_working_copy(candidates, nested_roots) {
            let dir = if prefix.is_empty() { root.to_path_buf() } else { root.join(prefix) };
            if !prefix.is_empty() {
                debug!("querying nested working copy {prefix}");
                if let Err(error) = self.check.probe(&dir) {
                    return OracleOutcome::Unavailable {
                        batch: Some(batch),
                        error,
                    };
                }
            }

            for chunk in paths.chunks(self.batch_size) {
                if ctx.is_cancelled() {
                    debug!("oracle cancelled before batch {batch}");
                    return OracleOutcome::Cancelled(with_descendants(candidates, ignored));
                }

                match self.run_batch(&dir, batch, chunk) {
                    Ok(hits) => ignored.extend(hits.into_iter().map(|hit| rejoin(prefix, &hit))),
                    Err(error) => {
                        return OracleOutcome::Unavailable {
                            batch: Some(batch),
                            error,
                        };
                    },
                }
                batch += 1;
            }
        }

        OracleOutcome::Completed(with_descendants(candidates, ignored))
    }

    fn run_batch(
        &self,
        root: &Path,
        batch: usize,
        chunk: &[String],
    ) -> Result<Vec<String>, OracleError> {
        let hits = self.check.check(root, chunk)?;
        debug!("oracle batch {batch}: {} of {} ignored", hits.len(), chunk.len());
        // Only accept paths that were actually asked about
        Ok(hits.into_iter().filter(|hit| chunk.contains(hit)).collect())
    }
}

/// Split candidates by the innermost working copy containing them
///
/// The key is the working copy's root-relative directory (`""` for the scan
/// root); paths are made relative to it. A nested root itself belongs to
/// the enclosing working copy.
fn group_by_working_copy<'c>(
    candidates: &'c [PathEntry],
    nested_roots: &'c [String],
) -> BTreeMap<&'c str, Vec<String>> {
    let nested: BTreeSet<&str> = nested_roots.iter().map(String::as_str).collect();
    let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    for candidate in candidates {
        let path = candidate.path.as_str();
        let owner = ancestors(path).filter(|dir| nested.contains(dir)).last();
        match owner {
            Some(dir) => groups
                .entry(dir)
                .or_default()
                .push(path[dir.len() + 1..].to_string()),
            None => groups.entry("").or_default().push(path.to_string()),
        }
    }
    groups
}

fn rejoin(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{prefix}/{path}")
    }
}

/// Extend an ignored set with candidates that live under an ignored directory
fn with_descendants(candidates: &[PathEntry], mut ignored: BTreeSet<String>) -> BTreeSet<String> {
    if ignored.is_empty() {
        return ignored;
    }
    let inherited: Vec<String> = candidates
        .iter()
        .filter(|c| !ignored.contains(&c.path))
        .filter(|c| ancestors(&c.path).any(|dir| ignored.contains(dir)))
        .map(|c| c.path.clone())
        .collect();
    ignored.extend(inherited);
    ignored
}
