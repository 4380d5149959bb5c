//! Resolver - decides which paths of a tree are noise
//!
//! One [`IgnoreResolver::resolve`] call runs, in order:
//!
//! 1. Eager pruning of default-excluded names (raw mode walks without
//!    pruning and stops here)
//! 2. `git check-ignore` over the surviving candidates, in batches
//! 3. If git cannot answer, a fallback evaluation of the root `.gitignore`
//!
//! The pruned paths and the git/fallback matches are combined into one
//! immutable [`IgnoredSet`]. Nothing is cached between calls.
//!
//! # Examples
//!
//! ```no_run
//! use treesift::resolver::{IgnoreResolver, ResolveOptions};
//!
//! let resolver = IgnoreResolver::new(ResolveOptions::default());
//! let resolution = resolver.resolve(".").unwrap();
//! for entry in resolution.kept() {
//!     println!("{}", entry.path);
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::adapters::git::{DEFAULT_PROGRAM, DEFAULT_TIMEOUT, GitCheckIgnore};
use crate::adapters::walk::{EagerPruner, PruneOutcome};
use crate::cancel::{Interrupt, Uninterrupted};
use crate::core::models::{IgnoredSet, PathEntry, ScanContext, ScanPhase, ScanWarning};
use crate::core::ports::{IgnoreCheck, OracleError};
use crate::core::services::{
    DEFAULT_BATCH_SIZE, DefaultIgnoreIndex, FallbackPatternMatcher, IgnoreOracle, OracleOutcome,
};
use crate::paths;

/// Errors that stop a resolution before it starts
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Root path does not exist
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// Path is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The root could not be made absolute
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// How the git oracle is run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleSettings {
    /// Query git at all
    pub enabled: bool,
    /// Executable name or path
    pub program: String,
    /// Paths per invocation
    pub batch_size: usize,
    /// Budget per invocation
    pub timeout: Duration,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: DEFAULT_PROGRAM.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Options owned by the calling layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Disable every ignore mechanism
    pub raw: bool,
    /// Extra exclude patterns (see [`DefaultIgnoreIndex::with_extra_excludes`])
    pub extra_excludes: Vec<String>,
    /// Oracle configuration
    pub oracle: OracleSettings,
}

/// Where the non-pruned verdicts came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// Raw mode: nothing ignored
    Raw,
    /// `git check-ignore`
    Oracle,
    /// Root `.gitignore` evaluated without git
    Fallback,
    /// Neither git nor an ignore file: default index only
    DefaultsOnly,
}

impl std::fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "raw (no ignore rules)"),
            Self::Oracle => write!(f, "git check-ignore"),
            Self::Fallback => write!(f, ".gitignore fallback"),
            Self::DefaultsOnly => write!(f, "default excludes only"),
        }
    }
}

/// Result of one resolution
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Final exclusion set
    pub ignored: IgnoredSet,
    /// Entries that survived eager pruning, in walk order
    pub candidates: Vec<PathEntry>,
    /// Source of the non-pruned verdicts
    pub source: VerdictSource,
    /// Candidate files matching a preserve pattern
    pub preserved: Vec<String>,
    /// Symbolic links seen during the walk
    pub symlinks: usize,
    /// Non-fatal problems
    pub warnings: Vec<ScanWarning>,
    /// Whether the scan was interrupted and the result is partial
    pub cancelled: bool,
}

impl Resolution {
    /// Candidates that are not ignored
    pub fn kept(&self) -> impl Iterator<Item = &PathEntry> {
        self.candidates.iter().filter(|c| !self.ignored.is_ignored(&c.path))
    }

    /// Whether a root-relative path is excluded
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignored.is_ignored(path)
    }
}

/// Orchestrates pruning, the git oracle and the fallback matcher
#[derive(Debug)]
pub struct IgnoreResolver {
    options: ResolveOptions,
    check: Box<dyn IgnoreCheck>,
}

impl IgnoreResolver {
    /// Create a resolver that queries git as configured
    #[must_use]
    pub fn new(options: ResolveOptions) -> Self {
        let check = GitCheckIgnore::new(options.oracle.program.clone(), options.oracle.timeout);
        Self::with_check(options, Box::new(check))
    }

    /// Create a resolver over a custom ignore check
    #[must_use]
    pub const fn with_check(options: ResolveOptions, check: Box<dyn IgnoreCheck>) -> Self {
        Self { options, check }
    }

    /// Resolve a tree without an interrupt signal
    pub fn resolve(&self, root: impl AsRef<Path>) -> Result<Resolution, ResolveError> {
        self.resolve_with(root, &Uninterrupted)
    }

    /// Resolve a tree, polling `cancel` between pruning steps and oracle batches
    ///
    /// Only a missing or non-directory root is an error; everything else is
    /// recorded as a warning on the returned resolution.
    pub fn resolve_with(
        &self,
        root: impl AsRef<Path>,
        cancel: &dyn Interrupt,
    ) -> Result<Resolution, ResolveError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(ResolveError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ResolveError::NotADirectory(root.to_path_buf()));
        }

        let ctx = ScanContext::new(
            std::path::absolute(root)?,
            self.options.raw,
            self.options.extra_excludes.clone(),
            cancel,
        );

        if ctx.raw() {
            debug!("raw mode: ignore resolution bypassed for {}", ctx.root().display());
            let index = DefaultIgnoreIndex::empty();
            let walk = EagerPruner::new(&index).prune(&ctx);
            let warnings = walk.warnings.clone();
            let cancelled = walk.cancelled;
            return Ok(finish(walk, Vec::<String>::new(), VerdictSource::Raw, warnings, cancelled));
        }

        let (index, mut warnings) =
            DefaultIgnoreIndex::builtin().with_extra_excludes(ctx.extra_excludes());
        let walk = EagerPruner::new(&index).prune(&ctx);
        warnings.extend(walk.warnings.iter().cloned());

        if walk.cancelled {
            return Ok(finish(walk, Vec::<String>::new(), VerdictSource::DefaultsOnly, warnings, true));
        }

        if self.options.oracle.enabled {
            let oracle = IgnoreOracle::new(self.check.as_ref(), self.options.oracle.batch_size);
            match oracle.query(&ctx, &walk.candidates, &walk.nested_roots()) {
                OracleOutcome::Completed(matched) => {
                    debug!("oracle reported {} ignored candidates", matched.len());
                    return Ok(finish(walk, matched, VerdictSource::Oracle, warnings, false));
                },
                OracleOutcome::Cancelled(matched) => {
                    info!("scan interrupted between git batches; keeping partial results");
                    warnings.push(ScanWarning::Cancelled {
                        phase: ScanPhase::Oracle,
                    });
                    return Ok(finish(walk, matched, VerdictSource::Oracle, warnings, true));
                },
                OracleOutcome::Unavailable { batch, error } => {
                    warn!(
                        "git ignore check unavailable ({error}); falling back to the root \
                         .gitignore, results may differ from git"
                    );
                    warnings.push(oracle_warning(batch, &error));
                },
            }
        } else {
            debug!("oracle disabled; using fallback matching");
        }

        let (matcher, found) = load_fallback(ctx.root(), &mut warnings);
        if !found {
            return Ok(finish(walk, Vec::<String>::new(), VerdictSource::DefaultsOnly, warnings, false));
        }
        let matched = matcher.evaluate(&walk.candidates);
        Ok(finish(walk, matched, VerdictSource::Fallback, warnings, false))
    }
}

/// Resolve a tree with the given options
pub fn resolve(root: impl AsRef<Path>, options: &ResolveOptions) -> Result<Resolution, ResolveError> {
    IgnoreResolver::new(options.clone()).resolve(root)
}

fn finish(
    walk: PruneOutcome,
    matched: impl IntoIterator<Item = String>,
    source: VerdictSource,
    warnings: Vec<ScanWarning>,
    cancelled: bool,
) -> Resolution {
    let ignored = IgnoredSet::from_parts(walk.pruned.into_iter().map(|p| p.path), matched);
    Resolution {
        ignored,
        candidates: walk.candidates,
        source,
        preserved: walk.preserved,
        symlinks: walk.symlinks,
        warnings,
        cancelled,
    }
}

fn oracle_warning(batch: Option<usize>, error: &OracleError) -> ScanWarning {
    match (batch, error) {
        (Some(batch), OracleError::Timeout { timeout }) => ScanWarning::OracleTimeout {
            batch,
            timeout_secs: timeout.as_secs(),
        },
        _ => ScanWarning::OracleUnavailable {
            reason: error.to_string(),
        },
    }
}

/// Read the root ignore file; `false` when there is none
fn load_fallback(root: &Path, warnings: &mut Vec<ScanWarning>) -> (FallbackPatternMatcher, bool) {
    let path = paths::gitignore(root);
    match fs::read(&path) {
        Ok(bytes) => {
            let (matcher, parse_warnings) =
                FallbackPatternMatcher::from_content(&String::from_utf8_lossy(&bytes));
            warnings.extend(parse_warnings);
            (matcher, true)
        },
        Err(err) if err.kind() == ErrorKind::NotFound => (FallbackPatternMatcher::default(), false),
        Err(err) => {
            warn!("cannot read {}: {err}", path.display());
            warnings.push(ScanWarning::PruneIo {
                path: paths::GITIGNORE.to_string(),
                message: err.to_string(),
            });
            (FallbackPatternMatcher::default(), false)
        },
    }
}
