//! Domain models for treesift
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`PathEntry`] - A root-relative path seen during traversal
//! - [`IgnoreRule`] / [`RuleSet`] - Parsed `.gitignore` rules
//! - [`IgnoredSet`] - The final, immutable exclusion set
//! - [`ScanContext`] - Per-call root, mode and cancellation signal
//! - [`ScanWarning`] - Recoverable problems met during a scan

mod context;
mod entry;
mod ignored_set;
mod rule;
mod warning;

pub use context::ScanContext;
pub use entry::{EntryKind, PathEntry, ancestors, basename, normalize, to_slash_path};
pub use ignored_set::IgnoredSet;
pub use rule::{IgnoreRule, PATH_MATCH_OPTIONS, RuleParseError, RuleSet};
pub use warning::{ScanPhase, ScanWarning};
