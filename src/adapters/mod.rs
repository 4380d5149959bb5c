//! Adapter implementations that touch the outside world
//!
//! - `git/` - `git check-ignore` as an [`IgnoreCheck`](crate::core::ports::IgnoreCheck)
//! - `walk/` - Filesystem traversal with eager pruning

pub mod git;
pub mod walk;

pub use git::GitCheckIgnore;
pub use walk::{EagerPruner, PruneOutcome, PruneReason, PrunedEntry};
