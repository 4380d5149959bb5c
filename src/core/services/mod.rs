//! Ignore-resolution services
//!
//! Pure logic that operates on domain models. The only outside contact is
//! through the [`IgnoreCheck`](crate::core::ports::IgnoreCheck) port.
//!
//! - [`default_index`] - Always-excluded / always-preserved names
//! - [`matcher`] - `.gitignore` fallback evaluation
//! - [`oracle`] - Batched queries against the VCS ignore check

pub mod default_index;
pub mod matcher;
pub mod oracle;

pub use default_index::{DefaultIgnoreIndex, FileVerdict, split_patterns};
pub use matcher::FallbackPatternMatcher;
pub use oracle::{DEFAULT_BATCH_SIZE, IgnoreOracle, OracleOutcome};
