//! Ignore oracle port
//!
//! Defines the interface to the version-control system's own ignore check.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Why the version-control ignore check could not give an answer
#[derive(Debug, Error)]
pub enum OracleError {
    /// The executable could not be found on `PATH`
    #[error("executable not found: {0}")]
    ExecutableNotFound(String),

    /// The scan root is not inside a working copy
    #[error("not inside a git working copy: {0}")]
    NotAWorkingCopy(String),

    /// A call ran past its time budget and was killed
    #[error("timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// Budget that was exceeded
        timeout: Duration,
    },

    /// The tool exited with a status that carries no documented meaning
    #[error("unexpected {status}: {stderr}")]
    UnexpectedStatus {
        /// Exit status as reported by the OS (`exit status: 128`)
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// Spawning or talking to the process failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Version-control ignore check
///
/// Implementations answer "which of these root-relative paths does the VCS
/// ignore?" for one bounded batch at a time.
pub trait IgnoreCheck: std::fmt::Debug + Send + Sync {
    /// Verify the tool is runnable and `root` is inside a working copy
    ///
    /// Called once per resolution; the answer is never cached.
    fn probe(&self, root: &Path) -> Result<(), OracleError>;

    /// Return the subset of `paths` that is ignored
    ///
    /// An empty result is a valid answer ("nothing in this batch is
    /// ignored"), never a stand-in for a failure.
    fn check(&self, root: &Path, paths: &[String]) -> Result<Vec<String>, OracleError>;
}
