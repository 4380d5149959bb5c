//! Git integration adapter
//!
//! Implements [`IgnoreCheck`] using `git check-ignore`.
//!
//! - [`process`] - Subprocess execution with a time budget
//! - [`quoting`] - Decoding C-style quoted paths in git output

pub mod process;
pub mod quoting;

use std::collections::HashSet;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use log::debug;

use crate::core::ports::{IgnoreCheck, OracleError};

pub use process::{Captured, run_with_timeout};

/// Default executable name
pub const DEFAULT_PROGRAM: &str = "git";

/// Default time budget per git invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `git check-ignore` based oracle
#[derive(Debug, Clone)]
pub struct GitCheckIgnore {
    /// Executable to run
    program: String,
    /// Budget for each invocation
    timeout: Duration,
}

impl GitCheckIgnore {
    /// Create an adapter for a git executable
    #[must_use]
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn git(&self, root: &Path) -> Command {
        let mut command = Command::new(&self.program);
        // Keep non-ASCII paths verbatim in the output
        command.current_dir(root).args(["-c", "core.quotePath=false"]);
        command
    }
}

impl Default for GitCheckIgnore {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_TIMEOUT)
    }
}

impl IgnoreCheck for GitCheckIgnore {
    fn probe(&self, root: &Path) -> Result<(), OracleError> {
        let mut command = self.git(root);
        command.args(["rev-parse", "--is-inside-work-tree"]);
        let captured = run_with_timeout(command, self.timeout)?;

        let answer = String::from_utf8_lossy(&captured.stdout);
        if captured.status.success() && answer.trim() == "true" {
            Ok(())
        } else {
            Err(OracleError::NotAWorkingCopy(root.display().to_string()))
        }
    }

    fn check(&self, root: &Path, paths: &[String]) -> Result<Vec<String>, OracleError> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        // check-ignore takes plain paths and rejects pathspec magic
        let mut command = self.git(root);
        command.args(["check-ignore", "--"]).args(paths);
        let captured = run_with_timeout(command, self.timeout)?;

        // 0: some paths ignored, 1: none ignored, anything else: failure
        match captured.status.code() {
            Some(0) => Ok(parse_check_ignore_output(&captured.stdout, paths)),
            Some(1) => Ok(Vec::new()),
            _ => Err(OracleError::UnexpectedStatus {
                status: captured.status.to_string(),
                stderr: String::from_utf8_lossy(&captured.stderr).trim().to_string(),
            }),
        }
    }
}

/// Map `git check-ignore` stdout back onto the paths that were asked about
#[must_use]
pub fn parse_check_ignore_output(stdout: &[u8], asked: &[String]) -> Vec<String> {
    let asked: HashSet<&str> = asked.iter().map(String::as_str).collect();
    let text = String::from_utf8_lossy(stdout);
    let mut hits = Vec::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if asked.contains(line) {
            hits.push(line.to_string());
            continue;
        }
        match quoting::unquote(line) {
            Some(path) if asked.contains(path.as_str()) => hits.push(path),
            _ => debug!("ignoring unexpected check-ignore line: {line}"),
        }
    }

    hits
}
