//! Non-fatal conditions recorded during a scan
//!
//! None of these stop a scan. They are collected on the resolution so the
//! caller can decide how loudly to report them.

use serde::Serialize;

/// Phase of a scan that observed a cancellation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanPhase {
    /// Walking the tree and pruning default-excluded directories
    Pruning,
    /// Querying `git check-ignore` in batches
    Oracle,
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pruning => write!(f, "pruning"),
            Self::Oracle => write!(f, "oracle"),
        }
    }
}

/// A recoverable problem met while resolving ignores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// A directory could not be read; its subtree was pruned
    PruneIo {
        /// Root-relative path of the unreadable entry
        path: String,
        /// Underlying I/O error
        message: String,
    },

    /// The git oracle could not be used; fallback matching took over
    OracleUnavailable {
        /// Why the oracle was unusable
        reason: String,
    },

    /// A `git check-ignore` batch ran past its time budget
    OracleTimeout {
        /// Zero-based index of the batch that timed out
        batch: usize,
        /// Budget that was exceeded
        timeout_secs: u64,
    },

    /// An ignore pattern could not be compiled and was skipped
    PatternParse {
        /// Where the pattern came from (`.gitignore`, `--exclude`)
        origin: String,
        /// 1-based line (or list position) of the pattern
        line: usize,
        /// The offending pattern
        pattern: String,
        /// Parser message
        message: String,
    },

    /// The scan was interrupted; results are partial
    Cancelled {
        /// Phase that observed the interrupt
        phase: ScanPhase,
    },
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PruneIo { path, message } => {
                write!(f, "could not read {path}: {message} (subtree skipped)")
            },
            Self::OracleUnavailable { reason } => {
                write!(f, "git ignore check unavailable: {reason}")
            },
            Self::OracleTimeout {
                batch,
                timeout_secs,
            } => write!(f, "git check-ignore batch {batch} exceeded {timeout_secs}s"),
            Self::PatternParse {
                origin,
                line,
                pattern,
                message,
            } => write!(f, "{origin}:{line}: skipped pattern {pattern:?}: {message}"),
            Self::Cancelled { phase } => write!(f, "scan interrupted during {phase}"),
        }
    }
}
