//! Per-call scan context

use std::path::{Path, PathBuf};

use crate::cancel::Interrupt;

/// Everything one `resolve()` call needs to know about its scan
///
/// Built fresh for every call and dropped when the call returns. The
/// cancellation signal is borrowed: the scan polls it but never owns it.
pub struct ScanContext<'a> {
    root: PathBuf,
    raw: bool,
    extra_excludes: Vec<String>,
    cancel: &'a dyn Interrupt,
}

impl<'a> ScanContext<'a> {
    /// Create a context for an absolute root path
    #[must_use]
    pub fn new(
        root: PathBuf,
        raw: bool,
        extra_excludes: Vec<String>,
        cancel: &'a dyn Interrupt,
    ) -> Self {
        Self {
            root,
            raw,
            extra_excludes,
            cancel,
        }
    }

    /// Absolute scan root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether all ignore logic is bypassed
    #[must_use]
    pub const fn raw(&self) -> bool {
        self.raw
    }

    /// User-supplied exclude patterns
    #[must_use]
    pub fn extra_excludes(&self) -> &[String] {
        &self.extra_excludes
    }

    /// Poll the caller's interrupt signal
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_interrupted()
    }
}

impl std::fmt::Debug for ScanContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanContext")
            .field("root", &self.root)
            .field("raw", &self.raw)
            .field("extra_excludes", &self.extra_excludes)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
