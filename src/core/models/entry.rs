//! Path entries produced while walking a scan root
//!
//! Every path handled by treesift is relative to the scan root and uses `/`
//! as its separator, whatever the host platform uses.

use std::path::Path;

use serde::Serialize;

/// Kind of filesystem entry seen during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory (descended into unless pruned)
    Directory,
    /// Symbolic link (recorded, never followed)
    Symlink,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Symlink => write!(f, "symlink"),
        }
    }
}

/// A path discovered during traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    /// Root-relative, `/`-separated path
    pub path: String,
    /// What the entry is on disk
    pub kind: EntryKind,
    /// Number of path components (top-level entries have depth 1)
    pub depth: usize,
}

impl PathEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(path: impl Into<String>, kind: EntryKind, depth: usize) -> Self {
        Self {
            path: path.into(),
            kind,
            depth,
        }
    }

    /// Whether the entry is a real directory (symlinks to directories are not)
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Last component of the path
    #[must_use]
    pub fn file_name(&self) -> &str {
        basename(&self.path)
    }
}

/// Convert a relative [`Path`] into the `/`-separated form used throughout
#[must_use]
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a caller-supplied relative path (`./a/b/`, `a\b`) to `a/b`
#[must_use]
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut path = path.as_str();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.trim_matches('/').to_string()
}

/// Last component of a `/`-separated path
#[must_use]
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Proper ancestors of a `/`-separated path, outermost first
///
/// `a/b/c` yields `a` then `a/b`.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(idx, _)| &path[..idx])
}
