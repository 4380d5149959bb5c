//! Always-excluded and always-preserved names
//!
//! Patterns are matched against an entry's basename unless they contain a
//! `/`, in which case they are matched against the root-relative path.
//! Preserve patterns only apply to files and win over any exclude.

use glob::{MatchOptions, Pattern};

use crate::core::models::{PATH_MATCH_OPTIONS, ScanWarning, basename};

/// Directories never descended into
pub const EXCLUDE_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDEs
    ".idea",
    ".vscode",
    // Python
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    "venv",
    ".venv",
    "env",
    ".env",
    ".tox",
    ".nox",
    "*.egg-info",
    // Node / web
    "node_modules",
    "bower_components",
    ".next",
    ".nuxt",
    ".output",
    ".cache",
    // Build output
    "dist",
    "build",
    "target",
    "bin",
    "obj",
    "out",
    ".parcel-cache",
    ".turbo",
];

/// Files never reported as candidates (unless preserved)
///
/// No `*.log` here: a root `!important.log` negation must be able to keep one.
/// `.git` is also a file in submodules and linked worktrees.
pub const EXCLUDE_FILES: &[&str] = &[
    ".git",
    "*.tmp",
    "*.temp",
    "*.bak",
    "*.swp",
    "*.pyc",
    "*.pyo",
    "*.class",
    "*.dll",
    "*.exe",
    "*.o",
    "*.so",
    "*.dylib",
    ".DS_Store",
    "Thumbs.db",
];

/// Environment files kept even when an exclude matches them
pub const PRESERVE_FILES: &[&str] = &[".env", ".env.*"];

/// Origin label used in warnings for user-supplied excludes
const EXTRA_ORIGIN: &str = "--exclude";

/// Basename matching: a `*` may match anything, there is no separator to cross
const NAME_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// What the index decides for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileVerdict {
    /// No pattern applies
    Keep,
    /// Kept because a preserve pattern matched
    Preserved,
    /// Excluded by name
    Excluded,
}

/// One compiled name pattern
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    glob: Option<Pattern>,
}

impl NamePattern {
    /// Compile a pattern; literal comparison still works when the glob is invalid
    pub fn new(raw: &str) -> Result<Self, glob::PatternError> {
        Ok(Self {
            raw: raw.to_string(),
            glob: Some(Pattern::new(raw)?),
        })
    }

    /// A pattern compared by exact name only
    #[must_use]
    pub fn literal(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            glob: None,
        }
    }

    /// Check a root-relative path against the pattern
    #[must_use]
    pub fn matches(&self, rel_path: &str) -> bool {
        let (subject, options) = if self.raw.contains('/') {
            (rel_path, PATH_MATCH_OPTIONS)
        } else {
            (basename(rel_path), NAME_MATCH_OPTIONS)
        };
        subject == self.raw || self.glob.as_ref().is_some_and(|g| g.matches_with(subject, options))
    }
}

/// Name-based exclusion table consulted before descending into a directory
#[derive(Debug, Clone, Default)]
pub struct DefaultIgnoreIndex {
    dir_excludes: Vec<NamePattern>,
    file_excludes: Vec<NamePattern>,
    preserves: Vec<NamePattern>,
}

impl DefaultIgnoreIndex {
    /// The built-in tables
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            dir_excludes: compile_static(EXCLUDE_DIRS),
            file_excludes: compile_static(EXCLUDE_FILES),
            preserves: compile_static(PRESERVE_FILES),
        }
    }

    /// An index with no patterns at all
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add user-supplied excludes
    ///
    /// `name/` excludes directories only; anything else excludes both files
    /// and directories. Invalid globs fall back to exact-name comparison and
    /// are reported.
    #[must_use]
    pub fn with_extra_excludes<S: AsRef<str>>(mut self, patterns: &[S]) -> (Self, Vec<ScanWarning>) {
        let mut warnings = Vec::new();

        for (idx, raw) in patterns.iter().enumerate() {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let (dir_only, body) = raw.strip_suffix('/').map_or((false, raw), |b| (true, b));
            let body = body.strip_prefix('/').unwrap_or(body);
            if body.is_empty() {
                continue;
            }

            let pattern = NamePattern::new(body).unwrap_or_else(|err| {
                warnings.push(ScanWarning::PatternParse {
                    origin: EXTRA_ORIGIN.to_string(),
                    line: idx + 1,
                    pattern: raw.to_string(),
                    message: err.to_string(),
                });
                NamePattern::literal(body)
            });

            if !dir_only {
                self.file_excludes.push(pattern.clone());
            }
            self.dir_excludes.push(pattern);
        }

        (self, warnings)
    }

    /// Whether a directory should be pruned without being entered
    #[must_use]
    pub fn excludes_dir(&self, rel_path: &str) -> bool {
        self.dir_excludes.iter().any(|p| p.matches(rel_path))
    }

    /// Whether a file name is always kept
    #[must_use]
    pub fn preserves(&self, rel_path: &str) -> bool {
        self.preserves.iter().any(|p| p.matches(rel_path))
    }

    /// Decide a file: preserve wins over exclude
    #[must_use]
    pub fn classify_file(&self, rel_path: &str) -> FileVerdict {
        if self.preserves(rel_path) {
            FileVerdict::Preserved
        } else if self.file_excludes.iter().any(|p| p.matches(rel_path)) {
            FileVerdict::Excluded
        } else {
            FileVerdict::Keep
        }
    }
}

fn compile_static(patterns: &[&str]) -> Vec<NamePattern> {
    patterns
        .iter()
        .map(|raw| NamePattern::new(raw).unwrap_or_else(|_| NamePattern::literal(raw)))
        .collect()
}

/// Split a comma-separated exclude list (`"*.txt, temp/"`)
#[must_use]
pub fn split_patterns(list: &str) -> Vec<String> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
