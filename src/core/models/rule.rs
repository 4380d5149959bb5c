//! Ignore-file rules
//!
//! A [`RuleSet`] is the parsed form of a root-level `.gitignore`:
//! - Blank lines and `#` comments are skipped
//! - `!pattern` negates (re-includes) a path an earlier rule excluded
//! - `pattern/` only matches directories
//! - `/pattern` (or any pattern with an inner `/`) is anchored to the root
//! - `*` and `?` stay inside one path segment, `**` crosses segments
//!
//! Escapes and nested ignore files are not supported.
//!
//! # Examples
//!
//! ```
//! use treesift::core::models::RuleSet;
//!
//! let (rules, warnings) = RuleSet::parse("*.log\n!important.log\n");
//! assert!(warnings.is_empty());
//! assert!(rules.is_ignored("build/app.log", false));
//! assert!(!rules.is_ignored("important.log", false));
//! ```

use glob::{MatchOptions, Pattern};
use thiserror::Error;

use super::entry::{ancestors, basename};
use super::warning::ScanWarning;

/// Options shared by every ignore pattern: `*` never crosses a `/`
pub const PATH_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Errors that can occur when parsing a single rule
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleParseError {
    /// Nothing left after stripping `!`, `/` markers
    #[error("pattern is empty")]
    Empty,

    /// Invalid wildcard syntax
    #[error("invalid pattern: {0}")]
    InvalidGlob(String),
}

/// A single parsed ignore rule
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// Pattern body, without `!`, leading `/` or trailing `/`
    pattern: String,
    /// Re-includes instead of excluding
    negated: bool,
    /// Matched against the full root-relative path
    anchored: bool,
    /// Only matches directories
    directory_only: bool,
    /// Line number in the ignore file; later lines take precedence
    source_order: usize,
    /// Compiled matcher
    glob: Pattern,
}

impl PartialEq for IgnoreRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.negated == other.negated
            && self.anchored == other.anchored
            && self.directory_only == other.directory_only
            && self.source_order == other.source_order
    }
}

impl Eq for IgnoreRule {}

impl IgnoreRule {
    /// Parse one line of an ignore file
    ///
    /// Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str, source_order: usize) -> Result<Option<Self>, RuleParseError> {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (negated, body) = line.strip_prefix('!').map_or((false, line), |rest| (true, rest));
        let (directory_only, body) =
            body.strip_suffix('/').map_or((false, body), |rest| (true, rest));
        let (rooted, body) = body.strip_prefix('/').map_or((false, body), |rest| (true, rest));

        if body.is_empty() {
            return Err(RuleParseError::Empty);
        }

        // A separator in the middle ties the pattern to the root, as git does
        let anchored = rooted || body.contains('/');
        let glob = Pattern::new(body).map_err(|e| RuleParseError::InvalidGlob(e.to_string()))?;

        Ok(Some(Self {
            pattern: body.to_string(),
            negated,
            anchored,
            directory_only,
            source_order,
            glob,
        }))
    }

    /// Pattern body without markers
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether this rule re-includes paths
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }

    /// Whether this rule is anchored to the root
    #[must_use]
    pub const fn anchored(&self) -> bool {
        self.anchored
    }

    /// Whether this rule only applies to directories
    #[must_use]
    pub const fn directory_only(&self) -> bool {
        self.directory_only
    }

    /// Declaration order (line number)
    #[must_use]
    pub const fn source_order(&self) -> usize {
        self.source_order
    }

    /// Check if the rule matches a path or any directory on the way to it
    #[must_use]
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        self.matches_entry(path, is_dir) || ancestors(path).any(|dir| self.matches_entry(dir, true))
    }

    fn matches_entry(&self, path: &str, is_dir: bool) -> bool {
        if self.directory_only && !is_dir {
            return false;
        }
        let subject = if self.anchored { path } else { basename(path) };
        self.glob.matches_with(subject, PATH_MATCH_OPTIONS)
    }
}

impl std::fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        if self.anchored && !self.pattern.contains('/') {
            write!(f, "/")?;
        }
        write!(f, "{}", self.pattern)?;
        if self.directory_only {
            write!(f, "/")?;
        }
        Ok(())
    }
}

/// Ordered ignore rules from a single file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<IgnoreRule>,
}

impl RuleSet {
    /// Origin label used in warnings for the root ignore file
    pub const ORIGIN: &'static str = ".gitignore";

    /// Parse ignore-file content, skipping (and reporting) malformed lines
    #[must_use]
    pub fn parse(content: &str) -> (Self, Vec<ScanWarning>) {
        let mut rules = Vec::new();
        let mut warnings = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            match IgnoreRule::parse(line, line_no) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => {},
                Err(err) => warnings.push(ScanWarning::PatternParse {
                    origin: Self::ORIGIN.to_string(),
                    line: line_no,
                    pattern: line.trim_end().to_string(),
                    message: err.to_string(),
                }),
            }
        }

        (Self { rules }, warnings)
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule that decides a path: the last one matching it
    ///
    /// Every rule is visited, left to right; a later match replaces an
    /// earlier one.
    #[must_use]
    pub fn deciding_rule(&self, path: &str, is_dir: bool) -> Option<&IgnoreRule> {
        self.rules
            .iter()
            .fold(None, |verdict, rule| if rule.matches(path, is_dir) { Some(rule) } else { verdict })
    }

    /// Final verdict for a path; no matching rule means not ignored
    #[must_use]
    pub fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        self.deciding_rule(path, is_dir).is_some_and(|rule| !rule.negated())
    }
}
