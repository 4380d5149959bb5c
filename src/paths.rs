//! Centralized path definitions for treesift
//!
//! ## Layout
//!
//! ```text
//! scan-root/
//! ├── .gitignore          # Root ignore file read by the fallback matcher
//! └── .treesift.toml      # Optional project configuration
//!
//! ~/.treesift/
//! └── config.toml         # Optional user-level defaults
//! ```

use std::path::{Path, PathBuf};

/// Root ignore file consulted when git is unavailable
pub const GITIGNORE: &str = ".gitignore";

/// Project configuration filename
pub const PROJECT_CONFIG: &str = ".treesift.toml";

/// Global config directory name (under the home directory)
const GLOBAL_DIR: &str = ".treesift";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Path to the root ignore file of a scan root
#[must_use]
pub fn gitignore(root: &Path) -> PathBuf {
    root.join(GITIGNORE)
}

/// Path to `.treesift.toml` in a scan root
#[must_use]
pub fn project_config(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG)
}

/// Get the global config directory.
///
/// Returns `~/.treesift/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.treesift/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
