//! Configuration management
//!
//! Settings come from two optional TOML files, applied in order:
//!
//! 1. `~/.treesift/config.toml` (user defaults)
//! 2. `<root>/.treesift.toml` (project overrides)
//!
//! Command-line flags are applied last by the binary.
//!
//! ```toml
//! [scan]
//! exclude = ["*.txt", "temp/"]
//! raw = false
//!
//! [oracle]
//! enabled = true
//! program = "git"
//! batch_size = 200
//! timeout_secs = 10
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::git::{DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
use crate::core::services::DEFAULT_BATCH_SIZE;
use crate::paths;
use crate::resolver::{OracleSettings, ResolveOptions};

/// Errors reading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Parser error
        source: toml::de::Error,
    },
}

/// Effective configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Scan behavior
    #[serde(default)]
    pub scan: ScanConfig,
    /// Git oracle tuning
    #[serde(default)]
    pub oracle: OracleConfig,
}

/// `[scan]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Extra exclude patterns
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Disable all ignore logic
    #[serde(default)]
    pub raw: bool,
}

/// `[oracle]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Query `git check-ignore`
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Git executable
    #[serde(default = "default_program")]
    pub program: String,
    /// Paths per invocation
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Seconds allowed per invocation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_enabled() -> bool {
    true
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

const fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            program: default_program(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// One config file as written: every key optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigLayer {
    /// `[scan]` overrides
    #[serde(default)]
    pub scan: ScanLayer,
    /// `[oracle]` overrides
    #[serde(default)]
    pub oracle: OracleLayer,
}

/// `[scan]` keys present in one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScanLayer {
    /// Replaces the inherited exclude list
    pub exclude: Option<Vec<String>>,
    /// Raw mode
    pub raw: Option<bool>,
}

/// `[oracle]` keys present in one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OracleLayer {
    /// Query git
    pub enabled: Option<bool>,
    /// Git executable
    pub program: Option<String>,
    /// Paths per invocation
    pub batch_size: Option<usize>,
    /// Seconds per invocation
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load global then project configuration for a scan root
    ///
    /// Unreadable or malformed files are logged and skipped.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        Self::load_layered(&[paths::global_config(), paths::project_config(root)])
    }

    /// Apply config files in order; later files win
    #[must_use]
    pub fn load_layered(files: &[PathBuf]) -> Self {
        let mut config = Self::default();
        for path in files {
            match load_from(path) {
                Ok(Some(layer)) => {
                    debug!("applying config {}", path.display());
                    config.apply(layer);
                },
                Ok(None) => {},
                Err(err) => warn!("{err}; ignoring this file"),
            }
        }
        config
    }

    /// Overlay the keys a layer sets
    pub fn apply(&mut self, layer: ConfigLayer) {
        let ConfigLayer { scan, oracle } = layer;
        if let Some(exclude) = scan.exclude {
            self.scan.exclude = exclude;
        }
        if let Some(raw) = scan.raw {
            self.scan.raw = raw;
        }
        if let Some(enabled) = oracle.enabled {
            self.oracle.enabled = enabled;
        }
        if let Some(program) = oracle.program {
            self.oracle.program = program;
        }
        if let Some(batch_size) = oracle.batch_size {
            self.oracle.batch_size = batch_size;
        }
        if let Some(timeout_secs) = oracle.timeout_secs {
            self.oracle.timeout_secs = timeout_secs;
        }
    }

    /// Options for the resolver
    #[must_use]
    pub fn to_resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            raw: self.scan.raw,
            extra_excludes: self.scan.exclude.clone(),
            oracle: OracleSettings {
                enabled: self.oracle.enabled,
                program: self.oracle.program.clone(),
                batch_size: self.oracle.batch_size,
                timeout: Duration::from_secs(self.oracle.timeout_secs),
            },
        }
    }
}

/// Read one config file; `Ok(None)` when it does not exist
pub fn load_from(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        },
    };
    toml::from_str(&content).map(Some).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
