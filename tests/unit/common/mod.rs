//! Shared test fixtures and helpers
//!
//! Temporary directory trees for exercising the resolver.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treesift::cancel::Uninterrupted;
use treesift::resolver::{IgnoreResolver, OracleSettings, Resolution, ResolveOptions};

/// A throwaway directory tree
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Create a tree with the given files (parents are created)
    pub fn with_files(files: &[&str]) -> Self {
        let tree = Self::new();
        for file in files {
            tree.add_file(file, "");
        }
        tree
    }

    /// Create a typical project layout:
    /// ```text
    /// /
    /// ├── src/
    /// │   ├── main.rs
    /// │   └── lib.rs
    /// ├── node_modules/left-pad/index.js
    /// ├── target/debug/app
    /// ├── logs/server.log
    /// ├── .env
    /// └── README.md
    /// ```
    pub fn project() -> Self {
        Self::with_files(&[
            "src/main.rs",
            "src/lib.rs",
            "node_modules/left-pad/index.js",
            "target/debug/app",
            "logs/server.log",
            ".env",
            "README.md",
        ])
    }

    /// Get the root path of the tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file
    pub fn add_file(&self, path: &str, content: &str) {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Add an empty directory
    pub fn add_dir(&self, path: &str) {
        fs::create_dir_all(self.dir.path().join(path)).unwrap();
    }

    /// Write the root `.gitignore`
    pub fn gitignore(&self, content: &str) {
        self.add_file(".gitignore", content);
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Options that never consult git, so results do not depend on the host
pub fn offline() -> ResolveOptions {
    ResolveOptions {
        oracle: OracleSettings {
            enabled: false,
            ..OracleSettings::default()
        },
        ..ResolveOptions::default()
    }
}

/// Resolve a tree with the given options
pub fn resolve(tree: &TestTree, options: ResolveOptions) -> Resolution {
    IgnoreResolver::new(options).resolve_with(tree.path(), &Uninterrupted).unwrap()
}

/// Candidate paths of a resolution
pub fn candidate_paths(resolution: &Resolution) -> Vec<&str> {
    resolution.candidates.iter().map(|c| c.path.as_str()).collect()
}
