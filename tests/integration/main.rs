//! Integration tests for the treesift CLI
//!
//! These tests run the real binary against temporary trees. Every command
//! points `HOME` at a scratch directory so a user-level config cannot leak in.

#[path = "../common/mod.rs"]
mod common;


use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create a treesift command with an isolated home
fn treesift(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("treesift"));
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Helper to lay out a small project
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    for file in [
        "src/main.rs",
        "src/util/mod.rs",
        "node_modules/dep/index.js",
        "web/node_modules/dep/index.js",
        "target/debug/app",
        "notes.txt",
        "README.md",
        ".env",
    ] {
        let path = temp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }
    temp
}

fn json_report(home: &Path, args: &[&str]) -> Value {
    let output = treesift(home).args(args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    treesift(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-oracle"))
        .stdout(predicate::str::contains("--exclude"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    treesift(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_root_fails() {
    let home = TempDir::new().unwrap();
    treesift(home.path())
        .arg("/definitely/not/a/real/dir")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("root path does not exist"));
}

#[test]
fn test_file_root_fails() {
    let home = TempDir::new().unwrap();
    let tree = project();
    treesift(home.path())
        .arg(tree.path().join("README.md"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_human_summary() {
    let home = TempDir::new().unwrap();
    let tree = project();
    treesift(home.path())
        .arg(tree.path())
        .arg("--no-oracle")
        .assert()
        .success()
        .stdout(predicate::str::contains("default excludes only"))
        .stdout(predicate::str::contains("node_modules (x2)"))
        .stdout(predicate::str::contains("target"))
        .stdout(predicate::str::contains(".env"));
}

#[test]
fn test_json_summary() {
    let home = TempDir::new().unwrap();
    let tree = project();
    let root = tree.path().to_str().unwrap();
    let report = json_report(home.path(), &[root, "--no-oracle", "--json"]);

    assert_eq!(report["source"], "defaults_only");
    assert_eq!(report["pruned"]["node_modules"], 2);
    assert_eq!(report["pruned"]["target"], 1);
    assert_eq!(report["cancelled"], false);
    assert_eq!(report["preserved"][0], ".env");
    assert!(report.get("listing").is_none());
}

#[test]
fn test_list_with_max_depth() {
    let home = TempDir::new().unwrap();
    let tree = project();
    let root = tree.path().to_str().unwrap();
    let report = json_report(home.path(), &[root, "--no-oracle", "--json", "--list", "--max-depth", "1"]);

    let listed: Vec<&str> = report["listing"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec![".env", "README.md", "notes.txt", "src", "web"]);
}

#[test]
fn test_list_human() {
    let home = TempDir::new().unwrap();
    let tree = project();
    treesift(home.path())
        .arg(tree.path())
        .args(["--no-oracle", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/util/mod.rs"))
        .stdout(predicate::str::contains("src/util/\n"))
        .stdout(predicate::str::contains("dep/index.js").not());
}

#[test]
fn test_exclude_flag() {
    let home = TempDir::new().unwrap();
    let tree = project();
    let root = tree.path().to_str().unwrap();
    let report = json_report(home.path(), &[root, "--no-oracle", "--json", "--exclude", "*.txt,util/"]);

    assert_eq!(report["pruned"]["notes.txt"], 1);
    assert_eq!(report["pruned"]["util"], 1);
}

#[test]
fn test_raw_flag() {
    let home = TempDir::new().unwrap();
    let tree = project();
    let root = tree.path().to_str().unwrap();
    let report = json_report(home.path(), &[root, "--raw", "--json", "--list"]);

    assert_eq!(report["source"], "raw");
    assert_eq!(report["ignored"], 0);
    let listed: Vec<&str> = report["listing"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert!(listed.contains(&"node_modules"));
    assert!(listed.contains(&"src/main.rs"));
    assert_eq!(report["candidates"], listed.len());
}

#[test]
fn test_gitignore_fallback() {
    let home = TempDir::new().unwrap();
    let tree = project();
    fs::write(tree.path().join(".gitignore"), "*.md\n!node_modules/\n").unwrap();
    let root = tree.path().to_str().unwrap();
    let report = json_report(home.path(), &[root, "--no-oracle", "--json", "--list"]);

    assert_eq!(report["source"], "fallback");
    let listed: Vec<&str> = report["listing"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert!(!listed.contains(&"README.md"));
    // Pruning wins over the negation
    assert!(!listed.iter().any(|p| p.starts_with("node_modules")));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_project_config() {
    let home = TempDir::new().unwrap();
    let tree = project();
    fs::write(
        tree.path().join(".treesift.toml"),
        "[scan]\nexclude = [\"*.md\"]\n\n[oracle]\nenabled = false\n",
    )
    .unwrap();
    let root = tree.path().to_str().unwrap();
    let report = json_report(home.path(), &[root, "--json"]);

    assert_eq!(report["source"], "defaults_only");
    assert_eq!(report["pruned"]["README.md"], 1);
}

#[test]
fn test_global_config_overridden_by_project() {
    let home = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join(".treesift")).unwrap();
    fs::write(
        home.path().join(".treesift/config.toml"),
        "[scan]\nraw = true\n\n[oracle]\nenabled = false\n",
    )
    .unwrap();
    let tree = project();
    let root = tree.path().to_str().unwrap();

    let report = json_report(home.path(), &[root, "--json"]);
    assert_eq!(report["source"], "raw");

    fs::write(tree.path().join(".treesift.toml"), "[scan]\nraw = false\n").unwrap();
    let report = json_report(home.path(), &[root, "--json"]);
    assert_eq!(report["source"], "defaults_only");
}

#[test]
fn test_malformed_config_is_not_fatal() {
    let home = TempDir::new().unwrap();
    let tree = project();
    fs::write(tree.path().join(".treesift.toml"), "[scan\nexclude = 3\n").unwrap();

    treesift(home.path())
        .arg(tree.path())
        .args(["--no-oracle", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid config"));
}
