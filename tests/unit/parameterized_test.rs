//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use test_case::test_case;
use treesift::core::models::{IgnoreRule, RuleParseError, RuleSet};
use treesift::core::services::{DefaultIgnoreIndex, FallbackPatternMatcher, FileVerdict, split_patterns};

// =============================================================================
// Rule parsing
// =============================================================================

#[test_case("*.log", false, false, false ; "plain glob")]
#[test_case("!keep.log", true, false, false ; "negation")]
#[test_case("/dist", false, true, false ; "leading slash anchors")]
#[test_case("docs/gen", false, true, false ; "inner slash anchors")]
#[test_case("cache/", false, false, true ; "trailing slash is dir only")]
#[test_case("/out/", false, true, true ; "anchored dir")]
#[test_case("\\!bang", false, false, false ; "escaped bang is literal")]
fn test_rule_flags(line: &str, negated: bool, anchored: bool, directory_only: bool) {
    let rule = IgnoreRule::parse(line, 1).unwrap().unwrap();
    assert_eq!(rule.negated(), negated);
    assert_eq!(rule.anchored(), anchored);
    assert_eq!(rule.directory_only(), directory_only);
}

#[test_case("" ; "empty")]
#[test_case("   " ; "blank")]
#[test_case("# comment" ; "comment")]
fn test_lines_without_rules(line: &str) {
    assert!(IgnoreRule::parse(line, 1).unwrap().is_none());
}

#[test_case("!" ; "lone bang")]
#[test_case("/" ; "lone slash")]
fn test_empty_rules_rejected(line: &str) {
    assert_eq!(IgnoreRule::parse(line, 1), Err(RuleParseError::Empty));
}

// =============================================================================
// Fallback matching
// =============================================================================

const GITIGNORE: &str = "node_modules/\n*.log\n!important.log\n/build\ndocs/*.html\n**/tmp/**\n";

#[test_case("node_modules/x.js", false, true ; "dir rule covers contents")]
#[test_case("pkg/node_modules", true, true ; "unanchored dir rule at depth")]
#[test_case("node_modules", false, false ; "dir rule skips files")]
#[test_case("a.log", false, true ; "glob matches at root")]
#[test_case("deep/er/b.log", false, true ; "glob matches at depth")]
#[test_case("important.log", false, false ; "negation re-includes")]
#[test_case("sub/important.log", false, false ; "negation re-includes at depth")]
#[test_case("build", true, true ; "anchored matches at root")]
#[test_case("build/out.bin", false, true ; "anchored covers contents")]
#[test_case("src/build", true, false ; "anchored skips nested")]
#[test_case("docs/index.html", false, true ; "inner slash pattern")]
#[test_case("docs/api/index.html", false, false ; "star does not cross slash")]
#[test_case("a/tmp/b/c.txt", false, true ; "double star spans dirs")]
#[test_case("src/main.rs", false, false ; "unmatched path")]
fn test_fallback_matching(path: &str, is_dir: bool, expected: bool) {
    let (matcher, warnings) = FallbackPatternMatcher::from_content(GITIGNORE);
    assert!(warnings.is_empty());
    assert_eq!(matcher.is_ignored(path, is_dir), expected);
}

#[test_case("*.log\n!important.log\n", "important.log", false ; "later negation wins")]
#[test_case("!important.log\n*.log\n", "important.log", true ; "later exclude wins")]
#[test_case("*.log\n!*.log\n*.log\n", "x.log", true ; "three way flip")]
fn test_last_rule_wins(content: &str, path: &str, expected: bool) {
    let (rules, _) = RuleSet::parse(content);
    assert_eq!(rules.is_ignored(path, false), expected);
}

// =============================================================================
// Default index
// =============================================================================

#[test_case("node_modules", true ; "node modules")]
#[test_case("a/b/target", true ; "nested target")]
#[test_case("foo.egg-info", true ; "egg info glob")]
#[test_case(".venv", true ; "virtualenv")]
#[test_case("targets", false ; "near miss")]
#[test_case("src", false ; "source dir")]
fn test_default_dirs(path: &str, expected: bool) {
    assert_eq!(DefaultIgnoreIndex::builtin().excludes_dir(path), expected);
}

#[test_case("cache.tmp", FileVerdict::Excluded ; "temp file")]
#[test_case("lib/native.so", FileVerdict::Excluded ; "shared object")]
#[test_case(".DS_Store", FileVerdict::Excluded ; "finder metadata")]
#[test_case(".env", FileVerdict::Preserved ; "env file")]
#[test_case("deploy/.env.staging", FileVerdict::Preserved ; "env variant")]
#[test_case("main.rs", FileVerdict::Keep ; "source file")]
fn test_default_files(path: &str, expected: FileVerdict) {
    assert_eq!(DefaultIgnoreIndex::builtin().classify_file(path), expected);
}

#[test_case("a,b", &["a", "b"] ; "simple")]
#[test_case(" *.txt , temp/ ", &["*.txt", "temp/"] ; "whitespace trimmed")]
#[test_case(",,x,", &["x"] ; "empty items dropped")]
#[test_case("", &[] ; "empty list")]
fn test_split_patterns(input: &str, expected: &[&str]) {
    assert_eq!(split_patterns(input), expected);
}
