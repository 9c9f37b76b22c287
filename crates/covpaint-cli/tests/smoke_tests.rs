//! Smoke tests for the covpaint CLI
//!
//! Each test builds a one-file Go module in a temporary directory with a
//! ready-made cover profile, so `go` itself is never invoked.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FOO_GO: &str = "package foo

func foo(n int) int {
\tif n > 10 {
\t\treturn n * 2
\t}
\ttotal := 0
\tfor i := 0; i < n; i++ {
\t\ttotal += i
\t}
\treturn total
}

func bar() string {
\treturn \"bar\"
}
";

const FOO_PROFILE: &str = "mode: count
example.com/foo/foo.go:3.21,4.12 1 5
example.com/foo/foo.go:4.12,6.3 1 0
example.com/foo/foo.go:7.2,8.25 3 5
example.com/foo/foo.go:8.25,10.3 1 40
example.com/foo/foo.go:11.2,11.14 1 5
example.com/foo/foo.go:14.19,16.2 1 3
";

/// Get a command for the covpaint binary
fn covpaint() -> Command {
    let mut cmd = Command::cargo_bin("covpaint").expect("covpaint binary should exist");
    cmd.env_remove("COVPAINT_PROFILE")
        .env_remove("COVPAINT_LOW_COLOR")
        .env_remove("COVPAINT_HIGH_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn module() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/foo\n\ngo 1.22\n").unwrap();
    fs::write(dir.path().join("foo.go"), FOO_GO).unwrap();
    fs::write(dir.path().join("coverage.out"), FOO_PROFILE).unwrap();
    dir
}

/// covpaint running in `dir` against its coverage.out, without colors
fn in_module(dir: &TempDir) -> Command {
    let mut cmd = covpaint();
    cmd.current_dir(dir.path())
        .args(["--no-tests", "--profile", "coverage.out", "--color", "never"]);
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    covpaint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    covpaint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--func"))
        .stdout(predicate::str::contains("--legend"))
        .stdout(predicate::str::contains("--no-tests"));
}

#[test]
fn test_bad_color_flag() {
    covpaint()
        .args(["--legend", "--high-color", "nope"])
        .assert()
        .failure();
}

// ============================================================================
// Legend
// ============================================================================

#[test]
fn test_legend_plain() {
    covpaint()
        .args(["--legend", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.0% test\n"))
        .stdout(predicate::str::ends_with("100% test\n"));
}

#[test]
fn test_legend_colored() {
    covpaint()
        .args(["--legend", "--color", "always"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[31mtest\x1b[0m"));
}

// ============================================================================
// Report mode
// ============================================================================

#[test]
fn test_report() {
    let dir = module();
    in_module(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# foo.go               87.5%"))
        .stdout(predicate::str::contains("foo.go:3:  foo 85.7%"))
        .stdout(predicate::str::contains("foo.go:14: bar 100.0%"))
        .stdout(predicate::str::contains("Total covered: 87.50%"));
}

#[test]
fn test_report_reads_default_profile() {
    let dir = module();
    covpaint()
        .current_dir(dir.path())
        .args(["--no-tests", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total covered: 87.50%"));
}

#[test]
fn test_missing_profile() {
    let dir = TempDir::new().unwrap();
    covpaint()
        .current_dir(dir.path())
        .args(["--no-tests", "--color", "never"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no cover profile"));
}

#[test]
fn test_unresolvable_source_is_error() {
    let dir = module();
    fs::remove_file(dir.path().join("foo.go")).unwrap();
    in_module(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("example.com/foo/foo.go"));
}

#[test]
fn test_stale_profile_is_error() {
    let dir = module();
    fs::write(dir.path().join("foo.go"), "package foo\n").unwrap();
    in_module(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// Function and file modes
// ============================================================================

#[test]
fn test_func_flag() {
    let dir = module();
    in_module(&dir)
        .args(["--func", "bar"])
        .assert()
        .success()
        .stdout("func bar() string {\n\treturn \"bar\"\n}\n");
}

#[test]
fn test_positional_function_name() {
    let dir = module();
    in_module(&dir)
        .arg("foo")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("func foo(n int) int {"));
}

#[test]
fn test_unknown_function() {
    let dir = module();
    in_module(&dir)
        .args(["--func", "nope"])
        .assert()
        .code(1)
        .stdout("could not find function nope\n");
}

#[test]
fn test_positional_go_file() {
    let dir = module();
    in_module(&dir)
        .arg("foo.go")
        .assert()
        .success()
        .stdout(format!("{FOO_GO}\n"));
}

#[test]
fn test_file_flag_without_match() {
    let dir = module();
    in_module(&dir)
        .args(["--file", "other.go"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("other.go"));
}

#[test]
fn test_colored_function_marks_uncovered_code() {
    let dir = module();
    covpaint()
        .current_dir(dir.path())
        .args(["--no-tests", "--color", "always", "--func", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[31m"));
}
