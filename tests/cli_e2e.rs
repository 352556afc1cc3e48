//! End-to-end CLI tests for the sitemapper binaries.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sitemapper() -> Command {
    let mut cmd = Command::cargo_bin("sitemapper").unwrap();
    // Keep the user's config file out of the test run
    cmd.env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .env_remove("RUST_LOG");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    sitemapper()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve sitemap"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    sitemapper()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitemapper"));
}

/// Test that a missing subcommand causes non-zero exit.
#[test]
fn test_binary_without_subcommand_fails() {
    sitemapper().assert().failure();
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    sitemapper()
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_resolve_local_file_prints_one_location_per_line() {
    let output = sitemapper()
        .args(["-q", "resolve", "tests/fixtures/sitemap.xml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 13);
    assert_eq!(stdout.lines().next(), Some("https://www.example.com/"));
}

#[test]
fn test_resolve_json_format() {
    sitemapper()
        .args(["-q", "resolve", "tests/fixtures/sitemap-plus-one.xml", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"loc\": \"https://www.example.com/landing/spring-sale\"",
        ));
}

#[test]
fn test_resolve_writes_xml_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("flat.xml");

    sitemapper()
        .args(["-q", "resolve", "tests/fixtures/sitemap.xml", "--format", "xml", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.matches("<url>").count(), 13);
}

#[test]
fn test_resolve_empty_file_fails_with_message() {
    sitemapper()
        .args(["-q", "resolve", "tests/fixtures/empty_sitemap.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "URL is not a sitemap or sitemapindex.: EOF",
        ));
}

#[test]
fn test_combine_missing_local_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("sitemap.xml");

    sitemapper()
        .args(["-q", "combine", "tests/fixtures/notfound.xml", "http://127.0.0.1:9/sitemap.xml"])
        .arg(&dest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("open tests/fixtures/notfound.xml"));
    assert!(!dest.exists());
}

#[test]
fn test_add_file_to_url_requires_three_arguments() {
    Command::cargo_bin("add-file-to-url")
        .unwrap()
        .args(["tests/fixtures/sitemap-plus-one.xml", "https://example.com/sitemap.xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_add_file_to_url_help() {
    Command::cargo_bin("add-file-to-url")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LOCAL_FILE"));
}
