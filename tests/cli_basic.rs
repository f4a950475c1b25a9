//! Integration tests for basic CLI behavior.
//!
//! Everything here runs offline: help output, version, URL checks and
//! argument/config errors that fail before any request is made.

#![allow(deprecated)] // cargo_bin deprecation; replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Helper: get a Command for the `dogan-live` binary.
fn dogan_live() -> Command {
    Command::cargo_bin("dogan-live").expect("binary 'dogan-live' should be built")
}

/// Helper: an empty config file so tests never read the user's config.
fn empty_config() -> tempfile::NamedTempFile {
    tempfile::NamedTempFile::new().expect("temp config")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    dogan_live()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: dogan-live"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("streams"))
        .stdout(predicate::str::contains("url"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn version_flag_shows_semver() {
    dogan_live()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^dogan-live \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    dogan_live()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: dogan-live"));
}

#[test]
fn invalid_subcommand_fails() {
    dogan_live()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn streams_help() {
    dogan_live()
        .args(["streams", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List the stream variants"))
        .stdout(predicate::str::contains("<URL>"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn url_help() {
    dogan_live()
        .args(["url", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Print the playlist URL"))
        .stdout(predicate::str::contains("--quality"))
        .stdout(predicate::str::contains("--manifest"));
}

// ─── check ───────────────────────────────────────────────────────────────────

#[test]
fn check_supported_url() {
    dogan_live()
        .args(["check", "https://www.cnnturk.com/canli-yayin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Supported (dogan)"));
}

#[test]
fn check_supported_url_mixed_case_host() {
    dogan_live()
        .args(["check", "HTTPS://WWW.TEVE2.COM.TR/canli-yayin"])
        .assert()
        .success();
}

#[test]
fn check_unsupported_url_fails() {
    dogan_live()
        .args(["check", "https://www.youtube.com/watch?v=abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported URL"));
}

// ─── Errors before any request ───────────────────────────────────────────────

#[test]
fn streams_unsupported_url_fails() {
    let config = empty_config();
    dogan_live()
        .arg("--config")
        .arg(config.path())
        .args(["streams", "https://example.com/live"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported URL"));
}

#[test]
fn url_invalid_quality_fails() {
    let config = empty_config();
    dogan_live()
        .arg("--config")
        .arg(config.path())
        .args(["url", "--quality", "hd", "https://www.kanald.com.tr/canli-yayin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quality: hd"));
}

#[test]
fn invalid_default_quality_in_config_fails() {
    let mut config = empty_config();
    writeln!(config, "default_quality = \"ultra\"").unwrap();

    dogan_live()
        .arg("--config")
        .arg(config.path())
        .args(["url", "https://www.kanald.com.tr/canli-yayin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quality: ultra"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    dogan_live()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .args(["streams", "https://www.kanald.com.tr/canli-yayin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}
