//! CLI integration tests for the relay binary.
//!
//! These tests cover help output and startup validation only; none of them
//! leave a server running.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the relay binary with no Reddit env vars leaking in.
fn relay() -> Command {
    let mut cmd = Command::cargo_bin("reddit-relay").unwrap();
    cmd.env_remove("REDDIT_CLIENT_ID")
        .env_remove("REDDIT_CLIENT_SECRET")
        .env_remove("REDDIT_REDIRECT_URI")
        .env_remove("RELAY_STATIC_DIR");
    cmd
}

#[test]
fn test_help_displays() {
    relay()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reddit-relay"))
        .stdout(predicate::str::contains("--client-id"))
        .stdout(predicate::str::contains("--client-secret"))
        .stdout(predicate::str::contains("--cors-origin"));
}

#[test]
fn test_help_hides_secret_value() {
    relay()
        .env("REDDIT_CLIENT_SECRET", "do-not-print-me")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("do-not-print-me").not());
}

#[test]
fn test_version_displays() {
    relay()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reddit-relay"));
}

#[test]
fn test_missing_client_id_fails_fast() {
    relay()
        .env("REDDIT_CLIENT_SECRET", "shh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REDDIT_CLIENT_ID"));
}

#[test]
fn test_missing_client_secret_fails_fast() {
    relay()
        .env("REDDIT_CLIENT_ID", "abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REDDIT_CLIENT_SECRET"));
}

#[test]
fn test_empty_client_secret_fails_fast() {
    relay()
        .args(["--client-id", "abc", "--client-secret", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("client secret is required"));
}

#[test]
fn test_invalid_port_rejected() {
    relay()
        .args(["--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
