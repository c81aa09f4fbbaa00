//! Integration tests for the `victory-admin` CLI binary.
//!
//! These tests validate argument parsing, help output, configuration and
//! error handling, all without a running broker.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the binary with env isolation.
///
/// Clears all `VICTORY_ADMIN_*` env vars and points config directories at
/// a nonexistent path so tests never touch the user's real configuration.
fn admin_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("victory-admin");
    cmd.env("HOME", "/tmp/victory-admin-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/victory-admin-test-nonexistent")
        .env_remove("VICTORY_ADMIN_URL")
        .env_remove("VICTORY_ADMIN_HZ")
        .env_remove("VICTORY_ADMIN_CONFIG")
        .env_remove("VICTORY_ADMIN_OUTPUT")
        .env_remove("VICTORY_ADMIN_ADAPTER_HZ")
        .env_remove("VICTORY_ADMIN_CONNECT_TIMEOUT")
        .env_remove("VICTORY_ADMIN_TCP_KEEPALIVE")
        .env_remove("RUST_LOG");
    cmd
}

/// A loopback URL with nothing listening behind it.
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = admin_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    admin_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("watch")
            .and(predicate::str::contains("channels"))
            .and(predicate::str::contains("adapters"))
            .and(predicate::str::contains("status")),
    );
}

#[test]
fn test_version_flag() {
    admin_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("victory-admin"));
}

#[test]
fn test_invalid_output_format() {
    admin_cmd()
        .args(["-o", "yaml", "status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("yaml"));
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn test_invalid_url_is_usage_error() {
    admin_cmd()
        .args(["--url", "not a url", "status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid broker URL"));
}

#[test]
fn test_unsupported_scheme_is_usage_error() {
    admin_cmd()
        .args(["--url", "ftp://localhost:5050", "channels"])
        .assert()
        .code(2);
}

#[test]
fn test_channels_times_out_without_broker() {
    admin_cmd()
        .args(["--url", &dead_url(), "channels", "--wait", "1"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("No channel listing"));
}

#[test]
fn test_status_reports_connecting_without_broker() {
    admin_cmd()
        .args(["--url", &dead_url(), "-o", "json", "status", "--wait", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"connected\": false")
                .and(predicate::str::contains("\"loading\": true")),
        );
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_config_file_url_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "url = \"gopher://nowhere\"\n").unwrap();

    admin_cmd()
        .arg("--config")
        .arg(&path)
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("gopher://nowhere"));
}

#[test]
fn test_malformed_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "adapter_hz = \"fast\"\n").unwrap();

    admin_cmd()
        .arg("--config")
        .arg(&path)
        .arg("status")
        .assert()
        .code(1);
}
