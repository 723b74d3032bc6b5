//! CLI integration tests.

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn rampscout() -> Command {
    let mut cmd = cargo_bin_cmd!("rampscout");
    cmd.env_remove("WALLET_PRIVATE_KEY")
        .env_remove("PEERLYTICS_API_KEY")
        .env("NO_COLOR", "1");
    cmd
}

fn temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn help_lists_commands() {
    rampscout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rampscout"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_is_printed() {
    rampscout()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rampscout"));
}

#[test]
fn run_help_shows_overrides() {
    rampscout()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--buy-threshold"))
        .stdout(predicate::str::contains("--sell-threshold"))
        .stdout(predicate::str::contains("--mode"));
}

#[test]
fn run_rejects_unknown_mode() {
    rampscout()
        .args(["run", "--mode", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sometimes"));
}

#[test]
fn check_config_accepts_valid_file() {
    let file = temp_config("[scan]\nbuy_threshold = 0.95\nsell_threshold = 1.03\n");

    rampscout()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("monitor-only"));
}

#[test]
fn check_config_reports_invalid_value() {
    let file = temp_config("[scan]\nsell_threshold = -1\n");

    rampscout()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value for sell_threshold"));
}

#[test]
fn check_config_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");

    rampscout()
        .args(["check", "config", "--config"])
        .arg(dir.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}
