//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn scan_config() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("scan-config"))
}

#[test]
fn test_cli_version() {
    let mut cmd = scan_config();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("scan-config"));
}

#[test]
fn test_cli_help_lists_flags() {
    let mut cmd = scan_config();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--username"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--location"))
        .stdout(predicate::str::contains("--step_limit"))
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--china"));
}

#[test]
fn test_first_run_without_credentials_fails_listing_all_missing() {
    let dir = TempDir::new().expect("temp work dir");
    let mut cmd = scan_config();
    cmd.current_dir(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--username"))
        .stderr(predicate::str::contains("--password"))
        .stderr(predicate::str::contains("--location"));
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn test_first_run_with_credentials_persists_and_prints_summary() {
    let dir = TempDir::new().expect("temp work dir");
    let mut cmd = scan_config();
    cmd.current_dir(dir.path());
    cmd.args(["-u", "trainer", "-p", "hunter2", "-l", "Seattle, WA"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("host: 127.0.0.1"))
        .stdout(predicate::str::contains("port: 5000"))
        .stdout(predicate::str::contains("location: Seattle, WA"))
        .stdout(predicate::str::contains("hunter2").not());

    let saved = fs::read_to_string(dir.path().join("config.json")).expect("read config");
    assert!(saved.ends_with('\n'));
    let doc: serde_json::Value = serde_json::from_str(&saved).expect("parse config");
    assert_eq!(doc["username"], "trainer");
    assert_eq!(doc["password"], "hunter2");
    assert_eq!(doc["step_limit"], "10");
    assert_eq!(doc["china"], false);
}

#[test]
fn test_second_run_needs_no_flags() {
    let dir = TempDir::new().expect("temp work dir");
    let mut first = scan_config();
    first.current_dir(dir.path());
    first.args(["-u", "trainer", "-p", "hunter2", "-l", "Seattle"]);
    first.assert().success();

    let mut second = scan_config();
    second.current_dir(dir.path());
    second.assert().success().stdout(predicate::str::contains("location: Seattle"));
}

#[test]
fn test_flag_overrides_saved_value_and_is_persisted() {
    let dir = TempDir::new().expect("temp work dir");
    fs::write(
        dir.path().join("config.json"),
        r#"{"location": "Seattle", "password": "hunter2", "port": "8080", "username": "trainer"}"#,
    )
    .expect("seed config");

    let mut cmd = scan_config();
    cmd.current_dir(dir.path());
    cmd.args(["-P", "9000"]);
    cmd.assert().success().stdout(predicate::str::contains("port: 9000"));

    let saved = fs::read_to_string(dir.path().join("config.json")).expect("read config");
    let doc: serde_json::Value = serde_json::from_str(&saved).expect("parse config");
    assert_eq!(doc["port"], "9000");
}

#[test]
fn test_malformed_saved_config_is_ignored() {
    let dir = TempDir::new().expect("temp work dir");
    fs::write(dir.path().join("config.json"), "{not valid json").expect("seed config");

    let mut cmd = scan_config();
    cmd.current_dir(dir.path());
    cmd.args(["-u", "trainer", "-p", "hunter2", "-l", "Seattle"]);
    cmd.assert().success().stdout(predicate::str::contains("host: 127.0.0.1"));
}

#[test]
fn test_identical_runs_persist_identical_bytes() {
    let dir = TempDir::new().expect("temp work dir");
    let args = ["-u", "trainer", "-p", "hunter2", "-l", "Seattle"];

    let mut first = scan_config();
    first.current_dir(dir.path());
    first.args(args);
    first.assert().success();
    let before = fs::read(dir.path().join("config.json")).expect("read config");

    let mut second = scan_config();
    second.current_dir(dir.path());
    second.args(args);
    second.assert().success();
    let after = fs::read(dir.path().join("config.json")).expect("read config");

    assert_eq!(before, after);
}

#[test]
fn test_debug_switch_persists_and_sticks_across_runs() {
    let dir = TempDir::new().expect("temp work dir");
    let mut first = scan_config();
    first.current_dir(dir.path());
    first.args(["-u", "trainer", "-p", "hunter2", "-l", "Seattle", "-d"]);
    first.assert().success().stdout(predicate::str::contains("debug: true"));

    let saved = fs::read_to_string(dir.path().join("config.json")).expect("read config");
    let doc: serde_json::Value = serde_json::from_str(&saved).expect("parse config");
    assert_eq!(doc["debug"], true);

    // A later run without -d keeps the saved value
    let mut second = scan_config();
    second.current_dir(dir.path());
    second.assert().success().stdout(predicate::str::contains("debug: true"));

    let saved = fs::read_to_string(dir.path().join("config.json")).expect("read config");
    let doc: serde_json::Value = serde_json::from_str(&saved).expect("parse config");
    assert_eq!(doc["debug"], true);
}

#[test]
fn test_saved_debug_survives_a_run_without_the_switch() {
    let dir = TempDir::new().expect("temp work dir");
    fs::write(
        dir.path().join("config.json"),
        r#"{"debug": true, "location": "Seattle", "password": "hunter2", "username": "trainer"}"#,
    )
    .expect("seed config");

    let mut cmd = scan_config();
    cmd.current_dir(dir.path());
    cmd.assert().success().stdout(predicate::str::contains("debug: true"));

    let saved = fs::read_to_string(dir.path().join("config.json")).expect("read config");
    let doc: serde_json::Value = serde_json::from_str(&saved).expect("parse config");
    assert_eq!(doc["debug"], true);
}
