//! Integration tests for `csm config`.
//!
//! Every test sets `CSM_CONFIG` to a temp path so it never reads or writes
//! the real configuration file.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn csm() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("csm"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// Subcommand registration
// ---------------------------------------------------------------------------

#[test]
fn test_config_help_shows_subcommands() {
    csm()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("set"));
}

// ---------------------------------------------------------------------------
// `csm config show` / `get`
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_without_file_lists_defaults() {
    let (_dir, path) = temp_config_path();
    csm()
        .args(["config", "show"])
        .env("CSM_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("codespace.machine_type:"))
        .stdout(predicate::str::contains("basicLinux32gb"))
        .stdout(predicate::str::contains("CSM_CONFIG:"));
}

#[test]
fn test_config_show_json_includes_path() {
    let (_dir, path) = temp_config_path();
    let out = csm()
        .args(["config", "show", "--json"])
        .env("CSM_CONFIG", &path)
        .output()
        .expect("run");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["config"]["repository"]["visibility"], "private");
}

#[test]
fn test_config_get_prints_bare_value() {
    let (_dir, path) = temp_config_path();
    csm()
        .args(["config", "get", "setup.execute_timeout_secs"])
        .env("CSM_CONFIG", &path)
        .assert()
        .success()
        .stdout("600\n");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    csm()
        .args(["config", "get", "security.level"])
        .env("CSM_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: security.level"));
}

// ---------------------------------------------------------------------------
// `csm config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = temp_config_path();
    csm()
        .args(["config", "set", "repository.visibility", "internal"])
        .env("CSM_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set repository.visibility = internal"));

    let content = std::fs::read_to_string(&path).expect("config written");
    assert!(content.contains("visibility: internal"), "{content}");

    csm()
        .args(["config", "get", "repository.visibility"])
        .env("CSM_CONFIG", &path)
        .assert()
        .success()
        .stdout("internal\n");
}

#[test]
fn test_config_set_invalid_value_leaves_no_file() {
    let (_dir, path) = temp_config_path();
    csm()
        .args(["config", "set", "setup.execute_timeout_secs", "soon"])
        .env("CSM_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("setup.execute_timeout_secs"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_json_echoes_value() {
    let (_dir, path) = temp_config_path();
    let out = csm()
        .args(["config", "set", "codespace.region", "WestUs2", "--json"])
        .env("CSM_CONFIG", &path)
        .output()
        .expect("run");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["key"], "codespace.region");
    assert_eq!(value["value"], "WestUs2");
}

#[test]
fn test_corrupt_config_file_is_reported() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "codespace: [broken").expect("write");
    csm()
        .args(["config", "show"])
        .env("CSM_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load configuration"));
}
