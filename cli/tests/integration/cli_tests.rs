//! Argument parsing, help, version and catalog listing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `csm` with colors off and config isolated in `dir`.
fn csm(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("csm"));
    cmd.env("NO_COLOR", "1")
        .env("CSM_CONFIG", dir.path().join("config.yaml"));
    cmd
}

fn tmp() -> TempDir {
    TempDir::new().expect("temp dir")
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_2() {
    let dir = tmp();
    csm(&dir).assert().code(2).stderr(predicate::str::contains(
        "Manage GitHub Codespaces",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    let dir = tmp();
    csm(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("fragments"))
        .stdout(predicate::str::contains("codespace"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    let dir = tmp();
    csm(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("csm"));
}

#[test]
fn test_version_command_shows_version() {
    let dir = tmp();
    csm(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("csm 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let dir = tmp();
    let out = csm(&dir).args(["version", "--json"]).output().expect("run");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    let dir = tmp();
    csm(&dir).arg("frobnicate").assert().code(2);
}

// --- Fragment catalog ---

#[test]
fn test_fragments_lists_groups_and_ids() {
    let dir = tmp();
    csm(&dir)
        .arg("fragments")
        .assert()
        .success()
        .stdout(predicate::str::contains("Languages"))
        .stdout(predicate::str::contains("AI agents"))
        .stdout(predicate::str::contains("python"))
        .stdout(predicate::str::contains("ai-claude"))
        .stdout(predicate::str::contains("aliases"));
}

#[test]
fn test_fragments_json_lists_catalog_in_order() {
    let dir = tmp();
    let out = csm(&dir).args(["fragments", "--json"]).output().expect("run");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    let ids: Vec<&str> = value["fragments"]
        .as_array()
        .expect("array")
        .iter()
        .map(|f| f["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids.len(), 13);
    assert_eq!(ids[0], "python");
    assert_eq!(ids[12], "aliases");
}

#[test]
fn test_fragments_group_filter() {
    let dir = tmp();
    let out = csm(&dir)
        .args(["fragments", "--group", "ai-agent", "--json"])
        .output()
        .expect("run");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    let fragments = value["fragments"].as_array().expect("array");
    assert_eq!(fragments.len(), 2);
    assert!(fragments.iter().all(|f| f["group"] == "ai-agent"));
}

#[test]
fn test_fragments_rejects_unknown_group() {
    let dir = tmp();
    csm(&dir)
        .args(["fragments", "--group", "databases"])
        .assert()
        .code(2);
}
