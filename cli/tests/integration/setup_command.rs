//! `csm setup` end to end, against the stand-in `gh`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;

use crate::fake_gh::FakeGh;

// --- Caller errors: nothing reaches gh ---

#[test]
fn test_setup_without_fragments_fails_before_any_gh_call() {
    let gh = FakeGh::new();
    gh.csm()
        .args(["setup", "cs-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Nothing to set up"));
    assert!(gh.log().is_empty(), "gh was called: {}", gh.log());
}

#[test]
fn test_setup_unknown_fragment_fails_before_any_gh_call() {
    let gh = FakeGh::new();
    gh.csm()
        .args(["setup", "cs-1", "python", "cobol"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown fragment 'cobol'"));
    assert!(gh.log().is_empty());
}

#[test]
fn test_setup_json_error_object_carries_code() {
    let gh = FakeGh::new();
    let out = gh
        .csm()
        .args(["setup", "cs-1", "--json"])
        .output()
        .expect("run");
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "empty_selection");
}

// --- Full runs ---

#[test]
fn test_setup_aliases_runs_remote_script_and_cleans_up() {
    let gh = FakeGh::new();
    gh.csm()
        .args(["setup", "cs-1", "--aliases"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup completed on cs-1"))
        .stdout(predicate::str::contains("Aliases ready"));

    let bashrc = std::fs::read_to_string(gh.home().join(".bashrc")).expect("bashrc written");
    assert!(bashrc.contains("# >>> csm aliases >>>"));
    assert!(gh.home().join(".vimrc").exists());
    assert!(gh.codespace_files().is_empty(), "{:?}", gh.codespace_files());
    assert!(gh.log().contains("codespace ssh --codespace cs-1 -- cat > "));
}

#[test]
fn test_setup_json_reports_structured_result() {
    let gh = FakeGh::new();
    let out = gh
        .csm()
        .args(["setup", "cs-1", "--aliases", "--name", "Dotfiles", "--json"])
        .output()
        .expect("run");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["outcome"], "completed");
    assert_eq!(value["success"], true);
    assert_eq!(value["exit_code"], 0);
    assert_eq!(value["target"], "cs-1");
    assert!(value["script_name"].as_str().expect("name").starts_with("dotfiles_"));
    assert_eq!(value["steps"][0]["label"], "Programming Aliases");
    assert_eq!(value["steps"][0]["state"], "completed");
}

#[test]
fn test_setup_events_streams_progress_lines() {
    let gh = FakeGh::new();
    let out = gh
        .csm()
        .args(["setup", "cs-1", "--aliases", "--events"])
        .output()
        .expect("run");
    assert!(out.status.success());
    let updates: Vec<serde_json::Value> = String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).expect("one JSON object per line"))
        .collect();
    assert_eq!(updates.first().expect("first")["status"], "started");
    let last = updates.last().expect("last");
    assert_eq!(last["status"], "completed");
    assert_eq!(last["percent"], 100);
    let ids: std::collections::HashSet<&str> = updates
        .iter()
        .map(|u| u["operation_id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids.len(), 1);
}

#[test]
fn test_setup_with_missing_gh_reports_transfer_failure() {
    let gh = FakeGh::new();
    gh.use_gh(&gh.home().join("no-such-gh"));
    let out = gh
        .csm()
        .args(["setup", "cs-1", "--aliases", "--json"])
        .output()
        .expect("run");
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["outcome"], "transfer_failed");
    assert_eq!(value["success"], false);
    assert!(
        value["diagnostic"]
            .as_str()
            .expect("diagnostic")
            .contains("failed to spawn")
    );
}
