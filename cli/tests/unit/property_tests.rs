//! Property-based tests for fragment resolution, script naming, output
//! summaries and config validation.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;

use csm_cli::domain::config::{VALID_CONFIG_KEYS, validate_config_key, validate_config_value};
use csm_cli::domain::execution::{SUMMARY_HEAD, SUMMARY_TAIL, SUMMARY_THRESHOLD, summarize_output};
use csm_cli::domain::fragment::FragmentLibrary;
use csm_cli::domain::script::{compose, percent_complete, script_name};

fn builtin_ids() -> Vec<&'static str> {
    FragmentLibrary::builtin()
        .expect("builtin")
        .all()
        .iter()
        .map(|f| f.id)
        .collect()
}

/// A non-empty selection of catalog ids in random order.
fn shuffled_selection() -> impl Strategy<Value = Vec<&'static str>> {
    let ids = builtin_ids();
    let len = ids.len();
    proptest::sample::subsequence(ids, 1..=len).prop_shuffle()
}

// ============================================================================
// Fragment resolution
// ============================================================================

proptest! {
    /// Resolution yields registration order whatever order ids arrive in.
    #[test]
    fn prop_resolve_order_ignores_input_order(selection in shuffled_selection()) {
        let lib = FragmentLibrary::builtin().expect("builtin");
        let resolved: Vec<&str> = lib
            .resolve(&selection)
            .expect("known ids")
            .iter()
            .map(|f| f.id)
            .collect();
        let expected: Vec<&str> = builtin_ids()
            .into_iter()
            .filter(|id| selection.contains(id))
            .collect();
        prop_assert_eq!(resolved, expected);
    }

    /// Repeating ids never duplicates a section.
    #[test]
    fn prop_resolve_deduplicates(selection in shuffled_selection()) {
        let lib = FragmentLibrary::builtin().expect("builtin");
        let doubled: Vec<&str> = selection.iter().chain(selection.iter()).copied().collect();
        let resolved = lib.resolve(&doubled).expect("known ids");
        prop_assert_eq!(resolved.len(), selection.len());
    }

    /// Step percentages rise strictly and end at 100.
    #[test]
    fn prop_step_percent_reaches_100(selection in shuffled_selection()) {
        let lib = FragmentLibrary::builtin().expect("builtin");
        let fragments = lib.resolve(&selection).expect("known ids");
        let script = compose(&fragments, "Language Setup", &[]);
        let pcts: Vec<u8> = script.steps.iter().map(|s| s.percent).collect();
        prop_assert!(pcts.windows(2).all(|w| w[0] < w[1]), "{:?}", pcts);
        prop_assert_eq!(pcts.last().copied(), Some(100));
    }
}

#[test]
fn test_percent_complete_bounds() {
    assert_eq!(percent_complete(0, 3), 0);
    assert_eq!(percent_complete(3, 3), 100);
    assert_eq!(percent_complete(5, 3), 100);
    assert_eq!(percent_complete(0, 0), 100);
}

// ============================================================================
// Script names
// ============================================================================

proptest! {
    /// Names stay filesystem-safe for any operation name.
    #[test]
    fn prop_script_name_is_shell_safe(name in "\\PC{0,40}") {
        let script = script_name(&name);
        prop_assert!(script.ends_with(".sh"));
        prop_assert!(
            script
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_-.".contains(c)),
            "unsafe name: {}", script
        );
        prop_assert!(!script.starts_with('-'), "name parses as an option: {}", script);
    }
}

#[test]
fn test_script_names_are_unique_in_a_batch() {
    let names: HashSet<String> = (0..500).map(|_| script_name("Language Setup")).collect();
    assert_eq!(names.len(), 500, "duplicate script names generated");
}

#[test]
fn test_script_names_are_unique_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| (0..100).map(|_| script_name("x")).collect::<Vec<_>>()))
        .collect();
    let names: HashSet<String> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("thread"))
        .collect();
    assert_eq!(names.len(), 400);
}

// ============================================================================
// Output summaries
// ============================================================================

fn numbered(n: usize) -> String {
    (0..n).map(|i| format!("line {i}\n")).collect()
}

proptest! {
    /// Long output keeps the head, the tail and one elision line.
    #[test]
    fn prop_long_output_is_summarized(n in (SUMMARY_THRESHOLD + 1)..300) {
        let summary = summarize_output(&numbered(n));
        let lines: Vec<&str> = summary.lines().collect();
        prop_assert_eq!(lines.len(), SUMMARY_HEAD + 1 + SUMMARY_TAIL);
        prop_assert_eq!(lines[0], "line 0");
        let last_head = format!("line {}", SUMMARY_HEAD - 1);
        prop_assert_eq!(lines[SUMMARY_HEAD - 1], last_head.as_str());
        let elision = format!("... ({n} total lines) ...");
        prop_assert_eq!(lines[SUMMARY_HEAD], elision.as_str());
        let last = format!("line {}", n - 1);
        prop_assert_eq!(lines[lines.len() - 1], last.as_str());
    }

    /// Short output is only trimmed.
    #[test]
    fn prop_short_output_is_unchanged(n in 0..=SUMMARY_THRESHOLD) {
        let text = numbered(n);
        prop_assert_eq!(summarize_output(&text), text.trim_end());
    }
}

// ============================================================================
// Config validation
// ============================================================================

proptest! {
    /// Keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,12}\\.[a-z_]{1,24}") {
        if !VALID_CONFIG_KEYS.contains(&key.as_str()) {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {}", key);
        }
    }

    /// Only the three visibilities are accepted.
    #[test]
    fn prop_arbitrary_visibility_rejected(value in "[a-z]{1,12}") {
        let valid = ["private", "public", "internal"].contains(&value.as_str());
        prop_assert_eq!(validate_config_value("repository.visibility", &value).is_ok(), valid);
    }

    /// Timeouts must be positive integers.
    #[test]
    fn prop_timeouts_accept_positive_integers(secs in 1u64..100_000) {
        let value = secs.to_string();
        prop_assert!(validate_config_value("setup.execute_timeout_secs", &value).is_ok());
    }
}

#[test]
fn test_every_whitelisted_key_is_accepted() {
    for key in VALID_CONFIG_KEYS {
        assert!(validate_config_key(key).is_ok(), "{key}");
    }
    assert!(validate_config_value("setup.execute_timeout_secs", "0").is_err());
    assert!(validate_config_value("setup.execute_timeout_secs", "ten").is_err());
    assert!(validate_config_value("codespace.region", "West Europe").is_err());
}
