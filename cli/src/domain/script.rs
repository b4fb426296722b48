//! Script composer.
//!
//! Turns a resolved fragment list into one strict-mode bash script plus the
//! ordered step plan used for progress reporting. Pure apart from the
//! uniqueness suffix of the script name.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::domain::fragment::Fragment;

/// Heredoc terminator used to transfer a composed script over the remote
/// shell. Fragment bodies must never contain this exact line; the fragment
/// library rejects such bodies at registration.
pub const HEREDOC_SENTINEL: &str = "CSM_SCRIPT_EOF_4d1f2b";

/// Final line echoed by every composed script. Its presence in stdout
/// confirms the script ran to the end.
pub const COMPLETION_MARKER: &str = "🎉 All language setups completed successfully!";

/// Prefix of the line echoed after each section finishes.
pub const STEP_DONE_PREFIX: &str = "==> [";

static SCRIPT_SEQ: AtomicU64 = AtomicU64::new(0);

/// One labelled section of the composed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSection {
    pub id: String,
    pub label: String,
    pub body: String,
}

/// One entry of the progress plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// 1-based position.
    pub index: usize,
    pub total: usize,
    pub id: String,
    pub label: String,
    /// Percent complete once this step has been composed.
    pub percent: u8,
}

/// A complete, ready-to-transfer setup script.
#[derive(Debug, Clone)]
pub struct ComposedScript {
    pub operation_name: String,
    /// Filesystem-safe, unique file name used on the remote side.
    pub script_name: String,
    pub sections: Vec<ScriptSection>,
    pub steps: Vec<PlannedStep>,
    /// Full script text, always newline-terminated.
    pub text: String,
}

impl ComposedScript {
    /// Number of newline-terminated lines in `text` (what `wc -l` reports).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count()
    }
}

/// Compose `fragments` into a single script.
///
/// `extra_preamble` lines (e.g. `export` statements) are inserted right after
/// the strict-mode header.
#[must_use]
pub fn compose(
    fragments: &[&Fragment],
    operation_name: &str,
    extra_preamble: &[String],
) -> ComposedScript {
    let total = fragments.len();
    let mut text = String::from("#!/bin/bash\nset -e\n");
    for line in extra_preamble {
        text.push_str(line);
        text.push('\n');
    }

    let mut sections = Vec::with_capacity(total);
    let mut steps = Vec::with_capacity(total);
    for (i, fragment) in fragments.iter().enumerate() {
        let index = i + 1;
        text.push('\n');
        text.push_str(&section_banner(fragment.label));
        text.push('\n');
        text.push_str(fragment.body.trim_end());
        text.push('\n');
        text.push_str(&format!(
            "echo \"{STEP_DONE_PREFIX}{index}/{total}] {} done\"\n",
            fragment.label
        ));

        sections.push(ScriptSection {
            id: fragment.id.to_string(),
            label: fragment.label.to_string(),
            body: fragment.body.to_string(),
        });
        steps.push(PlannedStep {
            index,
            total,
            id: fragment.id.to_string(),
            label: fragment.label.to_string(),
            percent: percent_complete(index, total),
        });
    }

    text.push('\n');
    text.push_str(&format!("echo '{COMPLETION_MARKER}'\n"));

    ComposedScript {
        operation_name: operation_name.to_string(),
        script_name: script_name(operation_name),
        sections,
        steps,
        text,
    }
}

/// Comment banner that opens a section.
#[must_use]
pub fn section_banner(label: &str) -> String {
    format!("# ===== {} =====", label.to_uppercase())
}

/// `completed / total * 100`, rounded to the nearest integer.
#[must_use]
pub fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let completed = completed.min(total);
    let pct = (completed * 100 + total / 2) / total;
    u8::try_from(pct).unwrap_or(100)
}

/// Filesystem-safe prefix derived from an operation name.
///
/// Lowercased; spaces and slashes become `_`; anything outside
/// `[a-z0-9_-]` is dropped. Leading `-` and `_` are stripped so the name is
/// never read as an option by `mv`, `chmod` or `bash`. Falls back to `setup`
/// when nothing is left.
#[must_use]
pub fn script_prefix(operation_name: &str) -> String {
    let sanitized: String = operation_name
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '/' => Some('_'),
            'a'..='z' | '0'..='9' | '_' | '-' => Some(c),
            _ => None,
        })
        .collect();
    let prefix = sanitized.trim_start_matches(['-', '_']).to_string();
    if prefix.is_empty() {
        "setup".to_string()
    } else {
        prefix
    }
}

/// Unique script name: `<prefix>_<utc micros>_<seq>.sh`.
///
/// The process-wide sequence number keeps names distinct even when two
/// operations with the same name start within the same microsecond.
#[must_use]
pub fn script_name(operation_name: &str) -> String {
    let seq = SCRIPT_SEQ.fetch_add(1, Ordering::Relaxed);
    let micros = Utc::now().timestamp_micros();
    format!("{}_{micros}_{seq}.sh", script_prefix(operation_name))
}
