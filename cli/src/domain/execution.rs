//! Execution results and output summarisation.
//!
//! Pure data: the remote executor fills these in, callers render them.

use std::time::Duration;

use crate::domain::script::{COMPLETION_MARKER, PlannedStep, STEP_DONE_PREFIX};

/// Outputs longer than this many lines are summarised.
pub const SUMMARY_THRESHOLD: usize = 20;
/// Lines kept from the start of a summarised output.
pub const SUMMARY_HEAD: usize = 10;
/// Lines kept from the end of a summarised output.
pub const SUMMARY_TAIL: usize = 5;

/// Terminal state of one remote execution. Exactly one per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Script exited 0 and printed the completion marker.
    Completed,
    /// The heredoc transfer command failed.
    TransferFailed,
    /// The transferred file was missing or incomplete; nothing was executed.
    VerifyFailed,
    /// The script ran and failed, or exited without the completion marker.
    ExecutionFailed { exit_code: Option<i32> },
    /// The script exceeded its wall-clock budget.
    TimedOut { after: Duration },
    /// The caller cancelled the run.
    Cancelled,
}

impl Outcome {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::TransferFailed => "transfer_failed",
            Self::VerifyFailed => "verify_failed",
            Self::ExecutionFailed { .. } => "execution_failed",
            Self::TimedOut { .. } => "timed_out",
            Self::Cancelled => "cancelled",
        }
    }

    fn generic_message(&self) -> String {
        match self {
            Self::Completed => "completed successfully".to_string(),
            Self::TransferFailed => "failed to transfer the setup script".to_string(),
            Self::VerifyFailed => "transferred setup script could not be verified".to_string(),
            Self::ExecutionFailed { exit_code: Some(code) } => {
                format!("setup script exited with status {code}")
            }
            Self::ExecutionFailed { exit_code: None } => "setup script failed".to_string(),
            Self::TimedOut { after } => {
                format!("setup script timed out after {}s", after.as_secs())
            }
            Self::Cancelled => "setup was cancelled".to_string(),
        }
    }
}

/// Observed state of one planned step after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Failed,
    NotRun,
}

/// Per-step status in the final result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub index: usize,
    pub label: String,
    pub state: StepState,
}

/// Structured result of one setup run.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub operation_id: String,
    pub target: String,
    pub script_name: String,
    pub outcome: Outcome,
    /// Full captured stdout of the execute phase.
    pub stdout: String,
    /// Captured stderr of the failing phase (empty on success).
    pub stderr: String,
    pub steps: Vec<StepReport>,
    pub elapsed: Duration,
}

impl ExecutionResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.outcome == Outcome::Completed
    }

    /// `true` for timeouts and cancellations, as opposed to ordinary failures.
    #[must_use]
    pub fn interrupted(&self) -> bool {
        matches!(self.outcome, Outcome::TimedOut { .. } | Outcome::Cancelled)
    }

    /// Summarised stdout for display.
    #[must_use]
    pub fn output_summary(&self) -> String {
        summarize_output(&self.stdout)
    }

    /// Most specific diagnostic available: stderr, then stdout, then a
    /// message derived from the outcome. Summarised like any output.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        if !self.stderr.trim().is_empty() {
            summarize_output(&self.stderr)
        } else if !self.stdout.trim().is_empty() && !self.success() {
            summarize_output(&self.stdout)
        } else {
            self.outcome.generic_message()
        }
    }

    /// One-line description of the outcome.
    #[must_use]
    pub fn headline(&self) -> String {
        self.outcome.generic_message()
    }
}

/// Summarise `text` for display.
///
/// More than [`SUMMARY_THRESHOLD`] lines keeps the first [`SUMMARY_HEAD`]
/// and last [`SUMMARY_TAIL`] lines around an elision line. Shorter output
/// is returned trimmed of trailing whitespace but otherwise unchanged.
#[must_use]
pub fn summarize_output(text: &str) -> String {
    let trimmed = text.trim_end();
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() <= SUMMARY_THRESHOLD {
        return trimmed.to_string();
    }
    let head = &lines[..SUMMARY_HEAD];
    let tail = &lines[lines.len() - SUMMARY_TAIL..];
    format!(
        "{}\n{}\n{}",
        head.join("\n"),
        elision_line(lines.len()),
        tail.join("\n")
    )
}

/// Line inserted between head and tail of a summarised output.
#[must_use]
pub fn elision_line(total: usize) -> String {
    format!("... ({total} total lines) ...")
}

/// `true` when stdout contains the composed script's completion marker.
#[must_use]
pub fn has_completion_marker(stdout: &str) -> bool {
    stdout.lines().any(|l| l.trim() == COMPLETION_MARKER)
}

/// Derive per-step states from the `==> [i/n] ... done` lines in stdout.
///
/// Steps whose done line was seen are `Completed`. When the run failed, the
/// first step without a done line is `Failed` (strict mode aborts there) and
/// the rest are `NotRun`. Interrupted runs mark every unseen step `NotRun`.
#[must_use]
pub fn step_reports(plan: &[PlannedStep], stdout: &str, outcome: &Outcome) -> Vec<StepReport> {
    let done: Vec<usize> = stdout
        .lines()
        .filter_map(|l| l.trim().strip_prefix(STEP_DONE_PREFIX))
        .filter_map(|rest| rest.split('/').next())
        .filter_map(|n| n.parse().ok())
        .collect();

    let mut failure_assigned = !matches!(outcome, Outcome::ExecutionFailed { .. });
    plan.iter()
        .map(|step| {
            let state = if *outcome == Outcome::Completed || done.contains(&step.index) {
                StepState::Completed
            } else if failure_assigned {
                StepState::NotRun
            } else {
                failure_assigned = true;
                StepState::Failed
            };
            StepReport {
                index: step.index,
                label: step.label.clone(),
                state,
            }
        })
        .collect()
}
