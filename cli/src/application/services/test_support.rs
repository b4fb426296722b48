//! Shared test helpers for service tests.
//!
//! Provides cross-platform `exit_status()`, a scripted `RemoteShell` that
//! answers per protocol phase, and a reporter that records every update.

use std::cell::RefCell;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use csm_common::ProgressUpdate;

use crate::application::ports::{ProgressReporter, RemoteShell};
use crate::domain::error::CommandTimedOut;
use crate::domain::script::HEREDOC_SENTINEL;

/// Build an `ExitStatus` from a logical exit code (cross-platform).
#[cfg(unix)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    std::process::ExitStatus::from_raw(code as u32)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stdout: &[u8], stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: stdout.to_vec(),
        stderr: stderr.to_vec(),
    }
}

/// Protocol phase a remote command belongs to, judged from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Transfer,
    Verify,
    Execute,
    Cleanup,
}

pub fn classify(command: &str) -> Step {
    if command.starts_with("cat >") {
        Step::Transfer
    } else if command.starts_with("test -s") {
        Step::Verify
    } else if command.starts_with("chmod") {
        Step::Execute
    } else {
        Step::Cleanup
    }
}

/// Canned answer for one phase.
#[derive(Debug, Clone)]
pub enum Reply {
    Output(Output),
    TimedOut,
    SpawnError(&'static str),
}

impl Reply {
    fn into_result(self, timeout: Duration) -> Result<Output> {
        match self {
            Self::Output(o) => Ok(o),
            Self::TimedOut => Err(CommandTimedOut {
                program: "gh".to_string(),
                after: timeout,
            }
            .into()),
            Self::SpawnError(msg) => Err(anyhow::anyhow!(msg)),
        }
    }
}

/// Remote shell stub: records every command and answers per phase.
///
/// Unless overridden, verify echoes the number of lines received by the
/// preceding transfer, so a faithful transfer always verifies.
pub struct ScriptedShell {
    calls: RefCell<Vec<(String, String, Duration)>>,
    transferred_lines: RefCell<usize>,
    transfer: Reply,
    verify: Option<Reply>,
    execute: Reply,
    cleanup: Reply,
}

impl ScriptedShell {
    /// Every phase succeeds; the script prints `stdout`.
    pub fn succeeding(stdout: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            transferred_lines: RefCell::new(0),
            transfer: Reply::Output(ok_output(b"")),
            verify: None,
            execute: Reply::Output(ok_output(stdout.as_bytes())),
            cleanup: Reply::Output(ok_output(b"")),
        }
    }

    pub fn with_transfer(mut self, reply: Reply) -> Self {
        self.transfer = reply;
        self
    }

    pub fn with_verify(mut self, reply: Reply) -> Self {
        self.verify = Some(reply);
        self
    }

    pub fn with_execute(mut self, reply: Reply) -> Self {
        self.execute = reply;
        self
    }

    pub fn with_cleanup(mut self, reply: Reply) -> Self {
        self.cleanup = reply;
        self
    }

    /// Every command sent, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, c, _)| c.clone()).collect()
    }

    /// Phase of every command sent, in order.
    pub fn steps(&self) -> Vec<Step> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, c, _)| classify(c))
            .collect()
    }

    /// Targets addressed, in order.
    pub fn targets(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(t, _, _)| t.clone()).collect()
    }

    /// Timeout passed with the first command of `step`.
    pub fn timeout_of(&self, step: Step) -> Option<Duration> {
        self.calls
            .borrow()
            .iter()
            .find(|(_, c, _)| classify(c) == step)
            .map(|(_, _, t)| *t)
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl RemoteShell for ScriptedShell {
    async fn execute(&self, target: &str, command: &str, timeout: Duration) -> Result<Output> {
        self.calls
            .borrow_mut()
            .push((target.to_string(), command.to_string(), timeout));
        let reply = match classify(command) {
            Step::Transfer => {
                let lines = command
                    .lines()
                    .skip(1)
                    .take_while(|l| *l != HEREDOC_SENTINEL)
                    .count();
                *self.transferred_lines.borrow_mut() = lines;
                self.transfer.clone()
            }
            Step::Verify => self.verify.clone().unwrap_or_else(|| {
                let lines = *self.transferred_lines.borrow();
                Reply::Output(ok_output(format!("{lines}\n").as_bytes()))
            }),
            Step::Execute => self.execute.clone(),
            Step::Cleanup => self.cleanup.clone(),
        };
        reply.into_result(timeout)
    }
}

/// Reporter that keeps every update it receives.
#[derive(Default)]
pub struct RecordingReporter {
    pub updates: RefCell<Vec<ProgressUpdate>>,
}

impl ProgressReporter for RecordingReporter {
    fn notify(&self, update: &ProgressUpdate) {
        self.updates.borrow_mut().push(update.clone());
    }
}
