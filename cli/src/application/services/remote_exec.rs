//! Application service: transfer, verify, execute and clean up a composed
//! script on a codespace.
//!
//! Remote failures never surface as `Err`; every run ends in exactly one
//! `Outcome`. Cleanup runs whatever happened before it.

use std::future::Future;
use std::process::Output;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::application::ports::RemoteShell;
use crate::domain::config::SetupTimeouts;
use crate::domain::error::CommandTimedOut;
use crate::domain::execution::{ExecutionResult, Outcome, has_completion_marker, step_reports};
use crate::domain::script::{ComposedScript, HEREDOC_SENTINEL};

// ── Options ───────────────────────────────────────────────────────────────────

/// Wall-clock budget for each protocol phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    pub transfer_timeout: Duration,
    pub verify_timeout: Duration,
    pub execute_timeout: Duration,
    pub cleanup_timeout: Duration,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self::from(&SetupTimeouts::default())
    }
}

impl From<&SetupTimeouts> for ExecutorOptions {
    fn from(t: &SetupTimeouts) -> Self {
        Self {
            transfer_timeout: Duration::from_secs(t.transfer_timeout_secs),
            verify_timeout: Duration::from_secs(t.verify_timeout_secs),
            execute_timeout: Duration::from_secs(t.execute_timeout_secs),
            cleanup_timeout: Duration::from_secs(t.cleanup_timeout_secs),
        }
    }
}

/// Protocol phase announced to the caller before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Transfer,
    Verify,
    Execute,
}

impl Phase {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Transfer => "Transferring setup script",
            Self::Verify => "Verifying setup script",
            Self::Execute => "Running setup script",
        }
    }
}

// ── Remote commands ───────────────────────────────────────────────────────────

/// Heredoc transfer into `<name>.part`, renamed into place only once the
/// whole body has been written.
#[must_use]
pub fn transfer_command(script: &ComposedScript) -> String {
    let name = &script.script_name;
    format!(
        "cat > '{name}.part' << '{HEREDOC_SENTINEL}'\n{}{HEREDOC_SENTINEL}\n\
         mv -f '{name}.part' '{name}'",
        script.text
    )
}

#[must_use]
pub fn verify_command(script_name: &str) -> String {
    format!("test -s '{script_name}' && wc -l < '{script_name}'")
}

#[must_use]
pub fn execute_command(script_name: &str) -> String {
    format!("chmod +x '{script_name}' && bash '{script_name}' && rm -f '{script_name}'")
}

/// Removes the partial file and, unless the script is kept for inspection,
/// the script itself.
#[must_use]
pub fn cleanup_command(script_name: &str, keep_script: bool) -> String {
    if keep_script {
        format!("rm -f '{script_name}.part'")
    } else {
        format!("rm -f '{script_name}.part' '{script_name}'")
    }
}

// ── Executor ──────────────────────────────────────────────────────────────────

enum PhaseResult {
    Finished(Result<Output>),
    Cancelled,
}

/// Runs composed scripts on a codespace through a `RemoteShell`.
pub struct RemoteExecutor<'a, S: RemoteShell> {
    shell: &'a S,
    opts: ExecutorOptions,
}

impl<'a, S: RemoteShell> RemoteExecutor<'a, S> {
    #[must_use]
    pub fn new(shell: &'a S, opts: ExecutorOptions) -> Self {
        Self { shell, opts }
    }

    /// Run `script` on `target`.
    ///
    /// `on_phase` is called before transfer, verify and execute. `cancel`
    /// is raced against every phase; when it resolves first the run ends
    /// as `Cancelled`. Cleanup is not cancellable.
    pub async fn execute<F>(
        &self,
        operation_id: &str,
        target: &str,
        script: &ComposedScript,
        on_phase: impl Fn(Phase),
        cancel: F,
    ) -> ExecutionResult
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        tokio::pin!(cancel);

        let (outcome, stdout, stderr) = self
            .run_protocol(target, script, &on_phase, cancel.as_mut())
            .await;

        self.cleanup(target, &script.script_name, &outcome).await;

        tracing::info!(
            operation_id,
            codespace = target,
            script = %script.script_name,
            outcome = outcome.code(),
            "remote setup finished"
        );

        ExecutionResult {
            operation_id: operation_id.to_string(),
            target: target.to_string(),
            script_name: script.script_name.clone(),
            steps: step_reports(&script.steps, &stdout, &outcome),
            outcome,
            stdout,
            stderr,
            elapsed: started.elapsed(),
        }
    }

    async fn run_protocol<F>(
        &self,
        target: &str,
        script: &ComposedScript,
        on_phase: &impl Fn(Phase),
        mut cancel: std::pin::Pin<&mut F>,
    ) -> (Outcome, String, String)
    where
        F: Future<Output = ()>,
    {
        let name = &script.script_name;

        // Transfer
        on_phase(Phase::Transfer);
        tracing::debug!(codespace = target, script = %name, "transferring");
        let command = transfer_command(script);
        match self
            .run_phase(target, &command, self.opts.transfer_timeout, cancel.as_mut())
            .await
        {
            PhaseResult::Cancelled => return (Outcome::Cancelled, String::new(), String::new()),
            PhaseResult::Finished(Ok(out)) if out.status.success() => {}
            PhaseResult::Finished(Ok(out)) => {
                return (Outcome::TransferFailed, String::new(), lossy(&out.stderr));
            }
            PhaseResult::Finished(Err(e)) => {
                return (Outcome::TransferFailed, String::new(), format!("{e:#}"));
            }
        }

        // Verify
        on_phase(Phase::Verify);
        tracing::debug!(codespace = target, script = %name, "verifying");
        let expected = script.line_count();
        match self
            .run_phase(target, &verify_command(name), self.opts.verify_timeout, cancel.as_mut())
            .await
        {
            PhaseResult::Cancelled => return (Outcome::Cancelled, String::new(), String::new()),
            PhaseResult::Finished(Ok(out)) if out.status.success() => {
                let reported = lossy(&out.stdout);
                if reported.trim().parse::<usize>().ok() != Some(expected) {
                    let detail = format!(
                        "remote script has {} lines, expected {expected}",
                        reported.trim()
                    );
                    return (Outcome::VerifyFailed, String::new(), detail);
                }
            }
            PhaseResult::Finished(Ok(out)) => {
                return (Outcome::VerifyFailed, String::new(), lossy(&out.stderr));
            }
            PhaseResult::Finished(Err(e)) => {
                return (Outcome::VerifyFailed, String::new(), format!("{e:#}"));
            }
        }

        // Execute
        on_phase(Phase::Execute);
        tracing::debug!(codespace = target, script = %name, "executing");
        let timeout = self.opts.execute_timeout;
        match self
            .run_phase(target, &execute_command(name), timeout, cancel.as_mut())
            .await
        {
            PhaseResult::Cancelled => (Outcome::Cancelled, String::new(), String::new()),
            PhaseResult::Finished(Ok(out)) => {
                let stdout = lossy(&out.stdout);
                let stderr = lossy(&out.stderr);
                if out.status.success() && has_completion_marker(&stdout) {
                    (Outcome::Completed, stdout, String::new())
                } else {
                    let exit_code = out.status.code();
                    (Outcome::ExecutionFailed { exit_code }, stdout, stderr)
                }
            }
            PhaseResult::Finished(Err(e)) if is_timeout(&e) => {
                (Outcome::TimedOut { after: timeout }, String::new(), String::new())
            }
            PhaseResult::Finished(Err(e)) => (
                Outcome::ExecutionFailed { exit_code: None },
                String::new(),
                format!("{e:#}"),
            ),
        }
    }

    /// One remote call, bounded by `timeout` and raced against `cancel`.
    async fn run_phase<F>(
        &self,
        target: &str,
        command: &str,
        timeout: Duration,
        cancel: std::pin::Pin<&mut F>,
    ) -> PhaseResult
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => PhaseResult::Cancelled,
            result = self.bounded(target, command, timeout) => PhaseResult::Finished(result),
        }
    }

    async fn bounded(&self, target: &str, command: &str, timeout: Duration) -> Result<Output> {
        match tokio::time::timeout(timeout, self.shell.execute(target, command, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(CommandTimedOut {
                program: "gh codespace ssh".to_string(),
                after: timeout,
            }
            .into()),
        }
    }

    async fn cleanup(&self, target: &str, script_name: &str, outcome: &Outcome) {
        let keep = matches!(outcome, Outcome::ExecutionFailed { .. });
        let command = cleanup_command(script_name, keep);
        match self.bounded(target, &command, self.opts.cleanup_timeout).await {
            Ok(out) if out.status.success() => {
                tracing::debug!(
                    codespace = target,
                    script = script_name,
                    kept = keep,
                    "cleaned up"
                );
            }
            Ok(out) => tracing::warn!(
                codespace = target,
                script = script_name,
                stderr = %lossy(&out.stderr).trim(),
                "remote cleanup failed"
            ),
            Err(e) => tracing::warn!(
                codespace = target,
                script = script_name,
                error = %format!("{e:#}"),
                "remote cleanup failed"
            ),
        }
    }
}

fn is_timeout(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CommandTimedOut>().is_some()
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
