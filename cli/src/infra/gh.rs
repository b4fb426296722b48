//! GitHub CLI adapter.
//!
//! `GhCli` implements every GitHub-facing port by shelling out to `gh`
//! through a `CommandRunner`, so tests can swap the runner for a stub.

use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::{Context, Result};
use csm_common::CodespaceDescriptor;

use crate::application::ports::{
    CodespaceLifecycle, CodespaceLister, CodespaceSpec, CommandRunner, RemoteShell, RepoSpec,
    RepositoryOps,
};

/// Fields requested from `gh codespace list`.
pub const CODESPACE_LIST_FIELDS: &str =
    "name,displayName,repository,state,machineName,createdAt,lastUsedAt";

/// Creating or waking a codespace can take minutes.
pub const PROVISION_TIMEOUT: Duration = Duration::from_secs(600);

/// `gh` wrapper over an injected runner.
pub struct GhCli<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> GhCli<R> {
    /// Wrap `runner`, invoking the `gh` binary found at `program`.
    #[must_use]
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    async fn gh(&self, args: &[&str]) -> Result<Output> {
        self.runner.run(&self.program, args).await
    }

    async fn gh_with_timeout(&self, args: &[&str], timeout: Duration) -> Result<Output> {
        self.runner.run_with_timeout(&self.program, args, timeout).await
    }
}

/// Arguments for one command inside a codespace.
#[must_use]
pub fn ssh_args<'a>(target: &'a str, command: &'a str) -> [&'a str; 6] {
    ["codespace", "ssh", "--codespace", target, "--", command]
}

impl<R: CommandRunner> RemoteShell for GhCli<R> {
    async fn execute(&self, target: &str, command: &str, timeout: Duration) -> Result<Output> {
        self.gh_with_timeout(&ssh_args(target, command), timeout)
            .await
            .with_context(|| format!("remote command on {target}"))
    }
}

impl<R: CommandRunner> CodespaceLister for GhCli<R> {
    async fn list_codespaces(&self) -> Result<Vec<CodespaceDescriptor>> {
        let output = self
            .gh(&["codespace", "list", "--json", CODESPACE_LIST_FIELDS])
            .await?;
        if !output.status.success() {
            anyhow::bail!(
                "gh codespace list failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        serde_json::from_slice(&output.stdout).context("cannot parse gh codespace list output")
    }
}

impl<R: CommandRunner> CodespaceLifecycle for GhCli<R> {
    async fn create(&self, spec: &CodespaceSpec<'_>) -> Result<Output> {
        self.gh_with_timeout(
            &[
                "codespace",
                "create",
                "--repo",
                spec.repo,
                "--branch",
                spec.branch,
                "--machine",
                spec.machine,
                "--location",
                spec.region,
            ],
            PROVISION_TIMEOUT,
        )
        .await
    }

    async fn start(&self, name: &str) -> Result<Output> {
        self.gh_with_timeout(&ssh_args(name, "echo started"), PROVISION_TIMEOUT)
            .await
    }

    async fn stop(&self, name: &str) -> Result<Output> {
        self.gh(&["codespace", "stop", "--codespace", name]).await
    }

    async fn delete(&self, name: &str) -> Result<Output> {
        self.gh(&["codespace", "delete", "--codespace", name, "--force"])
            .await
    }

    async fn rebuild(&self, name: &str) -> Result<Output> {
        self.gh_with_timeout(
            &["codespace", "rebuild", "--codespace", name],
            PROVISION_TIMEOUT,
        )
        .await
    }

    async fn connect(&self, name: &str) -> Result<ExitStatus> {
        self.runner
            .run_status(&self.program, &["codespace", "ssh", "--codespace", name])
            .await
    }
}

impl<R: CommandRunner> RepositoryOps for GhCli<R> {
    async fn create_repo(&self, spec: &RepoSpec<'_>) -> Result<Output> {
        let visibility = format!("--{}", spec.visibility);
        let mut args = vec!["repo", "create", spec.name, visibility.as_str()];
        if let Some(description) = spec.description {
            args.extend(["--description", description]);
        }
        self.gh(&args).await
    }

    async fn list_repos(&self, limit: u32) -> Result<Output> {
        let limit = limit.to_string();
        self.gh(&["repo", "list", "--limit", &limit]).await
    }

    async fn create_pr(&self, title: &str, body: Option<&str>) -> Result<Output> {
        // gh refuses to prompt for a body when stdin is not a terminal.
        self.gh(&["pr", "create", "--title", title, "--body", body.unwrap_or("")])
            .await
    }

    async fn list_prs(&self) -> Result<Output> {
        self.gh(&["pr", "list"]).await
    }
}
