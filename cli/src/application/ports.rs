//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared `csm_common`
//! types, never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;
use csm_common::{CodespaceDescriptor, ProgressUpdate};

use crate::domain::config::AppConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Parameters for `codespace create`.
pub struct CodespaceSpec<'a> {
    /// Repository in `owner/name` form.
    pub repo: &'a str,
    pub branch: &'a str,
    /// Machine type, e.g. `"basicLinux32gb"`.
    pub machine: &'a str,
    /// Location, e.g. `"EuropeWest"`.
    pub region: &'a str,
}

/// Parameters for `repo create`.
pub struct RepoSpec<'a> {
    pub name: &'a str,
    /// `private`, `public` or `internal`.
    pub visibility: &'a str,
    pub description: Option<&'a str>,
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or stubbed.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout the child process must be killed and the error must carry
    /// a `CommandTimedOut`.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    ///
    /// No timeout applies: the program is interactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── GitHub Ports ──────────────────────────────────────────────────────────────

/// Runs one shell command inside a codespace.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Execute `command` on `target` and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or exceeds `timeout`
    /// (in which case the error carries a `CommandTimedOut`). A non-zero
    /// remote exit is reported through `Output::status`, not as an error.
    async fn execute(&self, target: &str, command: &str, timeout: Duration) -> Result<Output>;
}

/// Lists the caller's codespaces.
#[allow(async_fn_in_trait)]
pub trait CodespaceLister {
    async fn list_codespaces(&self) -> Result<Vec<CodespaceDescriptor>>;
}

/// Codespace lifecycle operations.
#[allow(async_fn_in_trait)]
pub trait CodespaceLifecycle {
    async fn create(&self, spec: &CodespaceSpec<'_>) -> Result<Output>;
    /// Wake a codespace by opening a short session on it.
    async fn start(&self, name: &str) -> Result<Output>;
    async fn stop(&self, name: &str) -> Result<Output>;
    async fn delete(&self, name: &str) -> Result<Output>;
    async fn rebuild(&self, name: &str) -> Result<Output>;
    /// Open an interactive shell on the terminal; returns when it closes.
    async fn connect(&self, name: &str) -> Result<ExitStatus>;
}

/// Repository and pull-request helpers.
#[allow(async_fn_in_trait)]
pub trait RepositoryOps {
    async fn create_repo(&self, spec: &RepoSpec<'_>) -> Result<Output>;
    async fn list_repos(&self, limit: u32) -> Result<Output>;
    async fn create_pr(&self, title: &str, body: Option<&str>) -> Result<Output>;
    async fn list_prs(&self) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, must not block.
pub trait ProgressReporter {
    /// Deliver one progress update. Delivery failures are not reported.
    fn notify(&self, update: &ProgressUpdate);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<AppConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &AppConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
