//! Application service: codespace listing and lifecycle.

use std::process::Output;

use anyhow::{Context, Result};
use csm_common::CodespaceDescriptor;

use crate::application::ports::{CodespaceLifecycle, CodespaceLister, CodespaceSpec};
use crate::domain::config::CodespaceDefaults;

/// Optional overrides for `codespace create`; unset fields use the
/// configured defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateOverrides<'a> {
    pub branch: Option<&'a str>,
    pub machine: Option<&'a str>,
    pub region: Option<&'a str>,
}

/// Merge overrides with configured defaults.
#[must_use]
pub fn create_spec<'a>(
    repo: &'a str,
    overrides: CreateOverrides<'a>,
    defaults: &'a CodespaceDefaults,
) -> CodespaceSpec<'a> {
    CodespaceSpec {
        repo,
        branch: overrides.branch.unwrap_or(&defaults.default_branch),
        machine: overrides.machine.unwrap_or(&defaults.machine_type),
        region: overrides.region.unwrap_or(&defaults.region),
    }
}

/// Codespaces, most recently used first.
///
/// # Errors
///
/// Returns an error if the listing cannot be obtained or parsed.
pub async fn list(lister: &impl CodespaceLister) -> Result<Vec<CodespaceDescriptor>> {
    let mut codespaces = lister
        .list_codespaces()
        .await
        .context("cannot list codespaces")?;
    codespaces.sort_by(|a, b| {
        b.last_used_at
            .cmp(&a.last_used_at)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(codespaces)
}

/// Create a codespace and return the name reported by `gh`.
///
/// # Errors
///
/// Returns an error if `gh` fails or exits non-zero.
pub async fn create(
    lifecycle: &impl CodespaceLifecycle,
    spec: &CodespaceSpec<'_>,
) -> Result<String> {
    tracing::info!(repo = spec.repo, machine = spec.machine, "creating codespace");
    check(lifecycle.create(spec).await?, "codespace create")
}

/// # Errors
///
/// Returns an error if `gh` fails or exits non-zero.
pub async fn start(lifecycle: &impl CodespaceLifecycle, name: &str) -> Result<String> {
    check(lifecycle.start(name).await?, "codespace start")
}

/// # Errors
///
/// Returns an error if `gh` fails or exits non-zero.
pub async fn stop(lifecycle: &impl CodespaceLifecycle, name: &str) -> Result<String> {
    check(lifecycle.stop(name).await?, "codespace stop")
}

/// # Errors
///
/// Returns an error if `gh` fails or exits non-zero.
pub async fn delete(lifecycle: &impl CodespaceLifecycle, name: &str) -> Result<String> {
    tracing::info!(codespace = name, "deleting codespace");
    check(lifecycle.delete(name).await?, "codespace delete")
}

/// Start a rebuild of the codespace's container.
///
/// # Errors
///
/// Returns an error if `gh` fails or exits non-zero.
pub async fn rebuild(lifecycle: &impl CodespaceLifecycle, name: &str) -> Result<String> {
    tracing::info!(codespace = name, "rebuilding codespace");
    check(lifecycle.rebuild(name).await?, "codespace rebuild")
}

/// Hand the terminal to an interactive shell until the user leaves it.
///
/// # Errors
///
/// Returns an error if `gh` cannot be started or the session ends with a
/// non-zero status.
pub async fn connect(lifecycle: &impl CodespaceLifecycle, name: &str) -> Result<()> {
    tracing::info!(codespace = name, "connecting");
    let status = lifecycle
        .connect(name)
        .await
        .with_context(|| format!("cannot connect to {name}"))?;
    if !status.success() {
        anyhow::bail!("codespace connect failed ({status})");
    }
    Ok(())
}

/// Turn a finished `gh` call into its trimmed stdout, or an error carrying
/// its stderr.
///
/// # Errors
///
/// Returns an error if the process exited non-zero.
pub fn check(output: Output, action: &str) -> Result<String> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    if detail.is_empty() {
        anyhow::bail!("{action} failed ({})", output.status);
    }
    anyhow::bail!("{action} failed: {detail}")
}
