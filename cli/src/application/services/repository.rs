//! Application service: repository and pull-request helpers.

use anyhow::Result;

use crate::application::ports::{RepoSpec, RepositoryOps};
use crate::application::services::codespace::check;
use crate::domain::config::validate_config_value;

/// Create a repository.
///
/// # Errors
///
/// Returns an error if the name is blank, the visibility is not one of the
/// accepted values, or `gh` fails.
pub async fn create_repo(ops: &impl RepositoryOps, spec: &RepoSpec<'_>) -> Result<String> {
    if spec.name.trim().is_empty() {
        anyhow::bail!("Repository name must not be empty");
    }
    validate_config_value("repository.visibility", spec.visibility)?;
    tracing::info!(repo = spec.name, visibility = spec.visibility, "creating repository");
    check(ops.create_repo(spec).await?, "repo create")
}

/// # Errors
///
/// Returns an error if `gh` fails.
pub async fn list_repos(ops: &impl RepositoryOps, limit: u32) -> Result<String> {
    check(ops.list_repos(limit).await?, "repo list")
}

/// Open a pull request from the current branch.
///
/// # Errors
///
/// Returns an error if the title is blank or `gh` fails.
pub async fn create_pr(
    ops: &impl RepositoryOps,
    title: &str,
    body: Option<&str>,
) -> Result<String> {
    if title.trim().is_empty() {
        anyhow::bail!("Pull request title must not be empty");
    }
    check(ops.create_pr(title, body).await?, "pr create")
}

/// # Errors
///
/// Returns an error if `gh` fails.
pub async fn list_prs(ops: &impl RepositoryOps) -> Result<String> {
    check(ops.list_prs().await?, "pr list")
}
