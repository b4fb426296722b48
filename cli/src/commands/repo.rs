//! `csm repo`: repository helpers.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::RepoSpec;
use crate::application::services::repository;

/// Repository subcommands.
#[derive(Subcommand)]
pub enum RepoCommand {
    /// Create a repository
    Create {
        /// Repository name
        name: String,
        /// private, public or internal (default from config)
        #[arg(long)]
        visibility: Option<String>,
        /// Short description
        #[arg(long)]
        description: Option<String>,
    },
    /// List your repositories
    List {
        /// Maximum number of repositories
        #[arg(long, default_value_t = 30)]
        limit: u32,
    },
}

/// Run the repo command.
///
/// # Errors
///
/// Returns an error if the arguments are invalid or `gh` fails.
pub async fn run(app: &AppContext, cmd: RepoCommand) -> Result<ExitCode> {
    match cmd {
        RepoCommand::Create {
            name,
            visibility,
            description,
        } => {
            let spec = RepoSpec {
                name: &name,
                visibility: visibility
                    .as_deref()
                    .unwrap_or(app.config.repository.visibility.as_str()),
                description: description.as_deref(),
            };
            let output = repository::create_repo(&app.gh, &spec).await?;
            app.renderer().render_action(
                &format!("Repository {name} created ({})", spec.visibility),
                &output,
            )?;
        }
        RepoCommand::List { limit } => {
            let output = repository::list_repos(&app.gh, limit).await?;
            app.renderer().render_action("Repositories", &output)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
