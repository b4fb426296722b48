//! `csm pr`: pull-request helpers for the current repository.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::repository;

/// Pull-request subcommands.
#[derive(Subcommand)]
pub enum PrCommand {
    /// Open a pull request from the current branch
    Create {
        /// Title
        #[arg(long)]
        title: String,
        /// Body
        #[arg(long)]
        body: Option<String>,
    },
    /// List open pull requests
    List,
}

/// Run the pr command.
///
/// # Errors
///
/// Returns an error if the title is blank or `gh` fails.
pub async fn run(app: &AppContext, cmd: PrCommand) -> Result<ExitCode> {
    match cmd {
        PrCommand::Create { title, body } => {
            let output = repository::create_pr(&app.gh, &title, body.as_deref()).await?;
            app.renderer()
                .render_action("Pull request created", &output)?;
        }
        PrCommand::List => {
            let output = repository::list_prs(&app.gh).await?;
            app.renderer().render_action("Pull requests", &output)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
