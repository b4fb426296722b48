//! `csm codespace`: list and manage codespaces.

use std::future::Future;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::codespace::{self as service, CreateOverrides, create_spec};
use crate::output::progress;

/// Codespace subcommands.
#[derive(Subcommand)]
pub enum CodespaceCommand {
    /// List codespaces, most recently used first
    List,
    /// Create a codespace (unset options use the configured defaults)
    Create(CreateArgs),
    /// Start a codespace by connecting to it
    Start {
        /// Codespace name
        name: String,
    },
    /// Stop a running codespace
    Stop {
        /// Codespace name
        name: String,
    },
    /// Delete a codespace
    Delete {
        /// Codespace name
        name: String,
    },
    /// Rebuild a codespace's container
    Rebuild {
        /// Codespace name
        name: String,
    },
    /// Open an interactive shell on a codespace
    Connect {
        /// Codespace name
        name: String,
    },
}

/// Arguments for `codespace create`.
#[derive(Args)]
pub struct CreateArgs {
    /// Repository (owner/name)
    #[arg(long)]
    pub repo: String,
    /// Branch to check out
    #[arg(long)]
    pub branch: Option<String>,
    /// Machine type
    #[arg(long)]
    pub machine: Option<String>,
    /// Region
    #[arg(long)]
    pub region: Option<String>,
}

/// Run the codespace command.
///
/// # Errors
///
/// Returns an error if `gh` fails or the output cannot be rendered.
pub async fn run(app: &AppContext, cmd: CodespaceCommand) -> Result<ExitCode> {
    match cmd {
        CodespaceCommand::List => list(app).await,
        CodespaceCommand::Create(args) => create(app, &args).await,
        CodespaceCommand::Start { name } => {
            let output = with_spinner(
                app,
                &format!("Starting {name}..."),
                service::start(&app.gh, &name),
            )
            .await?;
            app.renderer()
                .render_action(&format!("Codespace {name} is running"), &output)?;
            Ok(ExitCode::SUCCESS)
        }
        CodespaceCommand::Stop { name } => {
            let output = service::stop(&app.gh, &name).await?;
            app.renderer()
                .render_action(&format!("Codespace {name} stopped"), &output)?;
            Ok(ExitCode::SUCCESS)
        }
        CodespaceCommand::Delete { name } => delete(app, &name).await,
        CodespaceCommand::Rebuild { name } => {
            let output = service::rebuild(&app.gh, &name).await?;
            app.renderer()
                .render_action(&format!("Rebuild of {name} started"), &output)?;
            Ok(ExitCode::SUCCESS)
        }
        CodespaceCommand::Connect { name } => {
            if !app.is_json() {
                app.output.info(&format!(
                    "Connecting to {name}. Press Ctrl-D or type 'exit' to disconnect."
                ));
            }
            service::connect(&app.gh, &name).await?;
            app.renderer()
                .render_action(&format!("Disconnected from {name}"), "")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn list(app: &AppContext) -> Result<ExitCode> {
    let codespaces = service::list(&app.gh).await?;
    app.renderer().render_codespaces(&codespaces)?;
    Ok(ExitCode::SUCCESS)
}

async fn create(app: &AppContext, args: &CreateArgs) -> Result<ExitCode> {
    let overrides = CreateOverrides {
        branch: args.branch.as_deref(),
        machine: args.machine.as_deref(),
        region: args.region.as_deref(),
    };
    let spec = create_spec(&args.repo, overrides, &app.config.codespace);
    let name = with_spinner(
        app,
        &format!("Creating codespace for {} ({})...", spec.repo, spec.machine),
        service::create(&app.gh, &spec),
    )
    .await?;
    app.renderer()
        .render_action(&format!("Codespace created for {}", spec.repo), &name)?;
    Ok(ExitCode::SUCCESS)
}

async fn delete(app: &AppContext, name: &str) -> Result<ExitCode> {
    if !app.non_interactive && !app.confirm(&format!("Delete codespace {name}?"), false)? {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }
    let output = service::delete(&app.gh, name).await?;
    app.renderer()
        .render_action(&format!("Codespace {name} deleted"), &output)?;
    Ok(ExitCode::SUCCESS)
}

/// Show a spinner around a long `gh` call when a terminal is attached.
async fn with_spinner<T>(
    app: &AppContext,
    msg: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let pb = (app.output.show_progress() && !app.is_json()).then(|| progress::spinner(msg));
    let result = fut.await;
    if let Some(pb) = pb {
        match &result {
            Ok(_) => pb.finish_and_clear(),
            Err(_) => progress::finish_error(&pb, msg),
        }
    }
    result
}
