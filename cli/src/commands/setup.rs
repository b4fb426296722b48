//! `csm setup`: bootstrap a codespace from selected fragments.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tokio::sync::broadcast::error::RecvError;

use crate::app::AppContext;
use crate::application::ports::ProgressReporter;
use crate::application::services::remote_exec::ExecutorOptions;
use crate::application::services::setup::run_setup;
use crate::domain::error::SetupError;
use crate::domain::execution::{ExecutionResult, Outcome};
use crate::domain::setup::{DEFAULT_OPERATION_NAME, SetupRequest};
use crate::infra::broadcast::BroadcastReporter;
use crate::output::{NullReporter, TerminalReporter};

/// Exit status for a run interrupted with Ctrl-C.
pub const EXIT_CANCELLED: u8 = 130;

/// Arguments for the setup command.
#[derive(Args)]
pub struct SetupArgs {
    /// Codespace to set up
    pub codespace: String,

    /// Fragments to install (see `csm fragments`)
    pub fragments: Vec<String>,

    /// Install every AI agent
    #[arg(long)]
    pub ai_agents: bool,

    /// Install shell aliases and dotfiles
    #[arg(long)]
    pub aliases: bool,

    /// Operation name, also used as the remote script prefix
    #[arg(long, default_value = DEFAULT_OPERATION_NAME)]
    pub name: String,

    /// Stream progress updates as JSON lines on stdout
    #[arg(long)]
    pub events: bool,
}

impl SetupArgs {
    fn request(&self) -> SetupRequest {
        let mut request = SetupRequest::new(self.codespace.clone(), self.fragments.clone());
        request.include_ai_agents = self.ai_agents;
        request.include_aliases = self.aliases;
        request.operation_name.clone_from(&self.name);
        request
    }
}

/// Run the setup command.
///
/// # Errors
///
/// Returns an error if the request is invalid (no remote call is made) or
/// the result cannot be rendered.
pub async fn run(app: &AppContext, args: &SetupArgs) -> Result<ExitCode> {
    let request = args.request();

    let result = if args.events {
        run_with_events(app, &request).await?
    } else if app.is_json() {
        execute(app, &NullReporter, &request).await?
    } else {
        execute(app, &TerminalReporter::new(&app.output), &request).await?
    };

    if !args.events {
        app.renderer().render_setup_result(&result)?;
    }
    Ok(exit_code(&result.outcome))
}

async fn execute<R: ProgressReporter>(
    app: &AppContext,
    reporter: &R,
    request: &SetupRequest,
) -> Result<ExecutionResult, SetupError> {
    run_setup(
        &app.gh,
        reporter,
        &app.library,
        request,
        ExecutorOptions::from(&app.config.setup),
        interrupted(),
    )
    .await
}

/// Feed updates through a broadcast channel to a printer task.
async fn run_with_events(app: &AppContext, request: &SetupRequest) -> Result<ExecutionResult> {
    let reporter = BroadcastReporter::default();
    let mut rx = reporter.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(update) => match serde_json::to_string(&update) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!(error = %e, "cannot serialize progress update"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "progress printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = execute(app, &reporter, request).await;
    // Closing the last sender ends the printer loop.
    drop(reporter);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "progress printer failed");
    }
    Ok(result?)
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Process exit status for a finished run.
#[must_use]
pub fn exit_code(outcome: &Outcome) -> ExitCode {
    match outcome {
        Outcome::Completed => ExitCode::SUCCESS,
        Outcome::Cancelled => ExitCode::from(EXIT_CANCELLED),
        _ => ExitCode::FAILURE,
    }
}
