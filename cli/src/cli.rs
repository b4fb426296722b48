//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Manage GitHub Codespaces and bootstrap them with language toolchains
#[derive(Parser)]
#[command(
    name = "csm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Assume yes for confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install fragments on a codespace
    Setup(commands::setup::SetupArgs),

    /// List available fragments
    Fragments(commands::fragments::FragmentsArgs),

    /// Manage codespaces
    #[command(subcommand)]
    Codespace(commands::codespace::CodespaceCommand),

    /// Repository helpers
    #[command(subcommand)]
    Repo(commands::repo::RepoCommand),

    /// Pull-request helpers
    #[command(subcommand)]
    Pr(commands::pr::PrCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        })?;

        match command {
            Command::Setup(args) => commands::setup::run(&app, &args).await,
            Command::Fragments(args) => commands::fragments::run(&app, &args),
            Command::Codespace(cmd) => commands::codespace::run(&app, cmd).await,
            Command::Repo(cmd) => commands::repo::run(&app, cmd).await,
            Command::Pr(cmd) => commands::pr::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
