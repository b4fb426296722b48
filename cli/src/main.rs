//! csm - Manage GitHub Codespaces and bootstrap them over SSH

use std::process::ExitCode;

use clap::Parser;
use csm_cli::cli::Cli;
use csm_cli::domain::error::SetupError;
use csm_cli::output::json::format_error;
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `CSM_LOG=csm_cli=debug`.
const LOG_ENV: &str = "CSM_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json {
                let code = e.downcast_ref::<SetupError>().map_or("error", SetupError::code);
                match format_error(&format!("{e:#}"), code) {
                    Ok(text) => println!("{text}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
