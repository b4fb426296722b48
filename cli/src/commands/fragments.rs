//! `csm fragments`: list the built-in fragment catalog.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::fragment::FragmentGroup;

/// Arguments for the fragments command.
#[derive(Args)]
pub struct FragmentsArgs {
    /// Only list one group
    #[arg(long, value_enum)]
    pub group: Option<FragmentGroup>,
}

/// Run the fragments command.
///
/// # Errors
///
/// Returns an error if the listing cannot be rendered.
pub fn run(app: &AppContext, args: &FragmentsArgs) -> Result<ExitCode> {
    let fragments = match args.group {
        Some(group) => app.library.group(group),
        None => app.library.all().iter().collect(),
    };
    app.renderer().render_fragments(&fragments)?;
    Ok(ExitCode::SUCCESS)
}
