//! Presentation-layer implementations of `ProgressReporter`.
//!
//! `TerminalReporter` draws a percent bar on a TTY and falls back to one
//! line per update elsewhere. Terminal statuses only close the bar; the
//! command renders the final result itself.

use std::cell::OnceCell;

use csm_common::{OperationStatus, ProgressUpdate};
use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - TTY and not quiet: a single indicatif bar tracking `percent`
/// - otherwise: `"  → [ 33%] {message}"` per update (suppressed when quiet)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    bar: OnceCell<ProgressBar>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            bar: OnceCell::new(),
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn notify(&self, update: &ProgressUpdate) {
        if self.ctx.quiet {
            return;
        }
        if self.ctx.show_progress() {
            let bar = self.bar.get_or_init(|| progress::percent_bar(&update.message));
            bar.set_position(u64::from(update.percent));
            bar.set_message(update.message.clone());
            if update.status.is_terminal() {
                bar.finish_and_clear();
            }
            return;
        }
        match update.status {
            OperationStatus::Started => self.ctx.header(&update.message),
            OperationStatus::Running => {
                println!(
                    "  {} [{:>3}%] {}",
                    "→".style(self.ctx.styles.info),
                    update.percent,
                    update.message
                );
            }
            OperationStatus::Completed | OperationStatus::Failed | OperationStatus::Cancelled => {}
        }
    }
}

/// Reporter that discards every update (JSON mode).
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn notify(&self, _update: &ProgressUpdate) {}
}
