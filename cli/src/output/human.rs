//! Human-readable terminal renderer.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use csm_common::CodespaceDescriptor;
use owo_colors::OwoColorize as _;

use crate::domain::config::{AppConfig, VALID_CONFIG_KEYS};
use crate::domain::execution::{ExecutionResult, Outcome, StepState};
use crate::domain::fragment::{Fragment, FragmentGroup};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("csm {version}");
    }

    /// Render the fragment catalog grouped by kind, in canonical order.
    pub fn render_fragments(&self, fragments: &[&Fragment]) {
        let mut first = true;
        for group in [FragmentGroup::Language, FragmentGroup::AiAgent, FragmentGroup::Tooling] {
            let members: Vec<_> = fragments.iter().filter(|f| f.group == group).collect();
            if members.is_empty() {
                continue;
            }
            if !first {
                println!();
            }
            first = false;
            println!("  {}", group.title().style(self.ctx.styles.header));
            for f in members {
                println!(
                    "    {:<12} {:<20} {}",
                    f.id.style(self.ctx.styles.ident),
                    f.label,
                    f.description.style(self.ctx.styles.dim)
                );
            }
        }
        if !self.ctx.quiet {
            println!("\nRun: csm setup <codespace> <fragment>...");
        }
    }

    /// Render the codespace table.
    pub fn render_codespaces(&self, codespaces: &[CodespaceDescriptor]) {
        if codespaces.is_empty() {
            if !self.ctx.quiet {
                println!(
                    "No codespaces found. Create one: csm codespace create --repo <owner/name>"
                );
            }
            return;
        }
        println!(
            "  {:<36} {:<13} {:<28} {:<18} {:<9} {}",
            "NAME".style(self.ctx.styles.bold),
            "STATE".style(self.ctx.styles.bold),
            "REPOSITORY".style(self.ctx.styles.bold),
            "MACHINE".style(self.ctx.styles.bold),
            "COST".style(self.ctx.styles.bold),
            "LAST USED".style(self.ctx.styles.bold),
        );
        let now = Utc::now();
        for cs in codespaces {
            let state = cs.state.to_string();
            println!(
                "  {:<36} {:<13} {:<28} {:<18} {:<9} {}",
                cs.name,
                state.style(self.ctx.styles.state(cs.state)),
                cs.repository,
                cs.machine_name,
                format_cost(cs.hourly_cost_estimate()),
                format_last_used(cs.last_used_at.as_deref(), now)
            );
        }
    }

    /// Render the outcome of a setup run.
    pub fn render_setup_result(&self, result: &ExecutionResult) {
        let elapsed = format_elapsed(result.elapsed);
        if result.success() {
            self.ctx
                .success(&format!("Setup completed on {} in {elapsed}", result.target));
        } else {
            self.ctx.error(&format!(
                "Setup on {} {} after {elapsed}",
                result.target,
                result.headline()
            ));
        }

        if !self.ctx.quiet {
            for step in &result.steps {
                let marker = step_marker(step.state);
                let style = match step.state {
                    StepState::Completed => self.ctx.styles.success,
                    StepState::Failed => self.ctx.styles.error,
                    StepState::NotRun => self.ctx.styles.dim,
                };
                println!("    {} {}", marker.style(style), step.label);
            }
        }

        let body = if result.success() {
            result.output_summary()
        } else {
            result.diagnostic()
        };
        if body.is_empty() || (result.success() && self.ctx.quiet) {
            return;
        }
        println!();
        for line in body.lines() {
            println!("    {}", line.style(self.ctx.styles.dim));
        }
        if matches!(result.outcome, Outcome::ExecutionFailed { .. }) && !self.ctx.quiet {
            println!();
            self.ctx.info(&format!(
                "Script kept on the codespace for inspection: ~/{}",
                result.script_name
            ));
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &AppConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for key in VALID_CONFIG_KEYS {
            let value = config.get(key).unwrap_or_default();
            println!("  {:<30} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["CSM_CONFIG", "CSM_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render a single configuration value.
    pub fn render_config_value(&self, _key: &str, value: &str) {
        println!("{value}");
    }

    /// Render the result of a passthrough `gh` action.
    pub fn render_action(&self, message: &str, output: &str) {
        self.ctx.success(message);
        if !output.is_empty() {
            println!("{output}");
        }
    }
}

/// `42s`, `3m 07s`, `1h 02m`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m {:02}s", secs / 60, secs % 60),
        _ => format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60),
    }
}

/// Marker shown before a step label.
#[must_use]
pub fn step_marker(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "✓",
        StepState::Failed => "✗",
        StepState::NotRun => "·",
    }
}

/// `$0.36/h`.
#[must_use]
pub fn format_cost(per_hour: f64) -> String {
    format!("${per_hour:.2}/h")
}

/// Coarse age of an RFC 3339 timestamp: `just now`, `5m ago`, `3h ago`, `2d ago`.
#[must_use]
pub fn format_last_used(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(at) = timestamp.and_then(|t| DateTime::parse_from_rfc3339(t).ok()) else {
        return "-".to_string();
    };
    let age = now.signed_duration_since(at.with_timezone(&Utc));
    match age.num_minutes() {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => format!("{m}m ago"),
        m if m < 60 * 24 => format!("{}h ago", m / 60),
        m => format!("{}d ago", m / (60 * 24)),
    }
}
