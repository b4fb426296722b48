//! JSON output.
//!
//! Every `--json` code path prints exactly one pretty-printed document on
//! stdout. Failures use the error object from [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use csm_common::CodespaceDescriptor;
use serde_json::{Value, json};

use crate::domain::config::AppConfig;
use crate::domain::execution::{ExecutionResult, Outcome, StepState};
use crate::domain::fragment::Fragment;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders domain types as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        emit(&json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_fragments(fragments: &[&Fragment]) -> Result<()> {
        emit(&json!({ "fragments": fragments_value(fragments) }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_codespaces(codespaces: &[CodespaceDescriptor]) -> Result<()> {
        emit(&json!({ "codespaces": codespaces_value(codespaces) }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_setup_result(result: &ExecutionResult) -> Result<()> {
        emit(&setup_result_value(result))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(config: &AppConfig, path: &Path) -> Result<()> {
        emit(&json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_value(key: &str, value: &str) -> Result<()> {
        emit(&json!({ "key": key, "value": value }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_action(message: &str, output: &str) -> Result<()> {
        emit(&json!({
            "success": true,
            "message": message,
            "output": output,
        }))
    }
}

fn emit(value: &Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}

#[must_use]
pub fn fragments_value(fragments: &[&Fragment]) -> Value {
    fragments
        .iter()
        .map(|f| {
            json!({
                "id": f.id,
                "label": f.label,
                "group": f.group,
                "description": f.description,
            })
        })
        .collect()
}

#[must_use]
pub fn codespaces_value(codespaces: &[CodespaceDescriptor]) -> Value {
    codespaces
        .iter()
        .map(|cs| {
            let mut value = json!(cs);
            if let Value::Object(map) = &mut value {
                map.insert("webUrl".into(), json!(cs.web_url()));
                map.insert("hourlyCostEstimate".into(), json!(cs.hourly_cost_estimate()));
            }
            value
        })
        .collect()
}

#[must_use]
pub fn setup_result_value(result: &ExecutionResult) -> Value {
    let exit_code = match result.outcome {
        Outcome::Completed => Some(0),
        Outcome::ExecutionFailed { exit_code } => exit_code,
        _ => None,
    };
    let steps: Vec<Value> = result
        .steps
        .iter()
        .map(|s| {
            json!({
                "index": s.index,
                "label": s.label,
                "state": step_state_code(s.state),
            })
        })
        .collect();
    let diagnostic = (!result.success()).then(|| result.diagnostic());
    json!({
        "operation_id": result.operation_id,
        "target": result.target,
        "script_name": result.script_name,
        "outcome": result.outcome.code(),
        "success": result.success(),
        "exit_code": exit_code,
        "elapsed_secs": result.elapsed.as_secs_f64(),
        "output": result.output_summary(),
        "diagnostic": diagnostic,
        "steps": steps,
    })
}

fn step_state_code(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "completed",
        StepState::Failed => "failed",
        StepState::NotRun => "not_run",
    }
}
