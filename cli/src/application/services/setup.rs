//! Application service: bootstrap a codespace from selected fragments.
//!
//! Validates the request, composes the script, reports the step plan, then
//! hands the script to the remote executor. Caller errors are returned
//! before any remote call is made.

use std::future::Future;

use csm_common::{OperationStatus, ProgressUpdate};

use crate::application::ports::{ProgressReporter, RemoteShell};
use crate::application::services::remote_exec::{ExecutorOptions, RemoteExecutor};
use crate::domain::error::SetupError;
use crate::domain::execution::{ExecutionResult, Outcome};
use crate::domain::fragment::FragmentLibrary;
use crate::domain::script::compose;
use crate::domain::setup::SetupRequest;

/// Lines placed after the strict-mode header of every setup script.
pub const SCRIPT_PREAMBLE: &[&str] = &["export DEBIAN_FRONTEND=noninteractive"];

/// Run one setup request end to end.
///
/// Progress goes to `reporter`: `Started` at 0%, one `Running` update per
/// planned step, one per remote phase, then `Completed`, `Failed` or
/// `Cancelled`. Percent never decreases.
///
/// # Errors
///
/// Returns `InvalidTarget`, `UnknownFragment` or `EmptySelection` when the
/// request is unusable. Remote failures are reported in the returned
/// `ExecutionResult`.
pub async fn run_setup<S, R, F>(
    shell: &S,
    reporter: &R,
    library: &FragmentLibrary,
    request: &SetupRequest,
    opts: ExecutorOptions,
    cancel: F,
) -> Result<ExecutionResult, SetupError>
where
    S: RemoteShell,
    R: ProgressReporter,
    F: Future<Output = ()>,
{
    request.validate_target()?;
    let ids = request.requested_ids(library);
    let fragments = library.resolve(&ids)?;

    let preamble: Vec<String> = SCRIPT_PREAMBLE.iter().map(|l| (*l).to_string()).collect();
    let script = compose(&fragments, &request.operation_name, &preamble);
    let op_id = operation_id(&script.script_name);
    let selected: Vec<&str> = fragments.iter().map(|f| f.id).collect();
    let total = script.steps.len();

    tracing::info!(
        operation_id = %op_id,
        codespace = %request.target,
        fragments = ?selected,
        "starting setup"
    );

    reporter.notify(
        &ProgressUpdate::new(
            &op_id,
            OperationStatus::Started,
            0,
            format!("{} on {}", request.operation_name, request.target),
        )
        .with_step(0, total)
        .with_data(serde_json::json!({
            "target": request.target,
            "fragments": selected,
            "script_name": script.script_name,
        })),
    );

    for step in &script.steps {
        reporter.notify(
            &ProgressUpdate::new(
                &op_id,
                OperationStatus::Running,
                step.percent,
                format!("Prepared {}", step.label),
            )
            .with_step(step.index, step.total),
        );
    }

    let last_percent = script.steps.last().map_or(0, |s| s.percent);
    let executor = RemoteExecutor::new(shell, opts);
    let result = executor
        .execute(
            &op_id,
            &request.target,
            &script,
            |phase| {
                reporter.notify(
                    &ProgressUpdate::new(
                        &op_id,
                        OperationStatus::Running,
                        last_percent,
                        phase.message(),
                    )
                    .with_step(total, total),
                );
            },
            cancel,
        )
        .await;

    reporter.notify(&final_update(&result, last_percent, total));
    Ok(result)
}

/// Operation id derived from the unique script name.
fn operation_id(script_name: &str) -> String {
    script_name
        .strip_suffix(".sh")
        .unwrap_or(script_name)
        .to_string()
}

fn final_update(result: &ExecutionResult, last_percent: u8, total: usize) -> ProgressUpdate {
    let data = serde_json::json!({
        "outcome": result.outcome.code(),
        "output": result.output_summary(),
        "elapsed_secs": result.elapsed.as_secs_f64(),
    });
    match result.outcome {
        Outcome::Completed => ProgressUpdate::new(
            &result.operation_id,
            OperationStatus::Completed,
            100,
            result.headline(),
        ),
        Outcome::Cancelled => ProgressUpdate::new(
            &result.operation_id,
            OperationStatus::Cancelled,
            last_percent,
            result.headline(),
        ),
        _ => ProgressUpdate::new(
            &result.operation_id,
            OperationStatus::Failed,
            last_percent,
            result.diagnostic(),
        ),
    }
    .with_step(total, total)
    .with_data(data)
}
