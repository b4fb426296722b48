//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::time::Duration;

use thiserror::Error;

// ── Setup errors ──────────────────────────────────────────────────────────────

/// Caller and registration errors for the bootstrap engine.
///
/// These are raised before any remote interaction. Remote failures are
/// reported through `ExecutionResult` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("Unknown fragment '{0}'. Run 'csm fragments' to list available fragments.")]
    UnknownFragment(String),

    #[error("Nothing to set up: select at least one fragment, --ai-agents or --aliases.")]
    EmptySelection,

    #[error("Invalid target codespace name: '{0}'")]
    InvalidTarget(String),

    #[error("Fragment '{0}' is registered more than once.")]
    DuplicateFragment(String),

    #[error("Fragment '{id}' contains the reserved transfer terminator line '{sentinel}'.")]
    SentinelCollision { id: String, sentinel: String },

    #[error("Fragment '{id}' has a label that cannot be echoed safely: {label:?}")]
    UnsafeLabel { id: String, label: String },
}

impl SetupError {
    /// Stable machine-readable code for JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownFragment(_) => "unknown_fragment",
            Self::EmptySelection => "empty_selection",
            Self::InvalidTarget(_) => "invalid_target",
            Self::DuplicateFragment(_)
            | Self::SentinelCollision { .. }
            | Self::UnsafeLabel { .. } => "invalid_catalog",
        }
    }
}

// ── Process errors ────────────────────────────────────────────────────────────

/// A spawned command exceeded its wall-clock budget and was killed.
///
/// Carried inside `anyhow::Error` so callers can tell a timeout apart from
/// other runner failures with `downcast_ref`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{program} timed out after {}s", .after.as_secs())]
pub struct CommandTimedOut {
    pub program: String,
    pub after: Duration,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
