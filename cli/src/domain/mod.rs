//! Domain layer: pure types, composition, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod execution;
pub mod fragment;
pub mod script;
pub mod setup;

pub use config::{AppConfig, validate_config_key, validate_config_value};
pub use error::{CommandTimedOut, ConfigError, SetupError};
pub use execution::{ExecutionResult, Outcome, StepReport, StepState, summarize_output};
pub use fragment::{Fragment, FragmentGroup, FragmentLibrary};
pub use script::{ComposedScript, PlannedStep, compose};
pub use setup::SetupRequest;
