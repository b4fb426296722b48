//! Integration tests for the csm CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them reach GitHub: they either fail before any `gh` call or
//! point `gh.path` at a stand-in script.

mod cli_tests;
mod config_command;
#[cfg(unix)]
mod fake_gh;
#[cfg(unix)]
mod setup_command;
