//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! `gh` adapter, configuration persistence, and progress fan-out.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod broadcast;
pub mod command_runner;
pub mod config;
pub mod gh;
