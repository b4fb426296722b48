//! Application layer: port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` and `csm_common`, never on
//! `crate::infra`, `crate::commands`, or `crate::output`.

pub mod ports;
pub mod services;

pub use ports::{
    CodespaceLifecycle, CodespaceLister, CodespaceSpec, CommandRunner, ConfigStore,
    ProgressReporter, RemoteShell, RepoSpec, RepositoryOps,
};
