//! Command implementations

pub mod codespace;
pub mod config;
pub mod fragments;
pub mod pr;
pub mod repo;
pub mod setup;
pub mod version;
