//! Domain types and validators for csm configuration.
//!
//! Pure functions only. No I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "codespace.default_branch",
    "codespace.machine_type",
    "codespace.region",
    "repository.visibility",
    "setup.transfer_timeout_secs",
    "setup.verify_timeout_secs",
    "setup.execute_timeout_secs",
    "setup.cleanup_timeout_secs",
    "gh.path",
];
pub const VALID_VISIBILITIES: &[&str] = &["private", "public", "internal"];

const TIMEOUT_KEYS: &[&str] = &[
    "setup.transfer_timeout_secs",
    "setup.verify_timeout_secs",
    "setup.execute_timeout_secs",
    "setup.cleanup_timeout_secs",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.config/codespaces-manager/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub codespace: CodespaceDefaults,
    pub repository: RepositoryDefaults,
    pub setup: SetupTimeouts,
    pub gh: GhConfig,
}

/// Defaults for `codespace create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodespaceDefaults {
    pub default_branch: String,
    pub machine_type: String,
    pub region: String,
}

impl Default for CodespaceDefaults {
    fn default() -> Self {
        Self {
            default_branch: "main".to_string(),
            machine_type: "basicLinux32gb".to_string(),
            region: "EuropeWest".to_string(),
        }
    }
}

/// Defaults for `repo create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RepositoryDefaults {
    /// `private` (default), `public` or `internal`.
    pub visibility: String,
}

impl Default for RepositoryDefaults {
    fn default() -> Self {
        Self {
            visibility: "private".to_string(),
        }
    }
}

/// Per-phase time budgets for remote setup, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SetupTimeouts {
    pub transfer_timeout_secs: u64,
    pub verify_timeout_secs: u64,
    pub execute_timeout_secs: u64,
    pub cleanup_timeout_secs: u64,
}

impl Default for SetupTimeouts {
    fn default() -> Self {
        Self {
            transfer_timeout_secs: 120,
            verify_timeout_secs: 60,
            execute_timeout_secs: 600,
            cleanup_timeout_secs: 30,
        }
    }
}

/// Location of the GitHub CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GhConfig {
    pub path: String,
}

impl Default for GhConfig {
    fn default() -> Self {
        Self {
            path: "gh".to_string(),
        }
    }
}

impl AppConfig {
    /// Current value of a whitelisted key, rendered as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not in the allowed list.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "codespace.default_branch" => self.codespace.default_branch.clone(),
            "codespace.machine_type" => self.codespace.machine_type.clone(),
            "codespace.region" => self.codespace.region.clone(),
            "repository.visibility" => self.repository.visibility.clone(),
            "setup.transfer_timeout_secs" => self.setup.transfer_timeout_secs.to_string(),
            "setup.verify_timeout_secs" => self.setup.verify_timeout_secs.to_string(),
            "setup.execute_timeout_secs" => self.setup.execute_timeout_secs.to_string(),
            "setup.cleanup_timeout_secs" => self.setup.cleanup_timeout_secs.to_string(),
            "gh.path" => self.gh.path.clone(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Validate and apply `key = value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "codespace.default_branch" => self.codespace.default_branch = value.to_string(),
            "codespace.machine_type" => self.codespace.machine_type = value.to_string(),
            "codespace.region" => self.codespace.region = value.to_string(),
            "repository.visibility" => self.repository.visibility = value.to_string(),
            "setup.transfer_timeout_secs" => {
                self.setup.transfer_timeout_secs = parse_secs(key, value)?;
            }
            "setup.verify_timeout_secs" => {
                self.setup.verify_timeout_secs = parse_secs(key, value)?;
            }
            "setup.execute_timeout_secs" => {
                self.setup.execute_timeout_secs = parse_secs(key, value)?;
            }
            "setup.cleanup_timeout_secs" => {
                self.setup.cleanup_timeout_secs = parse_secs(key, value)?;
            }
            "gh.path" => self.gh.path = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> anyhow::Error {
    ConfigError::UnknownKey {
        key: key.to_string(),
        valid: VALID_CONFIG_KEYS.join(", "),
    }
    .into()
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: "a positive number of seconds".to_string(),
        }
        .into()),
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(unknown_key(key));
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    if key == "repository.visibility" {
        if !VALID_VISIBILITIES.contains(&value) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: VALID_VISIBILITIES.join(", "),
            }
            .into());
        }
    } else if TIMEOUT_KEYS.contains(&key) {
        parse_secs(key, value)?;
    } else if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: "a non-empty value without spaces".to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
