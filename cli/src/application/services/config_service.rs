//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored configuration cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<AppConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &AppConfig) -> Result<()> {
    store.save(config)
}

/// Read one whitelisted setting.
///
/// # Errors
///
/// Returns an error if the key is unknown or the configuration cannot be loaded.
pub fn get_value(store: &impl ConfigStore, key: &str) -> Result<String> {
    load_config(store)?.get(key)
}

/// Validate, apply and persist one setting.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or persistence fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AppConfig> {
    let mut config = load_config(store)?;
    config.set(key, value)?;
    save_config(store, &config)?;
    tracing::debug!(key, value, "configuration updated");
    Ok(config)
}
