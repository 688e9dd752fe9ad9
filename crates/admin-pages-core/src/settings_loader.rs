//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `ADMIN_PAGES_SECRET_KEY` | `secret_key` |
//! | `ADMIN_PAGES_DEBUG` | `debug` |
//! | `ADMIN_PAGES_ALLOWED_HOSTS` | `allowed_hosts` (comma-separated) |
//! | `ADMIN_PAGES_INSTALLED_APPS` | `installed_apps` (comma-separated) |
//! | `ADMIN_PAGES_LOG_LEVEL` | `log_level` |
//! | `ADMIN_PAGES_ADMIN_URL` | `admin_url` |
//! | `DEFAULT_CUSTOM_ADMIN_PATH` | `extra["DEFAULT_CUSTOM_ADMIN_PATH"]` |
//! | `CUSTOM_ADMIN_DEFAULT_APP_LABEL` | `extra["CUSTOM_ADMIN_DEFAULT_APP_LABEL"]` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use admin_pages_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("test_proj.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::AdminError;
use crate::settings::Settings;

/// App-specific settings that may be overridden from the environment.
const EXTRA_ENV_KEYS: &[&str] = &["DEFAULT_CUSTOM_ADMIN_PATH", "CUSTOM_ADMIN_DEFAULT_APP_LABEL"];

/// Loads settings from a TOML string.
///
/// Any field missing from the TOML keeps its default value. App-specific
/// settings go in an `[extra]` table.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, AdminError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| AdminError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, AdminError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        AdminError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, AdminError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, AdminError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| AdminError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, AdminError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        AdminError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// See the module documentation for the supported variables.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("ADMIN_PAGES_SECRET_KEY") {
        settings.secret_key = val;
    }

    if let Ok(val) = std::env::var("ADMIN_PAGES_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("ADMIN_PAGES_ALLOWED_HOSTS") {
        settings.allowed_hosts = split_list(&val);
    }

    if let Ok(val) = std::env::var("ADMIN_PAGES_INSTALLED_APPS") {
        settings.installed_apps = split_list(&val);
    }

    if let Ok(val) = std::env::var("ADMIN_PAGES_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("ADMIN_PAGES_ADMIN_URL") {
        settings.admin_url = val;
    }

    for key in EXTRA_ENV_KEYS {
        if let Ok(val) = std::env::var(key) {
            settings
                .extra
                .insert((*key).to_string(), serde_json::Value::String(val));
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Merges a parsed document over the serialized defaults and deserializes it.
fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, AdminError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        AdminError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        AdminError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
