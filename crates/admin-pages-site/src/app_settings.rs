//! Settings and app configuration for custom admin pages.
//!
//! Two settings are recognized, both stored in
//! [`Settings::extra`](admin_pages_core::settings::Settings::extra):
//!
//! | Setting | Default | Meaning |
//! |---|---|---|
//! | `DEFAULT_CUSTOM_ADMIN_PATH` | `""` | Path prefix for custom views inside the admin |
//! | `CUSTOM_ADMIN_DEFAULT_APP_LABEL` | `"custom_admin_pages"` | Label used for views without an `app_label`, and for the "Custom Admin Pages" group |

use admin_pages_core::apps::{AppConfig, AppRegistry, SimpleAppConfig};
use admin_pages_core::{AdminError, AdminResult, Settings};
use serde::{Deserialize, Serialize};

/// Setting name of the custom view path prefix.
pub const DEFAULT_CUSTOM_ADMIN_PATH: &str = "DEFAULT_CUSTOM_ADMIN_PATH";

/// Setting name of the fallback app label.
pub const CUSTOM_ADMIN_DEFAULT_APP_LABEL: &str = "CUSTOM_ADMIN_DEFAULT_APP_LABEL";

/// Label of this app, and the default value of `CUSTOM_ADMIN_DEFAULT_APP_LABEL`.
pub const DEFAULT_APP_LABEL: &str = "custom_admin_pages";

/// Display name of the navigation group holding views with the default label.
pub const CUSTOM_ADMIN_PAGES_NAME: &str = "Custom Admin Pages";

/// The resolved custom admin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAdminSettings {
    /// Path prefix for custom views inside the admin (`DEFAULT_CUSTOM_ADMIN_PATH`).
    pub custom_admin_path: String,
    /// Fallback app label (`CUSTOM_ADMIN_DEFAULT_APP_LABEL`).
    pub default_app_label: String,
}

impl Default for CustomAdminSettings {
    fn default() -> Self {
        Self {
            custom_admin_path: String::new(),
            default_app_label: DEFAULT_APP_LABEL.to_string(),
        }
    }
}

impl CustomAdminSettings {
    /// Reads the custom admin settings, falling back to defaults for unset keys.
    ///
    /// Fails with [`AdminError::ConfigurationError`] if a key is set to
    /// something other than a string.
    pub fn from_settings(settings: &Settings) -> AdminResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            custom_admin_path: read_str(settings, DEFAULT_CUSTOM_ADMIN_PATH)?
                .unwrap_or(defaults.custom_admin_path),
            default_app_label: read_str(settings, CUSTOM_ADMIN_DEFAULT_APP_LABEL)?
                .unwrap_or(defaults.default_app_label),
        })
    }

    /// Sets the custom view path prefix.
    #[must_use]
    pub fn custom_admin_path(mut self, path: impl Into<String>) -> Self {
        self.custom_admin_path = path.into();
        self
    }

    /// Sets the fallback app label.
    #[must_use]
    pub fn default_app_label(mut self, label: impl Into<String>) -> Self {
        self.default_app_label = label.into();
        self
    }
}

fn read_str(settings: &Settings, name: &str) -> AdminResult<Option<String>> {
    match settings.extra.get(name) {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AdminError::ConfigurationError(format!(
            "{name} must be a string, got {other}"
        ))),
    }
}

/// Defines the custom admin settings the project has not defined itself.
///
/// Returns the names of the settings that received their default value.
pub fn apply_default_settings(settings: &mut Settings) -> Vec<&'static str> {
    let defaults = CustomAdminSettings::default();
    let mut applied = Vec::new();
    for (name, value) in [
        (DEFAULT_CUSTOM_ADMIN_PATH, defaults.custom_admin_path),
        (CUSTOM_ADMIN_DEFAULT_APP_LABEL, defaults.default_app_label),
    ] {
        if settings.set_extra_default(name, serde_json::Value::String(value)) {
            tracing::debug!(setting = name, "applied custom admin default");
            applied.push(name);
        }
    }
    applied
}

/// App configuration for custom admin pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomAdminPagesConfig;

impl AppConfig for CustomAdminPagesConfig {
    fn name(&self) -> &str {
        "admin_pages.custom_admin_pages"
    }

    fn verbose_name(&self) -> &str {
        CUSTOM_ADMIN_PAGES_NAME
    }
}

/// Builds the installed-app registry from `settings.installed_apps`.
///
/// The entry whose label is [`DEFAULT_APP_LABEL`] uses
/// [`CustomAdminPagesConfig`]; every other entry becomes a
/// [`SimpleAppConfig`].
pub fn installed_apps(settings: &Settings) -> AdminResult<AppRegistry> {
    let mut registry = AppRegistry::new();
    for name in &settings.installed_apps {
        let app = SimpleAppConfig::new(name.as_str());
        if app.label() == DEFAULT_APP_LABEL {
            registry.register(Box::new(CustomAdminPagesConfig))?;
        } else {
            registry.register(Box::new(app))?;
        }
    }
    Ok(registry)
}
