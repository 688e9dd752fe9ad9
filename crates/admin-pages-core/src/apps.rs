//! Application registry.
//!
//! This module provides the [`AppConfig`] trait and [`AppRegistry`], which
//! together describe the installed applications. The admin site uses the
//! registry to validate app labels and to name navigation groups.

use std::collections::HashMap;

use crate::error::{AdminError, AdminResult};
use crate::settings::Settings;
use crate::utils::text::title_case;

/// Configuration for an installed application.
///
/// # Examples
///
/// ```
/// use admin_pages_core::apps::AppConfig;
///
/// struct Notifications;
///
/// impl AppConfig for Notifications {
///     fn name(&self) -> &str { "backoffice.notifications" }
///     fn verbose_name(&self) -> &str { "Notifications" }
/// }
///
/// assert_eq!(Notifications.label(), "notifications");
/// ```
pub trait AppConfig: Send + Sync {
    /// Returns the full dotted path of the application.
    fn name(&self) -> &str;

    /// Returns a short label derived from the name (the last component).
    ///
    /// For example, `"admin_pages.custom_admin_pages"` yields `"custom_admin_pages"`.
    fn label(&self) -> &str {
        self.name().rsplit('.').next().unwrap_or_else(|| self.name())
    }

    /// Returns a human-readable name for the application.
    fn verbose_name(&self) -> &str {
        self.name()
    }

    /// Called once after all apps have been registered.
    fn ready(&self) {}
}

/// An [`AppConfig`] built from a dotted path in `installed_apps`.
///
/// The verbose name defaults to the title-cased label, so
/// `"another_test_app"` is shown as "Another Test App".
#[derive(Debug, Clone)]
pub struct SimpleAppConfig {
    name: String,
    label: String,
    verbose_name: String,
}

impl SimpleAppConfig {
    /// Creates a config for the given dotted path.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let label = name.rsplit('.').next().unwrap_or(&name).to_string();
        let verbose_name = title_case(&label.replace('_', " "));
        Self {
            name,
            label,
            verbose_name,
        }
    }

    /// Overrides the verbose name.
    #[must_use]
    pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = verbose_name.into();
        self
    }
}

impl AppConfig for SimpleAppConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn verbose_name(&self) -> &str {
        &self.verbose_name
    }
}

/// The registry of installed applications.
///
/// Applications are registered via [`register`](AppRegistry::register) and then
/// [`populate`](AppRegistry::populate) is called once to finalize initialization
/// (calling each app's `ready()` method).
pub struct AppRegistry {
    apps: Vec<Box<dyn AppConfig>>,
    app_labels: HashMap<String, usize>,
    ready: bool,
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRegistry")
            .field("labels", &self.labels())
            .field("ready", &self.ready)
            .finish()
    }
}

impl AppRegistry {
    /// Creates a new, empty `AppRegistry`.
    pub fn new() -> Self {
        Self {
            apps: Vec::new(),
            app_labels: HashMap::new(),
            ready: false,
        }
    }

    /// Builds a registry from `settings.installed_apps`.
    ///
    /// Every dotted path becomes a [`SimpleAppConfig`]. Apps that need a
    /// custom config can be registered with [`register`](Self::register)
    /// before listing the remaining paths here.
    pub fn from_settings(settings: &Settings) -> AdminResult<Self> {
        let mut registry = Self::new();
        for name in &settings.installed_apps {
            registry.register(Box::new(SimpleAppConfig::new(name.as_str())))?;
        }
        Ok(registry)
    }

    /// Registers an application.
    ///
    /// Fails if an application with the same label is already registered,
    /// or if [`populate`](AppRegistry::populate) has already been called.
    pub fn register(&mut self, app: Box<dyn AppConfig>) -> AdminResult<()> {
        if self.ready {
            return Err(AdminError::ImproperlyConfigured(
                "Cannot register apps after the registry has been populated".to_string(),
            ));
        }

        let label = app.label().to_string();
        if self.app_labels.contains_key(&label) {
            return Err(AdminError::ImproperlyConfigured(format!(
                "Application labels aren't unique, duplicates: {label}"
            )));
        }

        let index = self.apps.len();
        self.app_labels.insert(label, index);
        self.apps.push(app);
        Ok(())
    }

    /// Returns the configuration for the app with the given label, if registered.
    pub fn get_app_config(&self, label: &str) -> Option<&dyn AppConfig> {
        self.app_labels
            .get(label)
            .map(|&idx| self.apps[idx].as_ref())
    }

    /// Returns `true` if an app with the given label is installed.
    pub fn is_installed(&self, label: &str) -> bool {
        self.app_labels.contains_key(label)
    }

    /// Returns all registered app configurations in registration order.
    pub fn get_app_configs(&self) -> &[Box<dyn AppConfig>] {
        &self.apps
    }

    /// Returns the labels of all registered apps in registration order.
    pub fn labels(&self) -> Vec<&str> {
        self.apps.iter().map(|app| app.label()).collect()
    }

    /// Finalizes the registry by calling `ready()` on each app in registration order.
    pub fn populate(&mut self) -> AdminResult<()> {
        if self.ready {
            return Err(AdminError::ImproperlyConfigured(
                "AppRegistry has already been populated".to_string(),
            ));
        }

        for app in &self.apps {
            tracing::debug!(app = app.name(), "app ready");
            app.ready();
        }

        self.ready = true;
        Ok(())
    }

    /// Returns `true` if the registry has been populated.
    pub const fn is_ready(&self) -> bool {
        self.ready
    }
}
