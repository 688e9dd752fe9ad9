//! Settings for an admin-pages project.
//!
//! [`Settings`] holds the configuration the admin site and its custom pages
//! read at startup. It is constructed once (from defaults, a file, or the
//! environment, see [`settings_loader`](crate::settings_loader)) and passed by
//! reference to whoever needs it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete set of project settings.
///
/// Values that only one app cares about live in [`extra`](Settings::extra),
/// keyed by their upper-case setting name.
///
/// # Examples
///
/// ```
/// use admin_pages_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.admin_url, "admin/");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The secret key used for cryptographic signing.
    pub secret_key: String,
    /// Hostnames that this application can serve.
    pub allowed_hosts: Vec<String>,
    /// Installed application dotted paths. The label of each app is the last
    /// path component.
    pub installed_apps: Vec<String>,

    // ── Admin ────────────────────────────────────────────────────────

    /// Path prefix the admin site is mounted under (e.g. `"admin/"`).
    pub admin_url: String,
    /// Text shown at the top of every admin page.
    pub site_header: String,
    /// Text used in the admin page titles.
    pub site_title: String,
    /// URL of the "View site" link.
    pub site_url: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level filter (e.g. "info", "debug", "`admin_pages_site=trace`").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// App-specific settings, keyed by setting name.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            secret_key: String::new(),
            allowed_hosts: Vec::new(),
            installed_apps: Vec::new(),

            admin_url: "admin/".to_string(),
            site_header: "Site administration".to_string(),
            site_title: "Site admin".to_string(),
            site_url: "/".to_string(),

            log_level: "info".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns `true` if the named app-specific setting is defined.
    pub fn has_extra(&self, name: &str) -> bool {
        self.extra.contains_key(name)
    }

    /// Returns the named app-specific setting as a string, if it is one.
    pub fn extra_str(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(serde_json::Value::as_str)
    }

    /// Defines an app-specific setting unless the project already has.
    ///
    /// Returns `true` if the default was applied.
    pub fn set_extra_default(&mut self, name: &str, value: serde_json::Value) -> bool {
        if self.extra.contains_key(name) {
            return false;
        }
        self.extra.insert(name.to_string(), value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert!(s.secret_key.is_empty());
        assert!(s.installed_apps.is_empty());
        assert_eq!(s.admin_url, "admin/");
        assert_eq!(s.site_header, "Site administration");
        assert_eq!(s.site_url, "/");
        assert_eq!(s.log_level, "info");
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_extra_str() {
        let mut s = Settings::default();
        s.extra
            .insert("SOME_PATH".to_string(), serde_json::json!("pages/"));
        s.extra.insert("SOME_NUMBER".to_string(), serde_json::json!(3));
        assert_eq!(s.extra_str("SOME_PATH"), Some("pages/"));
        assert_eq!(s.extra_str("SOME_NUMBER"), None);
        assert_eq!(s.extra_str("MISSING"), None);
    }

    #[test]
    fn test_set_extra_default_keeps_project_value() {
        let mut s = Settings::default();
        s.extra
            .insert("SOME_PATH".to_string(), serde_json::json!("mine/"));
        assert!(!s.set_extra_default("SOME_PATH", serde_json::json!("")));
        assert_eq!(s.extra_str("SOME_PATH"), Some("mine/"));

        assert!(s.set_extra_default("OTHER", serde_json::json!("x")));
        assert!(s.has_extra("OTHER"));
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let s = Settings::default();
        let value = serde_json::to_value(&s).unwrap();
        let back: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(back.admin_url, s.admin_url);
    }
}
