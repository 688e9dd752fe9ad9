//! System checks for custom admin pages.
//!
//! Run these at startup (the demo's `check` command does) to catch
//! configuration mistakes before the first request:
//!
//! | Id | Level | Problem |
//! |---|---|---|
//! | `admin_pages.E001` | Error | A view's route does not reverse in the built URL conf |
//! | `admin_pages.E002` | Error | The default app label is not an installed app |
//! | `admin_pages.E003` | Error | A custom admin setting is not a string |
//! | `admin_pages.W001` | Warning | Two views share a route name |
//! | `admin_pages.W002` | Warning | The URL conf has not been built |
//! | `admin_pages.W003` | Warning | `DEFAULT_CUSTOM_ADMIN_PATH` lacks a trailing `/` |

use std::collections::HashMap;

use admin_pages_core::apps::AppConfig;
use admin_pages_core::apps::SimpleAppConfig;
use admin_pages_core::checks::CheckMessage;
use admin_pages_core::Settings;

use crate::app_settings::{CustomAdminSettings, DEFAULT_CUSTOM_ADMIN_PATH};
use crate::custom_site::CustomAdminSite;

/// Checks the registered views against the site's URL conf.
pub fn check_custom_admin_views(site: &CustomAdminSite) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    let mut by_route_name: HashMap<&str, Vec<&str>> = HashMap::new();
    for view in site.registered_views() {
        by_route_name
            .entry(view.route_name())
            .or_default()
            .push(view.view_name());
    }
    let mut shared: Vec<(&str, Vec<&str>)> = by_route_name
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .collect();
    shared.sort_unstable();
    for (route_name, names) in shared {
        messages.push(CheckMessage::warning(
            format!(
                "Custom admin views {} share the route name '{route_name}'; only the first can be reversed.",
                names.join(", ")
            ),
            Some("Set a distinct route_name on each view."),
            Some(route_name),
            Some("admin_pages.W001"),
        ));
    }

    if site.urlconf().is_none() {
        if !site.registered_views().is_empty() {
            messages.push(CheckMessage::warning(
                "The admin URL conf has not been built; custom admin views cannot be linked yet.",
                Some("Call build_urlconf() after registering every custom view."),
                None,
                Some("admin_pages.W002"),
            ));
        }
        return messages;
    }

    for view in site.registered_views() {
        if site.reverse(view.route_name()).is_err() {
            messages.push(CheckMessage::error(
                format!(
                    "The route '{}' of custom admin view '{}' is not in the admin URL conf.",
                    view.route_name(),
                    view.view_name()
                ),
                Some("Register every custom view before building the admin URL conf."),
                Some(view.view_id()),
                Some("admin_pages.E001"),
            ));
        }
    }

    messages
}

/// Checks the custom admin settings.
pub fn check_custom_admin_settings(settings: &Settings) -> Vec<CheckMessage> {
    let custom = match CustomAdminSettings::from_settings(settings) {
        Ok(custom) => custom,
        Err(err) => {
            return vec![CheckMessage::error(
                err.to_string(),
                Some("Custom admin settings must be strings."),
                None,
                Some("admin_pages.E003"),
            )]
        }
    };

    let mut messages = Vec::new();

    let installed = settings
        .installed_apps
        .iter()
        .any(|name| SimpleAppConfig::new(name.as_str()).label() == custom.default_app_label);
    if !installed {
        messages.push(CheckMessage::error(
            format!(
                "The default custom admin app label '{}' is not an installed app.",
                custom.default_app_label
            ),
            Some("Add the app to installed_apps or change CUSTOM_ADMIN_DEFAULT_APP_LABEL."),
            Some("CUSTOM_ADMIN_DEFAULT_APP_LABEL"),
            Some("admin_pages.E002"),
        ));
    }

    if !custom.custom_admin_path.is_empty() && !custom.custom_admin_path.ends_with('/') {
        messages.push(CheckMessage::warning(
            format!(
                "{DEFAULT_CUSTOM_ADMIN_PATH} '{}' does not end with a slash.",
                custom.custom_admin_path
            ),
            Some("Custom view URLs are appended directly to this path."),
            Some(DEFAULT_CUSTOM_ADMIN_PATH),
            Some("admin_pages.W003"),
        ));
    }

    messages
}
