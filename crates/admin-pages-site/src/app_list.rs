//! Navigation entries.
//!
//! The admin index and sidebar are driven by a list of [`AppEntry`] groups,
//! each holding [`ModelEntry`] rows. Native model admins and custom views
//! produce the same shapes, so a template or JSON client renders both alike.

use serde::{Deserialize, Serialize};

/// One navigable page inside an app group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Display name.
    pub name: String,
    /// Model class name, or the display name for custom views.
    pub object_name: String,
    /// Absolute admin URL of the page.
    pub admin_url: String,
    /// URL of the "add" page, when the user may add objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_url: Option<String>,
    /// Whether the user may only view, not change.
    pub view_only: bool,
}

impl ModelEntry {
    /// Builds the entry for a custom view.
    ///
    /// Custom views have no add page and are always view-only.
    pub fn custom_view(name: impl Into<String>, admin_url: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            object_name: name.clone(),
            name,
            admin_url: admin_url.into(),
            add_url: None,
            view_only: true,
        }
    }
}

/// A navigation group, usually one per app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    /// Display name of the group.
    pub name: String,
    /// Label of the app the group belongs to.
    pub app_label: String,
    /// URL of the group's index page.
    pub app_url: String,
    /// Pages in the group.
    pub models: Vec<ModelEntry>,
}

impl AppEntry {
    /// Creates an empty group.
    pub fn new(
        name: impl Into<String>,
        app_label: impl Into<String>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            app_label: app_label.into(),
            app_url: app_url.into(),
            models: Vec::new(),
        }
    }

    /// Sorts the group's pages by display name.
    pub fn sort_models(&mut self) {
        self.models.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// Sorts groups by display name. Equal names keep their relative order.
pub fn sort_app_list(app_list: &mut [AppEntry]) {
    app_list.sort_by(|a, b| a.name.cmp(&b.name));
}
