//! The shared context every admin page renders with.

use serde::Serialize;

use crate::app_list::AppEntry;

/// Values common to every admin page.
///
/// Custom views receive this on their [`AdminRequest`](crate::request::AdminRequest)
/// so they can render the same header and sidebar as the native admin.
#[derive(Debug, Clone, Serialize)]
pub struct AdminContext {
    /// The `<title>` suffix.
    pub site_title: String,
    /// The header shown on every page.
    pub site_header: String,
    /// URL of the "View site" link.
    pub site_url: String,
    /// Whether the user may access the admin index.
    pub has_permission: bool,
    /// Whether the navigation sidebar is shown.
    pub is_nav_sidebar_enabled: bool,
    /// The navigation the user may see, custom views included.
    pub available_apps: Vec<AppEntry>,
}
