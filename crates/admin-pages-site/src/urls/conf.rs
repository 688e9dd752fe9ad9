//! Routes contributed by custom views.
//!
//! Every registered view adds one route to the [`CustomRouteTable`]. The admin
//! site mounts the table's patterns under the custom admin path when it builds
//! its URL conf, so the table must be complete before that happens.

use std::sync::Arc;

use admin_pages_core::AdminResult;

use super::pattern::path;
use super::resolver::URLEntry;
use crate::registry::RegisteredView;
use crate::views::AdminBaseView;

/// One custom view route.
#[derive(Clone)]
pub struct CustomRoute {
    /// Route relative to the custom admin path, e.g. `"custom_admin_pages/test-name"`.
    pub route: String,
    /// URL name inside the admin namespace.
    pub name: String,
    /// Identity of the view serving the route.
    pub view_id: &'static str,
    pub view: Arc<dyn AdminBaseView>,
}

impl std::fmt::Debug for CustomRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomRoute")
            .field("route", &self.route)
            .field("name", &self.name)
            .field("view_id", &self.view_id)
            .finish_non_exhaustive()
    }
}

/// The accumulated custom view routes, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CustomRouteTable {
    routes: Vec<CustomRoute>,
}

impl CustomRouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the route of a registered view.
    pub fn add_view_to_conf(&mut self, view: &RegisteredView) {
        tracing::trace!(route = %view.url_route(), name = view.route_name(), "added custom route");
        self.routes.push(CustomRoute {
            route: view.url_route(),
            name: view.route_name().to_string(),
            view_id: view.view_id(),
            view: Arc::clone(view.view()),
        });
    }

    /// Removes the route of an unregistered view. Returns whether one was removed.
    pub fn remove_view_from_conf(&mut self, view_id: &str) -> bool {
        let before = self.routes.len();
        self.routes.retain(|r| r.view_id != view_id);
        before != self.routes.len()
    }

    pub fn routes(&self) -> &[CustomRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Builds one named URL pattern per route.
    pub fn url_patterns(&self) -> AdminResult<Vec<URLEntry>> {
        self.routes
            .iter()
            .map(|r| path(&r.route, Some(&r.name)).map(URLEntry::Pattern))
            .collect()
    }
}
