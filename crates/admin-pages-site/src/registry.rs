//! The custom view registry.
//!
//! [`ViewRegistry`] validates views, resolves their derived route values and
//! keeps them in registration order. Registration and unregistration of a batch
//! are all-or-nothing: every item is checked before any is applied.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use admin_pages_auth::UserPermissions;
use admin_pages_core::apps::AppRegistry;
use admin_pages_core::utils::text::{get_valid_filename, slugify};
use admin_pages_core::{AdminError, AdminResult};

use crate::views::{user_has_permission, AdminBaseView, ViewRef};

/// A validated view with its route values resolved.
#[derive(Clone)]
pub struct RegisteredView {
    view_id: &'static str,
    view_name: String,
    route_name: String,
    route_path: String,
    app_label: String,
    permission_required: Vec<String>,
    view: Arc<dyn AdminBaseView>,
}

impl RegisteredView {
    /// Validates `view` and resolves its route values.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ImproperlyConfigured`] if the view has no
    /// `view_name`, if its name has no filename-safe form, or if its
    /// `app_label` is not an installed app.
    pub fn resolve(
        view: Arc<dyn AdminBaseView>,
        apps: &AppRegistry,
        default_app_label: &str,
    ) -> AdminResult<Self> {
        let view_id = view.view_id();
        let view_name = match view.view_name() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => {
                return Err(AdminError::ImproperlyConfigured(format!(
                    "{view_id} must have view_name set as a non-empty string."
                )))
            }
        };

        let app_label = match non_empty(view.app_label()) {
            Some(label) if !apps.is_installed(label) => {
                return Err(AdminError::ImproperlyConfigured(format!(
                    "{view_id}.app_label is '{label}', which is not an installed app. Installed apps: {}",
                    apps.labels().join(", ")
                )))
            }
            Some(label) => label.to_string(),
            None => default_app_label.to_string(),
        };

        let route_path = non_empty(view.route_path().map(|p| p.trim_start_matches('/')))
            .map_or_else(|| slugify(&view_name), String::from);
        if route_path.is_empty() {
            return Err(AdminError::ImproperlyConfigured(format!(
                "{view_id} has no usable route_path: '{view_name}' has no letters or digits to build one from. Set route_path."
            )));
        }
        if let Some(c) = route_path.chars().find(|c| !is_route_char(*c)) {
            return Err(AdminError::ImproperlyConfigured(format!(
                "{view_id}.route_path '{route_path}' contains '{c}'; use ASCII letters, digits, '-', '_', '.' and '/' only."
            )));
        }
        let route_name = match non_empty(view.route_name()) {
            Some(name) => name.to_string(),
            None => get_valid_filename(&view_name)?.to_lowercase(),
        };
        let permission_required = view
            .permission_required()
            .iter()
            .map(|p| (*p).to_string())
            .collect();

        Ok(Self {
            view_id,
            view_name,
            route_name,
            route_path,
            app_label,
            permission_required,
            view,
        })
    }

    pub const fn view_id(&self) -> &'static str {
        self.view_id
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    pub fn route_path(&self) -> &str {
        &self.route_path
    }

    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    pub fn permission_required(&self) -> &[String] {
        &self.permission_required
    }

    /// The view itself.
    pub fn view(&self) -> &Arc<dyn AdminBaseView> {
        &self.view
    }

    /// The view's route relative to the custom admin path: `"{app_label}/{route_path}"`.
    pub fn url_route(&self) -> String {
        format!("{}/{}", self.app_label, self.route_path)
    }

    /// Whether `user` may see and open the view.
    pub fn user_has_permission(&self, user: &dyn UserPermissions) -> bool {
        let perms: Vec<&str> = self.permission_required.iter().map(String::as_str).collect();
        user_has_permission(user, &perms)
    }
}

impl fmt::Debug for RegisteredView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredView")
            .field("view_id", &self.view_id)
            .field("view_name", &self.view_name)
            .field("route_name", &self.route_name)
            .field("route_path", &self.route_path)
            .field("app_label", &self.app_label)
            .field("permission_required", &self.permission_required)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Characters a route path may contain and still be mounted and matched
/// literally by the router.
const fn is_route_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '~')
}

/// Unwraps a [`ViewRef`] into an admin view, rejecting anything else.
fn admin_view(view_ref: ViewRef) -> AdminResult<Arc<dyn AdminBaseView>> {
    match view_ref {
        ViewRef::Admin(view) => Ok(view),
        ViewRef::Class(view) => Err(AdminError::ImproperlyConfigured(format!(
            "Only class-based views implementing AdminBaseView can be registered; {} does not.",
            view.view_id()
        ))),
        ViewRef::Function(_) => Err(AdminError::ImproperlyConfigured(
            "view_or_iterable must be a class-based view or iterable".to_string(),
        )),
    }
}

/// The registered custom views, in registration order.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: Vec<RegisteredView>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one view or a batch.
    ///
    /// Returns the newly registered views. Nothing is registered if any item
    /// fails validation or is already registered, including twice within the
    /// batch.
    pub fn register<I>(
        &mut self,
        views: I,
        apps: &AppRegistry,
        default_app_label: &str,
    ) -> AdminResult<Vec<RegisteredView>>
    where
        I: IntoIterator<Item = ViewRef>,
    {
        let mut batch: Vec<RegisteredView> = Vec::new();
        for view_ref in views {
            let view = admin_view(view_ref)?;
            let resolved = RegisteredView::resolve(view, apps, default_app_label)?;
            let id = resolved.view_id();
            if self.is_registered(id) || batch.iter().any(|v| v.view_id() == id) {
                return Err(AdminError::AlreadyRegistered(format!(
                    "View: {} is already registered.",
                    resolved.view_name()
                )));
            }
            batch.push(resolved);
        }

        for view in &batch {
            tracing::debug!(
                view = view.view_id(),
                route_name = view.route_name(),
                app_label = view.app_label(),
                "registered custom admin view"
            );
        }
        self.views.extend(batch.iter().cloned());
        Ok(batch)
    }

    /// Unregisters one view or a batch.
    ///
    /// Returns the removed views. Nothing is removed if any item is not an
    /// admin view or is not registered.
    pub fn unregister<I>(&mut self, views: I) -> AdminResult<Vec<RegisteredView>>
    where
        I: IntoIterator<Item = ViewRef>,
    {
        let mut ids: Vec<&'static str> = Vec::new();
        for view_ref in views {
            let view = admin_view(view_ref)?;
            let id = view.view_id();
            if !self.is_registered(id) {
                return Err(AdminError::NotRegistered(format!(
                    "The view {id} is not registered"
                )));
            }
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        let ids: HashSet<&str> = ids.into_iter().collect();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.views)
            .into_iter()
            .partition(|v| ids.contains(v.view_id()));
        self.views = kept;
        for view in &removed {
            tracing::debug!(view = view.view_id(), "unregistered custom admin view");
        }
        Ok(removed)
    }

    /// Whether a view with this identity is registered.
    pub fn is_registered(&self, view_id: &str) -> bool {
        self.views.iter().any(|v| v.view_id() == view_id)
    }

    /// Looks up a registered view by identity.
    pub fn get(&self, view_id: &str) -> Option<&RegisteredView> {
        self.views.iter().find(|v| v.view_id() == view_id)
    }

    /// The registered views, in registration order.
    pub fn views(&self) -> &[RegisteredView] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
