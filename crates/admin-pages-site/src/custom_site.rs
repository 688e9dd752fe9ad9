//! The admin site with custom views.
//!
//! [`CustomAdminSite`] wraps the native [`AdminSite`] and adds:
//!
//! - registration of [`AdminBaseView`](crate::views::AdminBaseView) types
//! - one route per view inside the admin URL namespace
//! - custom views in the navigation, filtered by permission
//!
//! The site has two phases. Views are registered first; then
//! [`build_urlconf`](CustomAdminSite::build_urlconf) freezes the routes.
//! Registering after that fails until
//! [`clear_url_caches`](CustomAdminSite::clear_url_caches) is called, because
//! the new view would have no route and navigation could not link to it.

use std::sync::Arc;

use admin_pages_core::apps::AppRegistry;
use admin_pages_core::{AdminError, AdminResult, Settings};

use crate::app_list::{AppEntry, ModelEntry};
use crate::app_settings::{installed_apps, CustomAdminSettings};
use crate::context::AdminContext;
use crate::navigation::{merge_custom_views, MergeOptions};
use crate::registry::{RegisteredView, ViewRegistry};
use crate::request::AdminRequest;
use crate::site::AdminSite;
use crate::urls::conf::CustomRouteTable;
use crate::urls::pattern::path;
use crate::urls::resolver::{include, root, URLEntry, URLResolver};
use crate::urls::reverse::reverse;
use crate::views::ViewRef;

/// An admin site that also serves registered custom views.
pub struct CustomAdminSite {
    site: AdminSite,
    apps: Arc<AppRegistry>,
    settings: CustomAdminSettings,
    views: ViewRegistry,
    routes: CustomRouteTable,
    urlconf: Option<Arc<URLResolver>>,
}

impl CustomAdminSite {
    /// Creates a site with no custom views.
    pub fn new(site: AdminSite, apps: Arc<AppRegistry>, settings: CustomAdminSettings) -> Self {
        Self {
            site,
            apps,
            settings,
            views: ViewRegistry::new(),
            routes: CustomRouteTable::new(),
            urlconf: None,
        }
    }

    /// Creates the site named `"admin"` from project settings.
    pub fn from_settings(settings: &Settings) -> AdminResult<Self> {
        let mut apps = installed_apps(settings)?;
        apps.populate()?;
        Ok(Self::new(
            AdminSite::from_settings("admin", settings),
            Arc::new(apps),
            CustomAdminSettings::from_settings(settings)?,
        ))
    }

    /// The native admin site.
    pub const fn site(&self) -> &AdminSite {
        &self.site
    }

    /// The native admin site, for registering models.
    pub fn site_mut(&mut self) -> &mut AdminSite {
        &mut self.site
    }

    pub fn apps(&self) -> &AppRegistry {
        &self.apps
    }

    pub const fn custom_settings(&self) -> &CustomAdminSettings {
        &self.settings
    }

    /// The registered custom views, in registration order.
    pub fn registered_views(&self) -> &[RegisteredView] {
        self.views.views()
    }

    /// The accumulated custom view routes.
    pub const fn routes(&self) -> &CustomRouteTable {
        &self.routes
    }

    /// Whether the view referenced by `view` is registered.
    pub fn is_view_registered(&self, view: &ViewRef) -> bool {
        view.view_id().is_some_and(|id| self.views.is_registered(id))
    }

    /// Looks up a registered view by identity.
    pub fn get_registered_view(&self, view_id: &str) -> Option<&RegisteredView> {
        self.views.get(view_id)
    }

    /// Registers one custom view or a batch.
    ///
    /// Nothing is registered if any item is rejected.
    ///
    /// # Errors
    ///
    /// - [`AdminError::ImproperlyConfigured`] if the URL conf is already built,
    ///   if an item is not an admin view, if a view has no `view_name`, or if
    ///   its `app_label` is not installed
    /// - [`AdminError::AlreadyRegistered`] if a view is already registered
    pub fn register_view<I>(&mut self, views: I) -> AdminResult<()>
    where
        I: IntoIterator<Item = ViewRef>,
    {
        if self.urlconf.is_some() {
            return Err(AdminError::ImproperlyConfigured(
                "Custom admin views must be registered before the admin URL conf is built. \
                 Register every view first, or call clear_url_caches() and rebuild."
                    .to_string(),
            ));
        }
        let added = self
            .views
            .register(views, &self.apps, &self.settings.default_app_label)?;
        for view in &added {
            self.routes.add_view_to_conf(view);
        }
        tracing::info!(count = added.len(), "registered custom admin views");
        Ok(())
    }

    /// Unregisters one custom view or a batch, removing their routes.
    ///
    /// Nothing is unregistered if any item is rejected. A built URL conf is
    /// dropped, since it still routes to the removed views.
    ///
    /// # Errors
    ///
    /// - [`AdminError::ImproperlyConfigured`] if an item is not an admin view
    /// - [`AdminError::NotRegistered`] if a view is not registered
    pub fn unregister_view<I>(&mut self, views: I) -> AdminResult<()>
    where
        I: IntoIterator<Item = ViewRef>,
    {
        let removed = self.views.unregister(views)?;
        for view in &removed {
            self.routes.remove_view_from_conf(view.view_id());
        }
        if self.urlconf.take().is_some() {
            tracing::debug!("dropped admin URL conf after unregistering views");
        }
        tracing::info!(count = removed.len(), "unregistered custom admin views");
        Ok(())
    }

    /// The URL patterns inside the admin namespace.
    ///
    /// Custom view routes come first, under the custom admin path, followed by
    /// the admin index.
    pub fn get_urls(&self) -> AdminResult<Vec<URLEntry>> {
        let mut urls = Vec::new();
        if !self.routes.is_empty() {
            urls.push(URLEntry::Resolver(include(
                &self.settings.custom_admin_path,
                self.routes.url_patterns()?,
                None,
            )?));
        }
        urls.push(URLEntry::Pattern(path("", Some("index"))?));
        Ok(urls)
    }

    /// Builds the URL conf from the routes accumulated so far.
    ///
    /// Afterwards, registering views fails until [`clear_url_caches`](Self::clear_url_caches).
    pub fn build_urlconf(&mut self) -> AdminResult<Arc<URLResolver>> {
        let admin = include(self.site.url_prefix_str(), self.get_urls()?, Some(self.site.name()))?;
        let urlconf = Arc::new(root(vec![URLEntry::Resolver(admin)])?);
        tracing::info!(
            routes = self.routes.len(),
            index = %self.site.index_url(),
            "built admin URL conf"
        );
        self.urlconf = Some(Arc::clone(&urlconf));
        Ok(urlconf)
    }

    /// The built URL conf, if any.
    pub const fn urlconf(&self) -> Option<&Arc<URLResolver>> {
        self.urlconf.as_ref()
    }

    /// Drops the built URL conf, allowing registration again.
    pub fn clear_url_caches(&mut self) {
        self.urlconf = None;
    }

    /// Reverses a name inside the admin namespace, e.g. `"test_name"`.
    pub fn reverse(&self, name: &str) -> AdminResult<String> {
        let urlconf = self.urlconf.as_ref().ok_or_else(|| {
            AdminError::NoReverseMatch("the admin URL conf has not been built".to_string())
        })?;
        reverse(&format!("{}:{name}", self.site.name()), urlconf)
    }

    /// Builds the navigation row for a custom view.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ImportError`] if the view's route cannot be
    /// reversed, which happens when the URL conf was built without it.
    pub fn build_navigation_entry(&self, view: &RegisteredView) -> AdminResult<ModelEntry> {
        let admin_url = self.reverse(view.route_name()).map_err(|err| {
            AdminError::ImportError(format!(
                "Could not reverse the route '{}' of custom admin view '{}' ({err}). \
                 The admin URL conf was probably built before this view was registered; \
                 register every custom view before calling build_urlconf().",
                view.route_name(),
                view.view_name(),
            ))
        })?;
        Ok(ModelEntry::custom_view(view.view_name(), admin_url))
    }

    /// The navigation rows of the views listed under "Custom Admin Pages",
    /// i.e. those with the default app label.
    ///
    /// With a request, only the views the user may see are listed.
    pub fn get_custom_admin_model_views(
        &self,
        request: Option<&AdminRequest>,
    ) -> AdminResult<Vec<ModelEntry>> {
        self.visible_views(request)
            .filter(|view| view.app_label() == self.settings.default_app_label)
            .map(|view| self.build_navigation_entry(view))
            .collect()
    }

    fn visible_views<'a>(
        &'a self,
        request: Option<&'a AdminRequest>,
    ) -> impl Iterator<Item = &'a RegisteredView> + 'a {
        self.views
            .views()
            .iter()
            .filter(move |view| request.map_or(true, |r| view.user_has_permission(r.user())))
    }

    /// The full navigation for the requesting user, custom views included.
    pub fn get_app_list(&self, request: &AdminRequest) -> AdminResult<Vec<AppEntry>> {
        let native = self.site.get_app_list(request, &self.apps);
        let index_url = self.site.index_url();
        merge_custom_views(
            native,
            self.visible_views(Some(request)),
            MergeOptions {
                apps: &self.apps,
                default_app_label: &self.settings.default_app_label,
                index_url: &index_url,
            },
            |view| self.build_navigation_entry(view),
        )
    }

    /// The context every admin page renders with.
    pub fn each_context(&self, request: &AdminRequest) -> AdminResult<AdminContext> {
        let has_permission = self.site.has_permission(request);
        let available_apps = if has_permission {
            self.get_app_list(request)?
        } else {
            Vec::new()
        };
        Ok(AdminContext {
            site_title: self.site.get_site_title().to_string(),
            site_header: self.site.get_site_header().to_string(),
            site_url: self.site.get_site_url().to_string(),
            has_permission,
            is_nav_sidebar_enabled: true,
            available_apps,
        })
    }
}

impl std::fmt::Debug for CustomAdminSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomAdminSite")
            .field("site", &self.site)
            .field("settings", &self.settings)
            .field("views", &self.views.len())
            .field("urlconf_built", &self.urlconf.is_some())
            .finish_non_exhaustive()
    }
}
