//! The native admin site.
//!
//! [`AdminSite`] holds the model registrations and builds the navigation
//! (the "app list") a user is allowed to see. Custom views are layered on top
//! by [`CustomAdminSite`](crate::custom_site::CustomAdminSite).

use std::collections::HashMap;

use admin_pages_auth::UserPermissions;
use admin_pages_core::apps::AppRegistry;
use admin_pages_core::utils::text::{capfirst, title_case};
use admin_pages_core::{AdminError, AdminResult, Settings};

use crate::app_list::{sort_app_list, AppEntry, ModelEntry};
use crate::model_admin::ModelAdmin;
use crate::request::AdminRequest;

/// The native admin site.
///
/// # Examples
///
/// ```
/// use admin_pages_site::site::AdminSite;
/// use admin_pages_site::model_admin::ModelAdmin;
///
/// let mut site = AdminSite::new("admin");
/// site.register(ModelAdmin::new("blog", "article")).unwrap();
/// assert!(site.is_registered("blog.article"));
/// assert_eq!(site.index_url(), "/admin/");
/// ```
pub struct AdminSite {
    /// The site name, also the URL namespace.
    name: String,
    /// The route the admin is mounted under, without a leading slash.
    url_prefix: String,
    site_header: String,
    site_title: String,
    site_url: String,
    /// Registered model admin configurations, keyed by `"app.model"`.
    registered_models: HashMap<String, ModelAdmin>,
}

impl AdminSite {
    /// Creates an admin site mounted under `admin/`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url_prefix: "admin/".to_string(),
            site_header: "Site administration".to_string(),
            site_title: "Site admin".to_string(),
            site_url: "/".to_string(),
            registered_models: HashMap::new(),
        }
    }

    /// Creates an admin site using the admin settings of `settings`.
    pub fn from_settings(name: &str, settings: &Settings) -> Self {
        Self::new(name)
            .url_prefix(&settings.admin_url)
            .site_header(&settings.site_header)
            .site_title(&settings.site_title)
            .site_url(&settings.site_url)
    }

    /// Sets the route the admin is mounted under (e.g. `"backoffice/"`).
    ///
    /// Leading slashes are dropped and a trailing slash is added.
    #[must_use]
    pub fn url_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        self.url_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        };
        self
    }

    /// Sets the page header.
    #[must_use]
    pub fn site_header(mut self, header: &str) -> Self {
        self.site_header = header.to_string();
        self
    }

    /// Sets the page title suffix.
    #[must_use]
    pub fn site_title(mut self, title: &str) -> Self {
        self.site_title = title.to_string();
        self
    }

    /// Sets the "View site" URL.
    #[must_use]
    pub fn site_url(mut self, url: &str) -> Self {
        self.site_url = url.to_string();
        self
    }

    /// Returns the site name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the mount route, e.g. `"admin/"`.
    pub fn url_prefix_str(&self) -> &str {
        &self.url_prefix
    }

    /// Returns the absolute URL of the admin index, e.g. `"/admin/"`.
    pub fn index_url(&self) -> String {
        format!("/{}", self.url_prefix)
    }

    /// Returns the absolute URL of an app's index page.
    pub fn app_index_url(&self, app_label: &str) -> String {
        format!("{}{app_label}/", self.index_url())
    }

    pub fn get_site_header(&self) -> &str {
        &self.site_header
    }

    pub fn get_site_title(&self) -> &str {
        &self.site_title
    }

    pub fn get_site_url(&self) -> &str {
        &self.site_url
    }

    /// Registers a model with its admin configuration.
    pub fn register(&mut self, admin: ModelAdmin) -> AdminResult<()> {
        let key = admin.model_key();
        if self.registered_models.contains_key(&key) {
            return Err(AdminError::AlreadyRegistered(format!(
                "The model {key} is already registered with '{}'.",
                self.name
            )));
        }
        tracing::debug!(model = %key, site = %self.name, "registered model admin");
        self.registered_models.insert(key, admin);
        Ok(())
    }

    /// Unregisters a model from the admin site.
    pub fn unregister(&mut self, model_key: &str) -> AdminResult<()> {
        self.registered_models
            .remove(model_key)
            .map(|_| ())
            .ok_or_else(|| {
                AdminError::NotRegistered(format!("The model {model_key} is not registered"))
            })
    }

    /// Returns the admin configuration for a model.
    pub fn get_model_admin(&self, model_key: &str) -> Option<&ModelAdmin> {
        self.registered_models.get(model_key)
    }

    /// Returns the registered model keys, sorted.
    pub fn registered_models(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.registered_models.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn model_count(&self) -> usize {
        self.registered_models.len()
    }

    pub fn is_registered(&self, model_key: &str) -> bool {
        self.registered_models.contains_key(model_key)
    }

    /// Whether the requesting user may access the admin at all.
    pub fn has_permission(&self, request: &AdminRequest) -> bool {
        let user = request.user();
        user.is_active() && user.is_staff()
    }

    /// Builds the native navigation for the requesting user.
    ///
    /// Models are grouped by app and only listed when the user holds the view
    /// or change permission. Groups and models are sorted by display name.
    pub fn get_app_list(&self, request: &AdminRequest, apps: &AppRegistry) -> Vec<AppEntry> {
        let user = request.user();
        let index_url = self.index_url();
        let mut groups: HashMap<&str, AppEntry> = HashMap::new();

        for admin in self.registered_models.values() {
            let app_label = admin.app_label.as_str();
            if !user.has_module_perms(app_label) {
                continue;
            }
            let perms = admin.get_model_perms(user);
            if !(perms.view || perms.change) {
                continue;
            }

            let model_url = format!("{index_url}{app_label}/{}/", admin.model_name);
            let entry = ModelEntry {
                name: capfirst(&admin.verbose_name_plural),
                object_name: admin.object_name.clone(),
                add_url: perms.add.then(|| format!("{model_url}add/")),
                admin_url: model_url,
                view_only: !perms.change,
            };

            groups
                .entry(app_label)
                .or_insert_with(|| {
                    let name = apps.get_app_config(app_label).map_or_else(
                        || title_case(&app_label.replace('_', " ")),
                        |config| config.verbose_name().to_string(),
                    );
                    AppEntry::new(name, app_label, self.app_index_url(app_label))
                })
                .models
                .push(entry);
        }

        let mut app_list: Vec<AppEntry> = groups.into_values().collect();
        for group in &mut app_list {
            group.sort_models();
        }
        sort_app_list(&mut app_list);
        app_list
    }
}

impl std::fmt::Debug for AdminSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSite")
            .field("name", &self.name)
            .field("url_prefix", &self.url_prefix)
            .field("model_count", &self.registered_models.len())
            .field("models", &self.registered_models().join(", "))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_pages_auth::AbstractUser;
    use admin_pages_core::apps::SimpleAppConfig;

    fn make_apps() -> AppRegistry {
        let mut apps = AppRegistry::new();
        apps.register(Box::new(
            SimpleAppConfig::new("test_proj.notifications").with_verbose_name("Notifications"),
        ))
        .unwrap();
        apps.register(Box::new(SimpleAppConfig::new("test_proj.blog")))
            .unwrap();
        apps
    }

    fn make_site() -> AdminSite {
        let mut site = AdminSite::new("admin");
        site.register(ModelAdmin::new("notifications", "system_notification"))
            .unwrap();
        site.register(ModelAdmin::new("blog", "article")).unwrap();
        site.register(ModelAdmin::new("blog", "category").verbose_name_plural("categories"))
            .unwrap();
        site
    }

    #[test]
    fn test_admin_site_new() {
        let site = AdminSite::new("admin");
        assert_eq!(site.name(), "admin");
        assert_eq!(site.url_prefix_str(), "admin/");
        assert_eq!(site.index_url(), "/admin/");
        assert_eq!(site.app_index_url("blog"), "/admin/blog/");
        assert_eq!(site.model_count(), 0);
    }

    #[test]
    fn test_url_prefix_normalized() {
        assert_eq!(AdminSite::new("a").url_prefix("/backoffice").index_url(), "/backoffice/");
        assert_eq!(AdminSite::new("a").url_prefix("").index_url(), "/");
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.admin_url = "manage/".to_string();
        settings.site_header = "Backoffice".to_string();
        let site = AdminSite::from_settings("admin", &settings);
        assert_eq!(site.index_url(), "/manage/");
        assert_eq!(site.get_site_header(), "Backoffice");
        assert_eq!(site.get_site_title(), "Site admin");
    }

    #[test]
    fn test_register_twice_fails() {
        let mut site = AdminSite::new("admin");
        site.register(ModelAdmin::new("blog", "article")).unwrap();
        let err = site.register(ModelAdmin::new("blog", "article")).unwrap_err();
        assert!(matches!(err, AdminError::AlreadyRegistered(_)));
    }

    #[test]
    fn test_unregister() {
        let mut site = make_site();
        site.unregister("blog.article").unwrap();
        assert!(!site.is_registered("blog.article"));
        assert!(matches!(
            site.unregister("blog.article"),
            Err(AdminError::NotRegistered(_))
        ));
    }

    #[test]
    fn test_registered_models_sorted() {
        let site = make_site();
        assert_eq!(
            site.registered_models(),
            vec!["blog.article", "blog.category", "notifications.system_notification"]
        );
    }

    #[test]
    fn test_has_permission() {
        let site = AdminSite::new("admin");
        assert!(site.has_permission(&AdminRequest::get("/admin/").with_user(AbstractUser::staff("s"))));
        assert!(!site.has_permission(&AdminRequest::get("/admin/").with_user(AbstractUser::new("u"))));
        assert!(!site.has_permission(
            &AdminRequest::get("/admin/").with_user(AbstractUser::superuser("r").active(false))
        ));
        assert!(!site.has_permission(&AdminRequest::get("/admin/")));
    }

    #[test]
    fn test_app_list_for_superuser() {
        let site = make_site();
        let request = AdminRequest::get("/admin/").with_user(AbstractUser::superuser("root"));
        let app_list = site.get_app_list(&request, &make_apps());

        let names: Vec<&str> = app_list.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Blog", "Notifications"]);

        let blog = &app_list[0];
        assert_eq!(blog.app_url, "/admin/blog/");
        let models: Vec<&str> = blog.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(models, vec!["Articles", "Categories"]);
        assert_eq!(blog.models[0].admin_url, "/admin/blog/article/");
        assert_eq!(blog.models[0].add_url.as_deref(), Some("/admin/blog/article/add/"));
        assert!(!blog.models[0].view_only);

        assert_eq!(app_list[1].models[0].object_name, "SystemNotification");
    }

    #[test]
    fn test_app_list_respects_model_perms() {
        let site = make_site();
        let user = AbstractUser::staff("alice").with_perm("blog.view_article");
        let request = AdminRequest::get("/admin/").with_user(user);
        let app_list = site.get_app_list(&request, &make_apps());

        assert_eq!(app_list.len(), 1);
        assert_eq!(app_list[0].models.len(), 1);
        let article = &app_list[0].models[0];
        assert!(article.view_only);
        assert!(article.add_url.is_none());
    }

    #[test]
    fn test_app_list_empty_for_anonymous() {
        let site = make_site();
        assert!(site
            .get_app_list(&AdminRequest::get("/admin/"), &make_apps())
            .is_empty());
    }

    #[test]
    fn test_admin_site_debug() {
        let site = make_site();
        let debug = format!("{site:?}");
        assert!(debug.contains("AdminSite"));
        assert!(debug.contains("blog.article"));
    }
}
