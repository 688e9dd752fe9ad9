//! Model admin registrations.
//!
//! A [`ModelAdmin`] is what the native admin knows about a model: where it
//! lives, how it is named, and which permissions guard it. The admin uses it to
//! build the model rows of the navigation.

use admin_pages_auth::permissions::generate_default_permissions;
use admin_pages_auth::UserPermissions;
use admin_pages_core::utils::text::capfirst;
use serde::{Deserialize, Serialize};

/// Admin configuration for one model.
///
/// # Examples
///
/// ```
/// use admin_pages_site::model_admin::ModelAdmin;
///
/// let admin = ModelAdmin::new("notifications", "system_notification")
///     .verbose_name_plural("system notifications");
/// assert_eq!(admin.model_key(), "notifications.system_notification");
/// assert_eq!(admin.object_name, "SystemNotification");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAdmin {
    /// The application label (e.g., "notifications").
    pub app_label: String,
    /// The model name in lowercase (e.g., "`system_notification`").
    pub model_name: String,
    /// The model's type name (e.g., "`SystemNotification`").
    pub object_name: String,
    /// The human-readable verbose name.
    pub verbose_name: String,
    /// The human-readable plural verbose name.
    pub verbose_name_plural: String,
}

impl ModelAdmin {
    /// Creates a `ModelAdmin` with names derived from `model_name`.
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        let model = model_name.into();
        let verbose = model.replace('_', " ");
        let verbose_plural = format!("{verbose}s");
        let object_name = model.split('_').map(capfirst).collect();
        Self {
            app_label: app_label.into(),
            model_name: model,
            object_name,
            verbose_name: verbose,
            verbose_name_plural: verbose_plural,
        }
    }

    /// Sets the verbose name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = name.into();
        self
    }

    /// Sets the plural verbose name.
    #[must_use]
    pub fn verbose_name_plural(mut self, name: impl Into<String>) -> Self {
        self.verbose_name_plural = name.into();
        self
    }

    /// Sets the object name.
    #[must_use]
    pub fn object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = name.into();
        self
    }

    /// Returns the model key in `"app_label.model_name"` format.
    pub fn model_key(&self) -> String {
        format!("{}.{}", self.app_label, self.model_name)
    }

    /// Returns which of the default model permissions `user` holds.
    pub fn get_model_perms(&self, user: &dyn UserPermissions) -> ModelPerms {
        let mut perms = ModelPerms::default();
        for perm in generate_default_permissions(&self.app_label, &self.model_name) {
            let granted = user.has_perm(&perm.full_codename());
            match perm.codename.split('_').next() {
                Some("add") => perms.add = granted,
                Some("change") => perms.change = granted,
                Some("delete") => perms.delete = granted,
                Some("view") => perms.view = granted,
                _ => {}
            }
        }
        perms
    }
}

/// The default model permissions a user holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ModelPerms {
    pub add: bool,
    pub change: bool,
    pub delete: bool,
    pub view: bool,
}

impl ModelPerms {
    /// Whether the user holds any of them.
    pub const fn any(&self) -> bool {
        self.add || self.change || self.delete || self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_pages_auth::AbstractUser;

    #[test]
    fn test_model_admin_defaults() {
        let admin = ModelAdmin::new("blog", "blog_post");
        assert_eq!(admin.model_key(), "blog.blog_post");
        assert_eq!(admin.object_name, "BlogPost");
        assert_eq!(admin.verbose_name, "blog post");
        assert_eq!(admin.verbose_name_plural, "blog posts");
    }

    #[test]
    fn test_model_admin_builders() {
        let admin = ModelAdmin::new("blog", "category")
            .verbose_name("category")
            .verbose_name_plural("categories")
            .object_name("Category");
        assert_eq!(admin.verbose_name_plural, "categories");
        assert_eq!(admin.object_name, "Category");
    }

    #[test]
    fn test_get_model_perms() {
        let admin = ModelAdmin::new("blog", "article");
        let user = AbstractUser::staff("alice")
            .with_perm("blog.view_article")
            .with_perm("blog.add_article");
        let perms = admin.get_model_perms(&user);
        assert_eq!(
            perms,
            ModelPerms {
                add: true,
                change: false,
                delete: false,
                view: true,
            }
        );
        assert!(perms.any());
    }

    #[test]
    fn test_get_model_perms_superuser_and_nobody() {
        let admin = ModelAdmin::new("blog", "article");
        assert!(admin.get_model_perms(&AbstractUser::superuser("root")).change);
        assert!(!admin.get_model_perms(&AbstractUser::staff("bob")).any());
    }
}
