//! Permission checks.
//!
//! Permissions are strings in `"app_label.codename"` format (e.g.
//! `"notifications.send_notification"`). Superusers hold every permission;
//! inactive users hold none.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::user::AbstractUser;

/// A single permission, identified by a codename within an app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Permission {
    /// The machine-readable identifier (e.g., "`view_article`").
    pub codename: String,
    /// The human-readable name (e.g., "Can view article").
    pub name: String,
    /// The app the permission belongs to (e.g., "blog").
    pub app_label: String,
}

impl Permission {
    /// Creates a new permission.
    pub fn new(
        codename: impl Into<String>,
        name: impl Into<String>,
        app_label: impl Into<String>,
    ) -> Self {
        Self {
            codename: codename.into(),
            name: name.into(),
            app_label: app_label.into(),
        }
    }

    /// Returns the full permission string in `"app_label.codename"` format.
    pub fn full_codename(&self) -> String {
        format!("{}.{}", self.app_label, self.codename)
    }
}

/// Checks if a user has a specific permission.
pub fn has_perm(user: &AbstractUser, perm: &str) -> bool {
    has_perms(user, &[perm])
}

/// Checks if a user has all of the given permissions.
pub fn has_perms(user: &AbstractUser, perms: &[&str]) -> bool {
    if !user.is_active {
        return false;
    }
    if user.is_superuser {
        return true;
    }
    let all_perms = get_all_permissions(user);
    perms.iter().all(|p| all_perms.contains(*p))
}

/// Checks if a user has any permissions for the given app label.
pub fn has_module_perms(user: &AbstractUser, app_label: &str) -> bool {
    if !user.is_active {
        return false;
    }
    if user.is_superuser {
        return true;
    }
    let prefix = format!("{app_label}.");
    user.user_permissions
        .iter()
        .any(|p| p.starts_with(&prefix))
}

/// Returns all permissions directly held by a user.
pub fn get_all_permissions(user: &AbstractUser) -> HashSet<&str> {
    user.user_permissions.iter().map(String::as_str).collect()
}

/// Generates the default permissions for a model (add, change, delete, view).
pub fn generate_default_permissions(app_label: &str, model_name: &str) -> Vec<Permission> {
    ["add", "change", "delete", "view"]
        .iter()
        .map(|action| {
            Permission::new(
                format!("{action}_{model_name}"),
                format!("Can {action} {model_name}"),
                app_label,
            )
        })
        .collect()
}
