//! User models.
//!
//! - [`AbstractUser`] - An authenticated user with staff/superuser flags and permissions
//! - [`AnonymousUser`] - An unauthenticated visitor
//! - [`RequestUser`] - Whichever of the two made a request
//!
//! The admin only ever asks a user the questions in [`UserPermissions`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The questions the admin site asks about whoever is making a request.
pub trait UserPermissions {
    /// Whether the account is active. Inactive accounts have no access.
    fn is_active(&self) -> bool;

    /// Whether the user may log into the admin site.
    fn is_staff(&self) -> bool;

    /// Whether the user implicitly holds every permission.
    fn is_superuser(&self) -> bool;

    /// Whether the user holds every one of the given permissions.
    fn has_perms(&self, perms: &[&str]) -> bool;

    /// Whether the user holds the given permission.
    fn has_perm(&self, perm: &str) -> bool {
        self.has_perms(&[perm])
    }

    /// Whether the user holds any permission within the given app.
    fn has_module_perms(&self, app_label: &str) -> bool;
}

/// An authenticated user.
///
/// Mirrors Django's `AbstractUser`, minus the password machinery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbstractUser {
    /// The user's unique username.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// Whether this user account is active.
    pub is_active: bool,
    /// Whether this user can access the admin site.
    pub is_staff: bool,
    /// Whether this user has all permissions (superuser).
    pub is_superuser: bool,
    /// Timestamp of the last successful login, or `None` if never logged in.
    pub last_login: Option<DateTime<Utc>>,
    /// When this user account was created.
    pub date_joined: DateTime<Utc>,
    /// Group names this user belongs to.
    pub groups: Vec<String>,
    /// Permissions held by this user, in `"app_label.codename"` format.
    pub user_permissions: Vec<String>,
}

impl Default for AbstractUser {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            last_login: None,
            date_joined: Utc::now(),
            groups: Vec::new(),
            user_permissions: Vec::new(),
        }
    }
}

impl AbstractUser {
    /// Creates a new active, non-staff user with the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Creates an active staff user.
    pub fn staff(username: impl Into<String>) -> Self {
        Self {
            is_staff: true,
            ..Self::new(username)
        }
    }

    /// Creates an active staff superuser.
    pub fn superuser(username: impl Into<String>) -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
            ..Self::new(username)
        }
    }

    /// Adds a permission in `"app_label.codename"` format.
    #[must_use]
    pub fn with_perm(mut self, perm: impl Into<String>) -> Self {
        let perm = perm.into();
        if !self.user_permissions.contains(&perm) {
            self.user_permissions.push(perm);
        }
        self
    }

    /// Marks the account active or inactive.
    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns the username.
    pub fn get_username(&self) -> &str {
        &self.username
    }
}

impl UserPermissions for AbstractUser {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_staff(&self) -> bool {
        self.is_staff
    }

    fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    fn has_perms(&self, perms: &[&str]) -> bool {
        crate::permissions::has_perms(self, perms)
    }

    fn has_module_perms(&self, app_label: &str) -> bool {
        crate::permissions::has_module_perms(self, app_label)
    }
}

/// Represents an unauthenticated (anonymous) user.
///
/// Has no permissions and is never staff.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousUser;

impl AnonymousUser {
    /// Creates a new anonymous user.
    pub const fn new() -> Self {
        Self
    }
}

impl UserPermissions for AnonymousUser {
    fn is_active(&self) -> bool {
        false
    }

    fn is_staff(&self) -> bool {
        false
    }

    fn is_superuser(&self) -> bool {
        false
    }

    fn has_perms(&self, _perms: &[&str]) -> bool {
        false
    }

    fn has_module_perms(&self, _app_label: &str) -> bool {
        false
    }
}

/// The user attached to a request by the upstream authentication layer.
#[derive(Debug, Clone)]
pub enum RequestUser {
    /// A logged-in user.
    Authenticated(AbstractUser),
    /// Nobody is logged in.
    Anonymous(AnonymousUser),
}

impl Default for RequestUser {
    fn default() -> Self {
        Self::Anonymous(AnonymousUser)
    }
}

impl From<AbstractUser> for RequestUser {
    fn from(user: AbstractUser) -> Self {
        Self::Authenticated(user)
    }
}

impl From<AnonymousUser> for RequestUser {
    fn from(user: AnonymousUser) -> Self {
        Self::Anonymous(user)
    }
}

impl RequestUser {
    /// Returns `true` if a real user is logged in.
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the username, or an empty string for anonymous users.
    pub fn get_username(&self) -> &str {
        match self {
            Self::Authenticated(user) => user.get_username(),
            Self::Anonymous(_) => "",
        }
    }

    fn as_permissions(&self) -> &dyn UserPermissions {
        match self {
            Self::Authenticated(user) => user,
            Self::Anonymous(user) => user,
        }
    }
}

impl UserPermissions for RequestUser {
    fn is_active(&self) -> bool {
        self.as_permissions().is_active()
    }

    fn is_staff(&self) -> bool {
        self.as_permissions().is_staff()
    }

    fn is_superuser(&self) -> bool {
        self.as_permissions().is_superuser()
    }

    fn has_perms(&self, perms: &[&str]) -> bool {
        self.as_permissions().has_perms(perms)
    }

    fn has_module_perms(&self, app_label: &str) -> bool {
        self.as_permissions().has_module_perms(app_label)
    }
}
