//! # admin-pages
//!
//! Custom admin pages for the admin site: plain views registered next to the
//! model screens, routed inside the admin namespace and listed in the admin
//! navigation for the users allowed to open them.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on it for
//! everything, or on the individual crates for finer-grained control.

/// Settings, app registry, system checks, logging and error types.
pub use admin_pages_core as core;

/// Users and permission checks.
#[cfg(feature = "auth")]
pub use admin_pages_auth as auth;

/// The admin site, custom view registry, URL conf and Axum router.
#[cfg(feature = "site")]
pub use admin_pages_site as site;

/// Third-party crates used in public signatures.
pub mod reexports {
    pub use async_trait;
    pub use axum;
    pub use serde;
    pub use serde_json;
    pub use tokio;
    pub use tracing;
}

/// The names most projects need.
pub mod prelude {
    pub use admin_pages_core::{AdminError, AdminResult, Settings};

    #[cfg(feature = "auth")]
    pub use admin_pages_auth::{AbstractUser, AnonymousUser, RequestUser, UserPermissions};

    #[cfg(feature = "site")]
    pub use admin_pages_site::{
        app_settings::CustomAdminSettings, request::AdminRequest, site::AdminSite,
        AdminBaseView, CustomAdminSite, View, ViewRef,
    };
}
