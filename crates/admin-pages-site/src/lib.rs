//! # admin-pages-site
//!
//! An admin site that accepts plain views next to its model screens. Custom
//! views implement [`AdminBaseView`](views::AdminBaseView), are registered with
//! a [`CustomAdminSite`](custom_site::CustomAdminSite), get a URL inside the
//! admin namespace, and show up in the admin navigation for users allowed to
//! see them.
//!
//! ```
//! use std::sync::Arc;
//!
//! use admin_pages_auth::AbstractUser;
//! use admin_pages_core::apps::{AppRegistry, SimpleAppConfig};
//! use admin_pages_site::app_settings::CustomAdminSettings;
//! use admin_pages_site::custom_site::CustomAdminSite;
//! use admin_pages_site::request::AdminRequest;
//! use admin_pages_site::site::AdminSite;
//! use admin_pages_site::views::{AdminBaseView, View, ViewRef};
//!
//! struct ExampleView;
//!
//! impl View for ExampleView {}
//!
//! impl AdminBaseView for ExampleView {
//!     fn view_name(&self) -> Option<&str> {
//!         Some("Example View")
//!     }
//! }
//!
//! let mut apps = AppRegistry::new();
//! apps.register(Box::new(SimpleAppConfig::new("admin_pages.custom_admin_pages"))).unwrap();
//!
//! let mut site = CustomAdminSite::new(
//!     AdminSite::new("admin"),
//!     Arc::new(apps),
//!     CustomAdminSettings::default(),
//! );
//! site.register_view(ViewRef::admin(ExampleView)).unwrap();
//! site.build_urlconf().unwrap();
//!
//! let request = AdminRequest::get("/admin/").with_user(AbstractUser::superuser("root"));
//! let app_list = site.get_app_list(&request).unwrap();
//! assert_eq!(app_list[0].name, "Custom Admin Pages");
//! assert_eq!(app_list[0].models[0].admin_url, "/admin/custom_admin_pages/example-view");
//! ```

pub mod app_list;
pub mod app_settings;
pub mod checks;
pub mod context;
pub mod custom_site;
pub mod model_admin;
pub mod navigation;
pub mod registry;
pub mod request;
pub mod router;
pub mod site;
pub mod urls;
pub mod views;

pub use custom_site::CustomAdminSite;
pub use views::{AdminBaseView, View, ViewRef};
