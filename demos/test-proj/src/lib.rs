//! A small project wired the way a real deployment would be: settings from a
//! TOML file, a native model admin, three custom admin pages and a
//! header-based stand-in for authentication.

pub mod auth;
pub mod views;

use admin_pages::prelude::{CustomAdminSite, Settings};
use admin_pages::site::app_settings::apply_default_settings;
use admin_pages::site::model_admin::ModelAdmin;
use axum::Router;
use tower_http::trace::TraceLayer;

/// The settings the demo ships with.
pub const DEFAULT_SETTINGS: &str = include_str!("../test_proj.toml");

/// Loads the bundled settings, with `ADMIN_PAGES_*` environment overrides.
pub fn default_settings() -> anyhow::Result<Settings> {
    let mut settings = admin_pages::core::settings_loader::from_toml_str(DEFAULT_SETTINGS)?;
    admin_pages::core::settings_loader::apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Builds the admin site with every demo page registered and the URL conf built.
pub fn build_site(settings: &Settings) -> anyhow::Result<CustomAdminSite> {
    let mut settings = settings.clone();
    apply_default_settings(&mut settings);

    let mut site = CustomAdminSite::from_settings(&settings)?;
    site.site_mut().register(
        ModelAdmin::new("notifications", "system_notification")
            .verbose_name("system notification")
            .verbose_name_plural("system notifications"),
    )?;
    site.register_view(views::all_views())?;
    site.build_urlconf()?;
    Ok(site)
}

/// The demo's HTTP application.
pub fn app(settings: &Settings) -> anyhow::Result<Router> {
    let router = build_site(settings)?.into_axum_router()?;
    Ok(router
        .layer(axum::middleware::from_fn(auth::demo_user))
        .layer(TraceLayer::new_for_http()))
}
