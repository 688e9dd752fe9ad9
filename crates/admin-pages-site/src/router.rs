//! Serving the admin site over HTTP.
//!
//! [`CustomAdminSite::into_axum_router`] turns a configured site into an Axum
//! [`Router`]:
//!
//! - `GET {index}` - The navigation as JSON (staff only)
//! - `GET {index}{app_label}/` - One navigation group as JSON (staff only)
//! - `{index}{custom_admin_path}{app_label}/{route_path}` - Each custom view
//!
//! The user is read from the [`RequestUser`](admin_pages_auth::RequestUser)
//! request extension, set by whatever authentication layer runs in front.
//! Custom view responses are marked as never cached.

use std::collections::HashSet;
use std::sync::Arc;

use admin_pages_core::logging::request_span;
use admin_pages_core::{AdminError, AdminResult};
use axum::body::to_bytes;
use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use http::StatusCode;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::Instrument;

use crate::custom_site::CustomAdminSite;
use crate::request::AdminRequest;

/// Largest request body handed to a custom view.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const NEVER_CACHE: &str = "max-age=0, no-cache, no-store, must-revalidate, private";

impl CustomAdminSite {
    /// Builds the Axum router, building the URL conf first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ImproperlyConfigured`] if two custom views share
    /// the same URL.
    pub fn into_axum_router(mut self) -> AdminResult<Router> {
        if self.urlconf().is_none() {
            self.build_urlconf()?;
        }

        let index_url = self.site().index_url();
        let custom_prefix = format!("{index_url}{}", self.custom_settings().custom_admin_path);

        let mut seen = HashSet::new();
        let mut mounts = Vec::new();
        for route in self.routes().routes() {
            let url = format!("{custom_prefix}{}", route.route);
            if !seen.insert(url.clone()) {
                return Err(AdminError::ImproperlyConfigured(format!(
                    "Two custom admin views are mounted at '{url}'. Give one of them a different route_path or app_label."
                )));
            }
            mounts.push((url, route.view_id));
        }

        let shared = Arc::new(self);

        let mut custom = Router::new();
        for (url, view_id) in mounts {
            let site = Arc::clone(&shared);
            custom = custom.route(
                &url,
                any(move |request: Request| {
                    let site = Arc::clone(&site);
                    async move { handle_custom_view(&site, view_id, request).await }
                }),
            );
        }
        let custom = custom.layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(NEVER_CACHE),
        ));

        let native = Router::new()
            .route(&index_url, get(handle_index))
            .route(&format!("{index_url}{{app_label}}/"), get(handle_app_index))
            .with_state(shared);

        Ok(native.merge(custom))
    }
}

fn error_response(err: &AdminError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %err, "admin request failed");
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

fn forbidden(path: &str) -> Response {
    tracing::warn!(path, "admin access denied");
    error_response(&AdminError::PermissionDenied(format!(
        "You do not have permission to view '{path}'"
    )))
}

async fn into_admin_request(request: Request) -> Result<AdminRequest, Response> {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
            .into_response()
    })?;
    Ok(AdminRequest::from_parts(&parts, body))
}

/// Serves a custom view after checking the user may open it.
async fn handle_custom_view(site: &CustomAdminSite, view_id: &str, request: Request) -> Response {
    let span = request_span(request.method().as_str(), request.uri().path());
    async move {
        let request = match into_admin_request(request).await {
            Ok(request) => request,
            Err(response) => return response,
        };
        let Some(view) = site.get_registered_view(view_id) else {
            return error_response(&AdminError::NotFound(format!(
                "No custom admin view at '{}'",
                request.path()
            )));
        };
        if !view.user_has_permission(request.user()) {
            return forbidden(request.path());
        }
        let context = match site.each_context(&request) {
            Ok(context) => context,
            Err(err) => return error_response(&err),
        };
        tracing::debug!(
            view = view.view_id(),
            user = request.user().get_username(),
            "dispatching custom admin view"
        );
        view.view().dispatch(request.with_context(context)).await
    }
    .instrument(span)
    .await
}

/// `GET {index}` - the navigation for the requesting user.
async fn handle_index(State(site): State<Arc<CustomAdminSite>>, request: Request) -> Response {
    let request = match into_admin_request(request).await {
        Ok(request) => request,
        Err(response) => return response,
    };
    if !site.site().has_permission(&request) {
        return forbidden(request.path());
    }
    match site.get_app_list(&request) {
        Ok(app_list) => Json(serde_json::json!({
            "site_name": site.site().name(),
            "site_header": site.site().get_site_header(),
            "app_list": app_list,
        }))
        .into_response(),
        Err(err) => error_response(&err),
    }
}

/// `GET {index}{app_label}/` - one navigation group.
async fn handle_app_index(
    State(site): State<Arc<CustomAdminSite>>,
    Path(app_label): Path<String>,
    request: Request,
) -> Response {
    let request = match into_admin_request(request).await {
        Ok(request) => request,
        Err(response) => return response,
    };
    if !site.site().has_permission(&request) {
        return forbidden(request.path());
    }
    let app_list = match site.get_app_list(&request) {
        Ok(app_list) => app_list,
        Err(err) => return error_response(&err),
    };
    app_list
        .into_iter()
        .find(|group| group.app_label == app_label)
        .map_or_else(
            || {
                error_response(&AdminError::NotFound(format!(
                    "No admin app with label '{app_label}'"
                )))
            },
            |group| Json(group).into_response(),
        )
}
