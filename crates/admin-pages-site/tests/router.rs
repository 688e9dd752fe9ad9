//! The admin site served through Axum.

use std::sync::Arc;

use admin_pages_auth::{AbstractUser, RequestUser};
use admin_pages_core::apps::{AppRegistry, SimpleAppConfig};
use admin_pages_site::app_settings::CustomAdminSettings;
use admin_pages_site::custom_site::CustomAdminSite;
use admin_pages_site::request::AdminRequest;
use admin_pages_site::site::AdminSite;
use admin_pages_site::views::{AdminBaseView, View, ViewRef};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

struct ReportView;

#[async_trait]
impl View for ReportView {
    async fn get(&self, request: AdminRequest) -> Response {
        let context = request.admin_context().expect("admin context");
        Json(serde_json::json!({
            "user": request.user().get_username(),
            "site_header": context.site_header,
            "groups": context.available_apps.len(),
        }))
        .into_response()
    }
}

impl AdminBaseView for ReportView {
    fn view_name(&self) -> Option<&str> {
        Some("Test Name")
    }
}

struct SendNotificationView;

#[async_trait]
impl View for SendNotificationView {
    async fn post(&self, request: AdminRequest) -> Response {
        let body = String::from_utf8_lossy(request.body()).into_owned();
        (StatusCode::CREATED, body).into_response()
    }
}

impl AdminBaseView for SendNotificationView {
    fn view_name(&self) -> Option<&str> {
        Some("Send System Notification")
    }
    fn app_label(&self) -> Option<&str> {
        Some("notifications")
    }
    fn permission_required(&self) -> &[&str] {
        &["notifications.send_notification"]
    }
}

struct CafeView;

#[async_trait]
impl View for CafeView {
    async fn get(&self, _request: AdminRequest) -> Response {
        "café".into_response()
    }
}

impl AdminBaseView for CafeView {
    fn view_name(&self) -> Option<&str> {
        Some("Café Stats")
    }
}

struct Twin;
impl View for Twin {}
impl AdminBaseView for Twin {
    fn view_name(&self) -> Option<&str> {
        Some("Test Name")
    }
    fn route_name(&self) -> Option<&str> {
        Some("twin")
    }
}

fn make_site() -> CustomAdminSite {
    let mut apps = AppRegistry::new();
    for name in ["admin_pages.custom_admin_pages", "test_proj.notifications"] {
        apps.register(Box::new(SimpleAppConfig::new(name))).unwrap();
    }
    let mut site = CustomAdminSite::new(
        AdminSite::new("admin"),
        Arc::new(apps),
        CustomAdminSettings::default(),
    );
    site.register_view(vec![
        ViewRef::admin(ReportView),
        ViewRef::admin(SendNotificationView),
    ])
    .unwrap();
    site
}

fn make_router() -> Router {
    make_site().into_axum_router().unwrap()
}

fn request(method: Method, uri: &str, user: Option<AbstractUser>, body: &str) -> Request<Body> {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    if let Some(user) = user {
        request.extensions_mut().insert(RequestUser::from(user));
    }
    request
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_custom_view_allowed() {
    let response = make_router()
        .oneshot(request(
            Method::GET,
            "/admin/custom_admin_pages/test-name",
            Some(AbstractUser::staff("alice")),
            "",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cache_control = response.headers().get(header::CACHE_CONTROL).unwrap();
    assert!(cache_control.to_str().unwrap().contains("no-store"));

    let json = body_json(response).await;
    assert_eq!(json["user"], "alice");
    assert_eq!(json["site_header"], "Site administration");
    assert_eq!(json["groups"], 1);
}

#[tokio::test]
async fn test_custom_view_denied() {
    let response = make_router()
        .oneshot(request(
            Method::POST,
            "/admin/notifications/send-system-notification",
            Some(AbstractUser::staff("bob")),
            "hello",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Permission denied"));
}

#[tokio::test]
async fn test_custom_view_anonymous_denied() {
    let response = make_router()
        .oneshot(request(
            Method::GET,
            "/admin/custom_admin_pages/test-name",
            None,
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_custom_view_receives_body() {
    let user = AbstractUser::staff("carol").with_perm("notifications.send_notification");
    let response = make_router()
        .oneshot(request(
            Method::POST,
            "/admin/notifications/send-system-notification",
            Some(user),
            "hello",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"hello");
}

#[tokio::test]
async fn test_custom_view_unhandled_method() {
    let response = make_router()
        .oneshot(request(
            Method::POST,
            "/admin/custom_admin_pages/test-name",
            Some(AbstractUser::superuser("root")),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_index_lists_merged_navigation() {
    let response = make_router()
        .oneshot(request(
            Method::GET,
            "/admin/",
            Some(AbstractUser::superuser("root")),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["site_name"], "admin");
    let app_list = json["app_list"].as_array().unwrap();
    let names: Vec<&str> = app_list.iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Custom Admin Pages", "Notifications"]);
    assert_eq!(
        app_list[0]["models"][0],
        serde_json::json!({
            "name": "Test Name",
            "object_name": "Test Name",
            "admin_url": "/admin/custom_admin_pages/test-name",
            "view_only": true,
        })
    );
}

#[tokio::test]
async fn test_index_requires_staff() {
    let response = make_router()
        .oneshot(request(Method::GET, "/admin/", Some(AbstractUser::new("visitor")), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_app_index() {
    let router = make_router();

    let response = router
        .clone()
        .oneshot(request(
            Method::GET,
            "/admin/notifications/",
            Some(AbstractUser::superuser("root")),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["app_label"], "notifications");
    assert_eq!(json["models"][0]["name"], "Send System Notification");

    let response = router
        .oneshot(request(
            Method::GET,
            "/admin/unknown/",
            Some(AbstractUser::superuser("root")),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_urls_rejected() {
    let mut site = make_site();
    site.register_view(ViewRef::admin(Twin)).unwrap();
    let err = site.into_axum_router().unwrap_err();
    assert!(err.to_string().contains("/admin/custom_admin_pages/test-name"));
}

#[tokio::test]
async fn test_accented_view_name_is_reachable_from_navigation() {
    let mut site = make_site();
    site.register_view(ViewRef::admin(CafeView)).unwrap();
    site.build_urlconf().unwrap();

    let root = AdminRequest::get("/admin/").with_user(AbstractUser::superuser("root"));
    let entries = site.get_custom_admin_model_views(Some(&root)).unwrap();
    let url = entries
        .iter()
        .find(|e| e.name == "Café Stats")
        .map(|e| e.admin_url.clone())
        .unwrap();
    assert_eq!(url, "/admin/custom_admin_pages/cafe-stats");

    let response = site
        .into_axum_router()
        .unwrap()
        .oneshot(request(Method::GET, &url, Some(AbstractUser::superuser("root")), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], "café".as_bytes());
}
