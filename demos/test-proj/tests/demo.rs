//! End-to-end tests of the demo project.

use admin_pages::prelude::{AbstractUser, AdminRequest};
use admin_pages::site::checks::{check_custom_admin_settings, check_custom_admin_views};
use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app() -> Router {
    test_proj::app(&test_proj::default_settings().unwrap()).unwrap()
}

fn group_names(app_list: &serde_json::Value) -> Vec<String> {
    app_list
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[test]
fn test_settings_pass_checks() {
    let settings = test_proj::default_settings().unwrap();
    let site = test_proj::build_site(&settings).unwrap();
    assert!(check_custom_admin_settings(&settings).is_empty());
    assert!(check_custom_admin_views(&site).is_empty());
}

#[test]
fn test_superuser_navigation() {
    let site = test_proj::build_site(&test_proj::default_settings().unwrap()).unwrap();
    let request = AdminRequest::get("/admin/").with_user(AbstractUser::superuser("root"));
    let app_list = serde_json::to_value(site.get_app_list(&request).unwrap()).unwrap();

    assert_eq!(
        group_names(&app_list),
        vec!["Another Test App", "Custom Admin Pages", "Notifications"]
    );
    assert_eq!(app_list[0]["app_url"], "/admin/another_test_app/");
    assert_eq!(
        app_list[0]["models"][0]["admin_url"],
        "/admin/another_test_app/another-example-view"
    );
    assert_eq!(
        app_list[1]["models"][0]["admin_url"],
        "/admin/custom_admin_pages/example-view"
    );

    let notifications = app_list[2]["models"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["name"], "Send System Notification");
    assert_eq!(notifications[1]["name"], "System notifications");
    assert_eq!(
        notifications[1]["add_url"],
        "/admin/notifications/system_notification/add/"
    );
}

#[test]
fn test_staff_navigation_follows_permissions() {
    let site = test_proj::build_site(&test_proj::default_settings().unwrap()).unwrap();

    let request = AdminRequest::get("/admin/").with_user(AbstractUser::staff("sam"));
    let app_list = serde_json::to_value(site.get_app_list(&request).unwrap()).unwrap();
    assert_eq!(
        group_names(&app_list),
        vec!["Another Test App", "Custom Admin Pages"]
    );

    let sender = AbstractUser::staff("sam").with_perm("notifications.send_notification");
    let request = AdminRequest::get("/admin/").with_user(sender);
    let app_list = serde_json::to_value(site.get_app_list(&request).unwrap()).unwrap();
    assert_eq!(
        group_names(&app_list),
        vec!["Another Test App", "Custom Admin Pages", "Notifications"]
    );
    assert_eq!(app_list[2]["models"].as_array().unwrap().len(), 1);
    assert_eq!(app_list[2]["app_url"], "/admin/notifications/");
}

#[tokio::test]
async fn test_header_user_reaches_view() {
    let request = Request::builder()
        .uri("/admin/custom_admin_pages/example-view")
        .header("x-demo-user", "alice")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Example View");
    assert_eq!(json["user"], "alice");
    assert_eq!(json["context"]["site_header"], "Test Project administration");
}

#[tokio::test]
async fn test_anonymous_request_forbidden() {
    let request = Request::builder()
        .uri("/admin/custom_admin_pages/example-view")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_send_notification() {
    let uri = "/admin/notifications/send-system-notification";

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-demo-user", "bob")
        .body(Body::from("maintenance tonight"))
        .unwrap();
    let (status, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-demo-user", "bob")
        .header("x-demo-perms", "notifications.send_notification")
        .body(Body::from("maintenance tonight"))
        .unwrap();
    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["sent"], "maintenance tonight");

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-demo-user", "root")
        .header("x-demo-role", "superuser")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_lists_navigation() {
    let request = Request::builder()
        .uri("/admin/")
        .header("x-demo-user", "root")
        .header("x-demo-role", "superuser")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["site_header"], "Test Project administration");
    assert_eq!(
        group_names(&json["app_list"]),
        vec!["Another Test App", "Custom Admin Pages", "Notifications"]
    );
}
