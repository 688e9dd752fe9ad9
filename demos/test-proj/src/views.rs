//! The demo's custom admin pages.

use admin_pages::prelude::{AdminBaseView, AdminRequest, View, ViewRef};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Renders a page as JSON: its title plus the admin context.
fn render(title: &str, request: &AdminRequest) -> Response {
    Json(serde_json::json!({
        "title": title,
        "user": request.user().get_username(),
        "context": request.admin_context(),
    }))
    .into_response()
}

/// Listed under "Custom Admin Pages".
pub struct ExampleAdminView;

#[async_trait]
impl View for ExampleAdminView {
    async fn get(&self, request: AdminRequest) -> Response {
        render("Example View", &request)
    }
}

impl AdminBaseView for ExampleAdminView {
    fn view_name(&self) -> Option<&str> {
        Some("Example View")
    }

    fn route_name(&self) -> Option<&str> {
        Some("example_view")
    }
}

/// Listed in a group of its own, since `another_test_app` has no models.
pub struct AnotherExampleAdminView;

#[async_trait]
impl View for AnotherExampleAdminView {
    async fn get(&self, request: AdminRequest) -> Response {
        render("Another Example View", &request)
    }
}

impl AdminBaseView for AnotherExampleAdminView {
    fn view_name(&self) -> Option<&str> {
        Some("Another Example View")
    }

    fn app_label(&self) -> Option<&str> {
        Some("another_test_app")
    }
}

/// Listed next to the notification model, for users allowed to send.
pub struct SendNotificationView;

#[async_trait]
impl View for SendNotificationView {
    async fn get(&self, request: AdminRequest) -> Response {
        render("Send System Notification", &request)
    }

    async fn post(&self, request: AdminRequest) -> Response {
        let message = String::from_utf8_lossy(request.body()).trim().to_string();
        if message.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "empty notification" })),
            )
                .into_response();
        }
        tracing::info!(
            sender = request.user().get_username(),
            %message,
            "system notification sent"
        );
        (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "sent": message })),
        )
            .into_response()
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

/// Every page the demo registers.
pub fn all_views() -> Vec<ViewRef> {
    vec![
        ViewRef::admin(ExampleAdminView),
        ViewRef::admin(AnotherExampleAdminView),
        ViewRef::admin(SendNotificationView),
    ]
}
