//! Views that can be registered as custom admin pages.
//!
//! Any type implementing [`View`] handles requests. Types that also implement
//! [`AdminBaseView`] carry the metadata the admin needs to mount and list them:
//! a display name, an optional app label, optional route overrides and the
//! permissions required to open them.
//!
//! Registration takes [`ViewRef`] values. Plain views and bare handler
//! functions can be wrapped in a `ViewRef` too, and are rejected at
//! registration with a configuration error.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use admin_pages_auth::UserPermissions;
use async_trait::async_trait;
use axum::response::{IntoResponse, Response};
use http::header::{HeaderValue, ALLOW};
use http::{Method, StatusCode};

use crate::request::AdminRequest;

/// A boxed future resolving to a response.
pub type BoxResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A handler function, as opposed to a view type.
pub type ViewFunction = Arc<dyn Fn(AdminRequest) -> BoxResponseFuture + Send + Sync>;

/// A class-based view: HTTP method dispatch with 405 defaults.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use axum::response::{IntoResponse, Response};
/// use admin_pages_site::request::AdminRequest;
/// use admin_pages_site::views::View;
///
/// struct Hello;
///
/// #[async_trait]
/// impl View for Hello {
///     async fn get(&self, _request: AdminRequest) -> Response {
///         "hello".into_response()
///     }
/// }
/// ```
#[async_trait]
pub trait View: Send + Sync + 'static {
    /// Identity of the view type, used to detect double registration.
    ///
    /// Two instances of the same type are the same view.
    fn view_id(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the list of HTTP methods this view allows.
    fn allowed_methods(&self) -> Vec<Method> {
        vec![Method::GET, Method::POST, Method::HEAD, Method::OPTIONS]
    }

    /// Dispatches the request to the handler for its method.
    async fn dispatch(&self, request: AdminRequest) -> Response {
        match *request.method() {
            Method::GET => self.get(request).await,
            Method::POST => self.post(request).await,
            Method::HEAD => self.head(request).await,
            Method::OPTIONS => self.options(request).await,
            _ => self.http_method_not_allowed(request).await,
        }
    }

    /// Handles GET requests. Returns 405 by default.
    async fn get(&self, request: AdminRequest) -> Response {
        self.http_method_not_allowed(request).await
    }

    /// Handles POST requests. Returns 405 by default.
    async fn post(&self, request: AdminRequest) -> Response {
        self.http_method_not_allowed(request).await
    }

    /// Handles HEAD requests. Delegates to `get` by default.
    async fn head(&self, request: AdminRequest) -> Response {
        self.get(request).await
    }

    /// Handles OPTIONS requests with the `Allow` header.
    async fn options(&self, _request: AdminRequest) -> Response {
        let mut response = StatusCode::OK.into_response();
        if let Some(allow) = allow_header(&self.allowed_methods()) {
            response.headers_mut().insert(ALLOW, allow);
        }
        response
    }

    /// Returns 405 Method Not Allowed with the `Allow` header.
    async fn http_method_not_allowed(&self, request: AdminRequest) -> Response {
        tracing::warn!(
            method = %request.method(),
            path = request.path(),
            "method not allowed"
        );
        let mut response = StatusCode::METHOD_NOT_ALLOWED.into_response();
        if let Some(allow) = allow_header(&self.allowed_methods()) {
            response.headers_mut().insert(ALLOW, allow);
        }
        response
    }
}

fn allow_header(methods: &[Method]) -> Option<HeaderValue> {
    let joined: Vec<&str> = methods.iter().map(Method::as_str).collect();
    HeaderValue::from_str(&joined.join(", ")).ok()
}

/// A view that can be mounted inside the admin and listed in its navigation.
///
/// Only `view_name` is required. The other values are derived at registration
/// when left unset:
///
/// - `route_path` becomes the slug of `view_name` (`"Test Name"` -> `"test-name"`)
/// - `route_name` becomes the lower-cased filename-safe form (`"test_name"`)
/// - `app_label` becomes the configured default label
///
/// # Examples
///
/// ```
/// use admin_pages_site::views::{AdminBaseView, View};
///
/// struct SendNotification;
///
/// impl View for SendNotification {}
///
/// impl AdminBaseView for SendNotification {
///     fn view_name(&self) -> Option<&str> {
///         Some("Send System Notification")
///     }
///
///     fn app_label(&self) -> Option<&str> {
///         Some("notifications")
///     }
///
///     fn permission_required(&self) -> &[&str] {
///         &["notifications.send_notification"]
///     }
/// }
/// ```
pub trait AdminBaseView: View {
    /// Display name. Must be non-empty.
    fn view_name(&self) -> Option<&str>;

    /// URL name inside the admin namespace.
    fn route_name(&self) -> Option<&str> {
        None
    }

    /// Path under the app label.
    fn route_path(&self) -> Option<&str> {
        None
    }

    /// Label of the installed app whose navigation group lists the view.
    fn app_label(&self) -> Option<&str> {
        None
    }

    /// Permissions a staff user needs, in `"app_label.codename"` format.
    fn permission_required(&self) -> &[&str] {
        &[]
    }

    /// Whether `user` may see and open this view.
    fn user_has_permission(&self, user: &dyn UserPermissions) -> bool {
        user_has_permission(user, self.permission_required())
    }
}

/// Decides whether `user` may access a view guarded by `permission_required`.
///
/// Inactive users never may. Superusers always may. Other staff users may when
/// they hold every required permission; with none required, any active staff
/// user may. Non-staff users never may.
pub fn user_has_permission(user: &dyn UserPermissions, permission_required: &[&str]) -> bool {
    if !user.is_active() {
        return false;
    }
    if user.is_superuser() {
        return true;
    }
    if !user.is_staff() {
        return false;
    }
    permission_required.is_empty() || user.has_perms(permission_required)
}

/// Something passed to [`register_view`](crate::custom_site::CustomAdminSite::register_view).
///
/// A `ViewRef` iterates as itself, so registration accepts one view or a
/// collection of them.
#[derive(Clone)]
pub enum ViewRef {
    /// A registrable admin view.
    Admin(Arc<dyn AdminBaseView>),
    /// A class-based view that is not an admin view.
    Class(Arc<dyn View>),
    /// A bare handler function.
    Function(ViewFunction),
}

impl ViewRef {
    /// Wraps an admin view.
    pub fn admin<V: AdminBaseView>(view: V) -> Self {
        Self::Admin(Arc::new(view))
    }

    /// Wraps a plain class-based view.
    pub fn class<V: View>(view: V) -> Self {
        Self::Class(Arc::new(view))
    }

    /// Wraps a handler function.
    pub fn function<F, Fut>(handler: F) -> Self
    where
        F: Fn(AdminRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self::Function(Arc::new(move |request: AdminRequest| -> BoxResponseFuture {
            Box::pin(handler(request))
        }))
    }

    /// Identity of the referenced view, or `None` for functions.
    pub fn view_id(&self) -> Option<&'static str> {
        match self {
            Self::Admin(view) => Some(view.view_id()),
            Self::Class(view) => Some(view.view_id()),
            Self::Function(_) => None,
        }
    }
}

impl fmt::Debug for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin(view) => f.debug_tuple("Admin").field(&view.view_id()).finish(),
            Self::Class(view) => f.debug_tuple("Class").field(&view.view_id()).finish(),
            Self::Function(_) => f.write_str("Function"),
        }
    }
}

impl IntoIterator for ViewRef {
    type Item = Self;
    type IntoIter = std::iter::Once<Self>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

impl<V: AdminBaseView> From<Arc<V>> for ViewRef {
    fn from(view: Arc<V>) -> Self {
        Self::Admin(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_pages_auth::{AbstractUser, AnonymousUser};

    struct Hello;

    #[async_trait]
    impl View for Hello {
        async fn get(&self, _request: AdminRequest) -> Response {
            "hello".into_response()
        }
    }

    struct Guarded;

    impl View for Guarded {}

    impl AdminBaseView for Guarded {
        fn view_name(&self) -> Option<&str> {
            Some("Guarded")
        }

        fn permission_required(&self) -> &[&str] {
            &["notifications.send_notification"]
        }
    }

    #[tokio::test]
    async fn test_dispatch_get() {
        let response = Hello.dispatch(AdminRequest::get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dispatch_unhandled_method_is_405() {
        let response = Hello.dispatch(AdminRequest::post("/")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(ALLOW).unwrap(),
            "GET, POST, HEAD, OPTIONS"
        );

        let response = Hello
            .dispatch(AdminRequest::new(Method::DELETE, "/"))
            .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_head_uses_get() {
        let response = Hello.dispatch(AdminRequest::new(Method::HEAD, "/")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_options_lists_methods() {
        let response = Hello.dispatch(AdminRequest::new(Method::OPTIONS, "/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(ALLOW));
    }

    #[test]
    fn test_view_id_is_type_based() {
        assert_eq!(Guarded.view_id(), Guarded.view_id());
        assert_ne!(Guarded.view_id(), Hello.view_id());
        assert!(Guarded.view_id().ends_with("Guarded"));
    }

    #[test]
    fn test_permission_rule() {
        let anonymous = AnonymousUser::new();
        let plain = AbstractUser::new("u");
        let staff = AbstractUser::staff("s");
        let allowed = AbstractUser::staff("a").with_perm("notifications.send_notification");
        let root = AbstractUser::superuser("r");
        let inactive_root = AbstractUser::superuser("r").active(false);

        assert!(!user_has_permission(&anonymous, &[]));
        assert!(!user_has_permission(&plain, &[]));
        assert!(user_has_permission(&staff, &[]));
        assert!(user_has_permission(&root, &["x.y"]));
        assert!(!user_has_permission(&inactive_root, &[]));

        assert!(!Guarded.user_has_permission(&staff));
        assert!(Guarded.user_has_permission(&allowed));
        assert!(Guarded.user_has_permission(&root));
    }

    #[test]
    fn test_view_ref_iterates_as_itself() {
        let refs: Vec<ViewRef> = ViewRef::admin(Guarded).into_iter().collect();
        assert_eq!(refs.len(), 1);
        assert!(matches!(refs[0], ViewRef::Admin(_)));
    }

    #[test]
    fn test_view_ref_ids() {
        assert_eq!(ViewRef::admin(Guarded).view_id(), Some(Guarded.view_id()));
        assert_eq!(ViewRef::class(Hello).view_id(), Some(Hello.view_id()));
        let function = ViewRef::function(|_request| async { "hi".into_response() });
        assert_eq!(function.view_id(), None);
        assert_eq!(format!("{function:?}"), "Function");
    }
}
