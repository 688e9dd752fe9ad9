//! The request handed to admin views.

use admin_pages_auth::RequestUser;
use axum::body::Bytes;
use http::request::Parts;
use http::Method;

use crate::context::AdminContext;

/// An incoming admin request.
///
/// Built from the HTTP request by the admin router. The user comes from a
/// [`RequestUser`] extension placed on the request by the authentication
/// layer; requests without one are anonymous.
#[derive(Debug, Clone)]
pub struct AdminRequest {
    method: Method,
    path: String,
    query: Option<String>,
    body: Bytes,
    user: RequestUser,
    context: Option<AdminContext>,
}

impl AdminRequest {
    /// Creates an anonymous request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: Bytes::new(),
            user: RequestUser::default(),
            context: None,
        }
    }

    /// Creates an anonymous `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates an anonymous `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Builds a request from HTTP request parts and a collected body.
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        let user = parts
            .extensions
            .get::<RequestUser>()
            .cloned()
            .unwrap_or_default();
        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(String::from),
            body,
            user,
            context: None,
        }
    }

    /// Sets the requesting user.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<RequestUser>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the query string.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Attaches the admin context.
    #[must_use]
    pub fn with_context(mut self, context: AdminContext) -> Self {
        self.context = Some(context);
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    pub const fn user(&self) -> &RequestUser {
        &self.user
    }

    /// The admin context, present once the router has built it.
    pub const fn admin_context(&self) -> Option<&AdminContext> {
        self.context.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_pages_auth::{AbstractUser, UserPermissions};

    #[test]
    fn test_from_parts_reads_user_extension() {
        let mut request = http::Request::builder()
            .method(Method::POST)
            .uri("/admin/custom_admin_pages/test-name?page=2")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(RequestUser::from(AbstractUser::staff("alice")));
        let (parts, ()) = request.into_parts();

        let req = AdminRequest::from_parts(&parts, Bytes::from_static(b"x=1"));
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.path(), "/admin/custom_admin_pages/test-name");
        assert_eq!(req.query(), Some("page=2"));
        assert_eq!(req.body().as_ref(), b"x=1");
        assert_eq!(req.user().get_username(), "alice");
        assert!(req.user().is_staff());
    }

    #[test]
    fn test_from_parts_without_user_is_anonymous() {
        let (parts, ()) = http::Request::builder()
            .uri("/admin/")
            .body(())
            .unwrap()
            .into_parts();
        let req = AdminRequest::from_parts(&parts, Bytes::new());
        assert!(!req.user().is_authenticated());
        assert!(req.admin_context().is_none());
    }
}
