//! Stand-in authentication for the demo server.
//!
//! A real project attaches the logged-in user with its session middleware. The
//! demo trusts request headers instead:
//!
//! - `x-demo-user`: username; absent means anonymous
//! - `x-demo-role`: `superuser`, `staff` (default) or `user`
//! - `x-demo-perms`: comma-separated permissions

use admin_pages::prelude::{AbstractUser, RequestUser};
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Builds the user described by the demo headers.
pub fn user_from_headers(headers: &HeaderMap) -> RequestUser {
    let Some(username) = header(headers, "x-demo-user").filter(|u| !u.is_empty()) else {
        return RequestUser::default();
    };
    let mut user = match header(headers, "x-demo-role").unwrap_or("staff") {
        "superuser" => AbstractUser::superuser(username),
        "user" => AbstractUser::new(username),
        _ => AbstractUser::staff(username),
    };
    if let Some(perms) = header(headers, "x-demo-perms") {
        for perm in perms.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            user = user.with_perm(perm);
        }
    }
    user.into()
}

/// Middleware attaching the [`RequestUser`] extension.
pub async fn demo_user(mut request: Request, next: Next) -> Response {
    let user = user_from_headers(request.headers());
    request.extensions_mut().insert(user);
    next.run(request).await
}
