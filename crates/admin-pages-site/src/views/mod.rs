//! Views for custom admin pages.

pub mod base;

pub use base::{user_has_permission, AdminBaseView, BoxResponseFuture, View, ViewFunction, ViewRef};
