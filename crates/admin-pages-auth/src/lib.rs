//! # admin-pages-auth
//!
//! Users and permissions as seen by the admin site. Authentication itself
//! (login, sessions, password hashing) happens upstream; this crate only
//! describes who is making a request and what they may do.
//!
//! ## Modules
//!
//! - [`user`] - [`AbstractUser`], [`AnonymousUser`], [`RequestUser`] and the
//!   [`UserPermissions`] trait
//! - [`permissions`] - Permission records and permission checks

pub mod permissions;
pub mod user;

pub use permissions::Permission;
pub use user::{AbstractUser, AnonymousUser, RequestUser, UserPermissions};
