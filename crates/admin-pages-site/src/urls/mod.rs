//! URL configuration for the admin site.
//!
//! Admin routes are static: a custom view lives at exactly one path and takes
//! no URL parameters. The URL conf is a tree of [`URLEntry`](resolver::URLEntry)
//! values that supports resolving a path to a named route and reversing a
//! namespaced name (`"admin:test_name"`) back to a path.
//!
//! - [`pattern`] - Leaf patterns
//! - [`resolver`] - Prefixed and namespaced groups of patterns
//! - [`reverse`] - Name to path lookup
//! - [`conf`] - The routes contributed by custom views

pub mod conf;
pub mod pattern;
pub mod resolver;
pub mod reverse;
