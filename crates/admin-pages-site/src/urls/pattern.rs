//! Leaf URL patterns.

use std::fmt;

use admin_pages_core::{AdminError, AdminResult};

/// A static route with an optional name.
///
/// Routes are relative: they never start with `/`, and their parent
/// resolvers' routes are prepended when matching or reversing.
#[derive(Clone, PartialEq, Eq)]
pub struct URLPattern {
    route: String,
    name: Option<String>,
}

impl fmt::Debug for URLPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("URLPattern")
            .field("route", &self.route)
            .field("name", &self.name)
            .finish()
    }
}

impl URLPattern {
    /// Returns the route.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the pattern name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Matches the start of `path`, returning what is left after the route.
    pub fn match_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        path.strip_prefix(self.route.as_str())
    }

    /// Whether the route matches `path` exactly.
    pub fn full_match(&self, path: &str) -> bool {
        self.route == path
    }
}

/// Creates a named or unnamed leaf pattern.
///
/// # Examples
///
/// ```
/// use admin_pages_site::urls::pattern::path;
///
/// let p = path("custom_admin_pages/test-name", Some("test_name")).unwrap();
/// assert!(p.full_match("custom_admin_pages/test-name"));
/// assert_eq!(p.name(), Some("test_name"));
/// ```
///
/// # Errors
///
/// Returns [`AdminError::ImproperlyConfigured`] if the route starts with `/`
/// or contains a `<` parameter placeholder.
pub fn path(route: &str, name: Option<&str>) -> AdminResult<URLPattern> {
    if route.starts_with('/') {
        return Err(AdminError::ImproperlyConfigured(format!(
            "Your URL pattern '{route}' has a route beginning with a '/'. Remove this slash."
        )));
    }
    if route.contains(['<', '>', '{', '}', '*']) {
        return Err(AdminError::ImproperlyConfigured(format!(
            "Your URL pattern '{route}' contains a parameter; admin routes are static."
        )));
    }
    Ok(URLPattern {
        route: route.to_string(),
        name: name.map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_path() {
        let p = path("admin/", None).unwrap();
        assert_eq!(p.match_path("admin/blog/"), Some("blog/"));
        assert_eq!(p.match_path("admin/"), Some(""));
        assert_eq!(p.match_path("other/"), None);
    }

    #[test]
    fn test_empty_route_matches_everything_as_prefix() {
        let p = path("", None).unwrap();
        assert_eq!(p.match_path("anything"), Some("anything"));
        assert!(p.full_match(""));
        assert!(!p.full_match("x"));
    }

    #[test]
    fn test_leading_slash_rejected() {
        let err = path("/admin/", None).unwrap_err();
        assert!(matches!(err, AdminError::ImproperlyConfigured(_)));
    }

    #[test]
    fn test_parameters_rejected() {
        assert!(path("pages/<int:pk>/", None).is_err());
        assert!(path("stats/{", None).is_err());
        assert!(path("pages/{id}", None).is_err());
        assert!(path("files/*rest", None).is_err());
    }
}
