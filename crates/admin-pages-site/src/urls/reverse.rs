//! Reverse URL resolution.

use admin_pages_core::{AdminError, AdminResult};

use super::resolver::URLResolver;

/// Returns the absolute path of the route named `viewname`.
///
/// Namespaced names are colon-separated (`"admin:test_name"`). When several
/// routes share a name, the first in resolution order wins.
///
/// # Examples
///
/// ```
/// use admin_pages_site::urls::pattern::path;
/// use admin_pages_site::urls::resolver::{include, root, URLEntry};
/// use admin_pages_site::urls::reverse::reverse;
///
/// let admin = include(
///     "admin/",
///     vec![URLEntry::Pattern(path("custom_admin_pages/test-name", Some("test_name")).unwrap())],
///     Some("admin"),
/// )
/// .unwrap();
/// let urlconf = root(vec![URLEntry::Resolver(admin)]).unwrap();
/// assert_eq!(
///     reverse("admin:test_name", &urlconf).unwrap(),
///     "/admin/custom_admin_pages/test-name"
/// );
/// ```
///
/// # Errors
///
/// Returns [`AdminError::NoReverseMatch`] if no route has that name.
pub fn reverse(viewname: &str, urlconf: &URLResolver) -> AdminResult<String> {
    urlconf
        .collect_named_patterns()
        .into_iter()
        .find(|named| named.qualified_name == viewname)
        .map(|named| format!("/{}", named.route))
        .ok_or_else(|| {
            AdminError::NoReverseMatch(format!(
                "Reverse for '{viewname}' not found. '{viewname}' is not a valid view function or pattern name."
            ))
        })
}
