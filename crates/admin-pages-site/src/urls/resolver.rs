//! URL resolver and namespace support.
//!
//! A [`URLResolver`] matches a prefix and hands the rest of the path to its
//! children, which are leaf patterns or further resolvers. A resolver may carry
//! a namespace; names inside it are then addressed as `"namespace:name"`.

use std::fmt;

use admin_pages_core::{AdminError, AdminResult};

use super::pattern::{self, URLPattern};

/// A named route found in a resolver tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRoute {
    /// The namespaced name, e.g. `"admin:test_name"`.
    pub qualified_name: String,
    /// The full route from the root, e.g. `"admin/custom_admin_pages/test-name"`.
    pub route: String,
}

/// The result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverMatch {
    /// The name of the matched pattern, if any.
    pub url_name: Option<String>,
    /// The namespaces in the resolution chain (outermost first).
    pub namespaces: Vec<String>,
    /// The full matched route.
    pub route: String,
}

impl ResolverMatch {
    /// Returns the fully-qualified view name, e.g. `"admin:test_name"`.
    pub fn view_name(&self) -> String {
        let mut parts: Vec<&str> = self.namespaces.iter().map(String::as_str).collect();
        if let Some(name) = &self.url_name {
            parts.push(name);
        }
        parts.join(":")
    }
}

/// An entry in a URL configuration.
pub enum URLEntry {
    Pattern(URLPattern),
    Resolver(URLResolver),
}

impl fmt::Debug for URLEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Self::Resolver(r) => f.debug_tuple("Resolver").field(r).finish(),
        }
    }
}

/// A prefix with child entries and an optional namespace.
pub struct URLResolver {
    pattern: URLPattern,
    url_patterns: Vec<URLEntry>,
    namespace: Option<String>,
}

impl fmt::Debug for URLResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("URLResolver")
            .field("pattern", &self.pattern)
            .field("url_patterns", &self.url_patterns)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl URLResolver {
    /// Creates a resolver with the given prefix pattern and child entries.
    pub fn new(pattern: URLPattern, url_patterns: Vec<URLEntry>, namespace: Option<&str>) -> Self {
        Self {
            pattern,
            url_patterns,
            namespace: namespace.map(String::from),
        }
    }

    /// Returns the prefix pattern.
    pub const fn pattern(&self) -> &URLPattern {
        &self.pattern
    }

    /// Returns the child entries.
    pub fn url_patterns(&self) -> &[URLEntry] {
        &self.url_patterns
    }

    /// Returns the namespace, if set.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Resolves a path to the pattern it names.
    ///
    /// A leading `/` on `path` is ignored. Children are tried in order and the
    /// first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no pattern matches the path.
    pub fn resolve(&self, path: &str) -> AdminResult<ResolverMatch> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        self.resolve_relative(relative)
            .ok_or_else(|| AdminError::NotFound(format!("No URL pattern matches '{path}'")))
    }

    fn resolve_relative(&self, path: &str) -> Option<ResolverMatch> {
        let remaining = self.pattern.match_path(path)?;

        let mut found = self.url_patterns.iter().find_map(|entry| match entry {
            URLEntry::Pattern(child) => child.full_match(remaining).then(|| ResolverMatch {
                url_name: child.name().map(String::from),
                namespaces: Vec::new(),
                route: child.route().to_string(),
            }),
            URLEntry::Resolver(child) => child.resolve_relative(remaining),
        })?;

        if let Some(ns) = &self.namespace {
            found.namespaces.insert(0, ns.clone());
        }
        found.route = format!("{}{}", self.pattern.route(), found.route);
        Some(found)
    }

    /// Collects every named pattern in the tree, in resolution order.
    pub fn collect_named_patterns(&self) -> Vec<NamedRoute> {
        let mut result = Vec::new();
        self.collect_into(&mut result, &[], "");
        result
    }

    fn collect_into(&self, result: &mut Vec<NamedRoute>, parent_namespaces: &[&str], parent_route: &str) {
        let mut namespaces = parent_namespaces.to_vec();
        if let Some(ns) = &self.namespace {
            namespaces.push(ns);
        }
        let route = format!("{parent_route}{}", self.pattern.route());

        for entry in &self.url_patterns {
            match entry {
                URLEntry::Pattern(child) => {
                    if let Some(name) = child.name() {
                        let qualified_name = if namespaces.is_empty() {
                            name.to_string()
                        } else {
                            format!("{}:{name}", namespaces.join(":"))
                        };
                        result.push(NamedRoute {
                            qualified_name,
                            route: format!("{route}{}", child.route()),
                        });
                    }
                }
                URLEntry::Resolver(child) => child.collect_into(result, &namespaces, &route),
            }
        }
    }
}

/// Groups `patterns` under `prefix`, optionally inside a namespace.
///
/// # Examples
///
/// ```
/// use admin_pages_site::urls::pattern::path;
/// use admin_pages_site::urls::resolver::{include, root, URLEntry};
///
/// let admin = include(
///     "admin/",
///     vec![URLEntry::Pattern(path("", Some("index")).unwrap())],
///     Some("admin"),
/// )
/// .unwrap();
/// let urlconf = root(vec![URLEntry::Resolver(admin)]).unwrap();
/// assert_eq!(urlconf.resolve("/admin/").unwrap().view_name(), "admin:index");
/// ```
pub fn include(prefix: &str, patterns: Vec<URLEntry>, namespace: Option<&str>) -> AdminResult<URLResolver> {
    let prefix_pattern = pattern::path(prefix, None)?;
    Ok(URLResolver::new(prefix_pattern, patterns, namespace))
}

/// Creates the root resolver of a URL conf.
pub fn root(patterns: Vec<URLEntry>) -> AdminResult<URLResolver> {
    include("", patterns, None)
}
