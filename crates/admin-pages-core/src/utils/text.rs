//! String utility functions.
//!
//! These mirror the Django text utilities the admin relies on to derive URL
//! segments and route names from display names.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AdminError, AdminResult};

/// Converts a string to a URL-friendly slug.
///
/// Decomposes accented letters and drops what is left outside ASCII, so the
/// slug is a valid path segment as-is. Then converts to lowercase, removes
/// characters that are not alphanumerics,
/// underscores, hyphens or whitespace, replaces runs of whitespace and hyphens
/// with a single hyphen, and strips leading and trailing hyphens and
/// underscores.
///
/// # Examples
///
/// ```
/// use admin_pages_core::utils::text::slugify;
///
/// assert_eq!(slugify("Test Name"), "test-name");
/// assert_eq!(slugify("  Spaced  Out!  "), "spaced-out");
/// assert_eq!(slugify("already-slugged"), "already-slugged");
/// assert_eq!(slugify("Café Stats"), "cafe-stats");
/// ```
pub fn slugify(s: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    static MULTI_HYPHEN: OnceLock<Regex> = OnceLock::new();

    let non_alnum = NON_ALNUM.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap());
    let multi_hyphen = MULTI_HYPHEN.get_or_init(|| Regex::new(r"[-\s]+").unwrap());

    let s: String = s.nfkd().filter(char::is_ascii).collect();
    let s = s.to_lowercase();
    let s = non_alnum.replace_all(&s, "");
    let s = multi_hyphen.replace_all(&s, "-");
    s.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Returns a string that is safe to use as a file name or lookup key.
///
/// Strips surrounding whitespace, converts inner spaces to underscores and
/// removes everything that is not alphanumeric, a dash, an underscore or a
/// dot. Case is preserved.
///
/// # Errors
///
/// Returns [`AdminError::ImproperlyConfigured`] if nothing usable is left
/// (an empty string, `"."` or `".."`).
///
/// # Examples
///
/// ```
/// use admin_pages_core::utils::text::get_valid_filename;
///
/// assert_eq!(get_valid_filename("Test Name").unwrap(), "Test_Name");
/// assert_eq!(get_valid_filename("john's portrait.jpg").unwrap(), "johns_portrait.jpg");
/// assert!(get_valid_filename("???").is_err());
/// ```
pub fn get_valid_filename(s: &str) -> AdminResult<String> {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let invalid = INVALID.get_or_init(|| Regex::new(r"[^-\w.]").unwrap());

    let cleaned = s.trim().replace(' ', "_");
    let cleaned = invalid.replace_all(&cleaned, "").into_owned();
    if matches!(cleaned.as_str(), "" | "." | "..") {
        return Err(AdminError::ImproperlyConfigured(format!(
            "Could not derive a valid file name from '{s}'"
        )));
    }
    Ok(cleaned)
}

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use admin_pages_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("articles"), "Articles");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Capitalizes the first character of every whitespace-separated word.
///
/// # Examples
///
/// ```
/// use admin_pages_core::utils::text::title_case;
///
/// assert_eq!(title_case("another test app"), "Another Test App");
/// ```
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(capfirst)
        .collect::<Vec<_>>()
        .join(" ")
}
