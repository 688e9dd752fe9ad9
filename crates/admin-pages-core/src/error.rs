//! Error types for admin-pages.
//!
//! [`AdminError`] covers the configuration, registry, URL resolution and
//! settings-loading failures raised while assembling an admin site. They are
//! programming or deployment mistakes and are surfaced to the developer, never
//! retried.

use thiserror::Error;

/// The primary error type for admin-pages.
///
/// Each variant maps to an HTTP status code via [`AdminError::status_code`],
/// which the admin router uses when an error escapes a request handler.
#[derive(Error, Debug)]
pub enum AdminError {
    // ── Configuration ────────────────────────────────────────────────

    /// A view or setting is misconfigured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A settings value is missing or could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Registry ─────────────────────────────────────────────────────

    /// The view or model is already registered with the admin site.
    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    /// The view or model is not registered with the admin site.
    #[error("Not registered: {0}")]
    NotRegistered(String),

    // ── URL resolution ───────────────────────────────────────────────

    /// A registered view's route could not be found when building navigation.
    ///
    /// This almost always means the URL conf was built before the view was
    /// registered.
    #[error("Import error: {0}")]
    ImportError(String),

    /// No named route matches a reverse lookup.
    #[error("No reverse match: {0}")]
    NoReverseMatch(String),

    /// No route matches a path.
    #[error("Not found: {0}")]
    NotFound(String),

    // ── Access ───────────────────────────────────────────────────────

    /// The requesting user may not access the resource.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // ── Serialization / IO ───────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdminError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `PermissionDenied` -> 403
    /// - `NotFound`, `NoReverseMatch` -> 404
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PermissionDenied(_) => 403,
            Self::NotFound(_) | Self::NoReverseMatch(_) => 404,
            Self::ImproperlyConfigured(_)
            | Self::ConfigurationError(_)
            | Self::AlreadyRegistered(_)
            | Self::NotRegistered(_)
            | Self::ImportError(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }

    /// Returns `true` for errors caused by how views or settings are declared.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ImproperlyConfigured(_) | Self::ConfigurationError(_)
        )
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, AdminError>`.
pub type AdminResult<T> = Result<T, AdminError>;
