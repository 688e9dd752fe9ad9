//! # admin-pages-core
//!
//! Core types, settings, app registry, and error types shared by the
//! admin-pages crates. This crate has no web-framework dependencies.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Text helpers (`slugify`, `get_valid_filename`, `capfirst`)
//! - [`settings`] - Settings struct with defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`apps`] - Installed application registry
//! - [`checks`] - System check messages
//! - [`logging`] - Tracing-based logging integration

pub mod apps;
pub mod checks;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{AdminError, AdminResult};
pub use settings::Settings;
