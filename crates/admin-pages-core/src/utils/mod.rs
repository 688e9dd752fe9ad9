//! Utility functions.
//!
//! - [`text`]: String helpers (`slugify`, `get_valid_filename`, `capfirst`, `title_case`).

pub mod text;
