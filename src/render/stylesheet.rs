//! Built-in stylesheet and stylesheet loading.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// The built-in stylesheet, based on the Ayu Light theme from the amfora
/// contrib collection.
pub const DEFAULT_STYLESHEET: &str = include_str!("../../assets/default.css");

/// Load a stylesheet from disk, or return the built-in default.
///
/// The content is opaque to the rest of the pipeline; no validation is
/// performed beyond it being readable UTF-8.
pub fn load_stylesheet(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(DEFAULT_STYLESHEET.to_string()),
    }
}
