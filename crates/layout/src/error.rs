use thiserror::Error;

/// Failure to make a font available.
///
/// These never abort a build: the [`FontLibrary`](crate::FontLibrary) turns
/// them into a substitution with a recorded reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Font not found: {name}")]
    NotFound { name: String },

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidData(String),
}
