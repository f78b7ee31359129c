use thiserror::Error;

/// A configuration problem detected before any page is drawn.
///
/// Every variant names the offending page type, field, or design role so the
/// caller can point the user at the broken part of the input.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown page type: '{page_type}' (page {index})")]
    UnknownPageType { index: usize, page_type: String },

    #[error("Invalid data for '{page_type}' page {index}: {message}")]
    InvalidPageData {
        index: usize,
        page_type: &'static str,
        message: String,
    },

    #[error("Invalid color for role '{role}': {value} ({message})")]
    InvalidColor {
        role: String,
        value: String,
        message: String,
    },

    #[error("Invalid margins: {0}")]
    InvalidMargins(String),

    #[error("Unknown link '{name}' referenced by a call-to-action page")]
    UnknownLink { name: String },
}

impl ConfigError {
    /// The page type string this error is about, when there is one.
    pub fn page_type(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownPageType { page_type, .. } => Some(page_type),
            ConfigError::InvalidPageData { page_type, .. } => Some(page_type),
            _ => None,
        }
    }
}
