use crate::extract::ExtractError;
use leafpress_layout::FontSubstitution;
use leafpress_render_core::RenderError;
use leafpress_types::ConfigError;
use thiserror::Error;

/// A failed build. No bytes are produced when one of these is returned.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),
}

impl BuildError {
    /// True for problems with the input rather than with producing output.
    pub fn is_config(&self) -> bool {
        matches!(self, BuildError::Config(_))
    }
}

/// A resource that could not be used as requested. The build continued with
/// a substitute.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("font '{requested}' replaced by '{used}': {reason}")]
    FontSubstituted {
        requested: String,
        used: String,
        reason: String,
    },
    #[error("image '{path}' skipped: {reason}")]
    ImageSkipped {
        path: String,
        reason: String,
    },
}

impl From<FontSubstitution> for Warning {
    fn from(sub: FontSubstitution) -> Self {
        Warning::FontSubstituted {
            requested: sub.requested,
            used: sub.used,
            reason: sub.reason,
        }
    }
}

/// The result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<Warning>,
}
