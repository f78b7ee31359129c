//! Document orchestration: one build turns a [`ProductConfig`] into PDF bytes.

use crate::context::RenderContext;
use crate::error::{BuildError, BuildOutput};
use crate::renderers::render_page;
use leafpress_layout::FontLibrary;
use leafpress_render_core::DrawSurface;
use leafpress_render_lopdf::LopdfCanvas;
use leafpress_types::ProductConfig;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Environment variable naming the directory bundled fonts are loaded from.
pub const FONT_DIR_ENV: &str = "LEAFPRESS_FONT_DIR";

/// Font roles registered before the first page is drawn.
const FONT_ROLES: [&str; 4] = ["heading", "body", "body_italic", "mono"];

/// Builds PDF documents from product configurations.
///
/// A builder owns a [`FontLibrary`] that is shared by every build it runs,
/// including concurrent ones started through [`PdfBuilder::build_batch`].
/// Each build gets its own canvas and [`RenderContext`].
#[derive(Debug, Clone)]
pub struct PdfBuilder {
    fonts: FontLibrary,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        let dir = std::env::var_os(FONT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("fonts"));
        Self::new(FontLibrary::with_font_dir(dir))
    }
}

impl PdfBuilder {
    pub fn new(fonts: FontLibrary) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Builds the document and returns its bytes.
    pub fn build(&self, config: &ProductConfig) -> Result<Vec<u8>, BuildError> {
        self.build_report(config).map(|output| output.bytes)
    }

    /// Builds the document and reports page count and resource warnings.
    ///
    /// Every page is compiled before anything is drawn, so a configuration
    /// error never leaves a half-built document behind.
    pub fn build_report(&self, config: &ProductConfig) -> Result<BuildOutput, BuildError> {
        log::info!("Building '{}' ({} page specs)", config.title, config.pages.len());
        config.design.validate()?;
        let pages = config.compile_pages()?;

        for role in FONT_ROLES {
            self.fonts.ensure_registered(config.design.font(role));
        }

        let mut canvas = LopdfCanvas::new(config.design.page_size.dimensions());
        canvas.set_metadata(&config.title, &config.author);
        let mut ctx = RenderContext::new(Box::new(canvas), &config.design, self.fonts.clone());

        for page in &pages {
            render_page(&mut ctx, page, config);
        }

        let page_count = ctx.page_number();
        let (bytes, warnings) = ctx.finish()?;
        for warning in &warnings {
            log::warn!("{}", warning);
        }
        log::info!(
            "Built '{}': {} page(s), {} bytes, {} warning(s)",
            config.title,
            page_count,
            bytes.len(),
            warnings.len()
        );
        Ok(BuildOutput {
            bytes,
            page_count,
            warnings,
        })
    }

    /// Builds the document and writes it to `path`.
    pub fn build_to_file(
        &self,
        config: &ProductConfig,
        path: impl AsRef<Path>,
    ) -> Result<BuildOutput, BuildError> {
        let output = self.build_report(config)?;
        std::fs::write(path.as_ref(), &output.bytes)?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(output)
    }

    /// Builds several independent documents. Results come back in input order.
    #[cfg(feature = "parallel")]
    pub fn build_batch(&self, configs: &[ProductConfig]) -> Vec<Result<Vec<u8>, BuildError>> {
        configs.par_iter().map(|config| self.build(config)).collect()
    }

    /// Builds several independent documents. Results come back in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn build_batch(&self, configs: &[ProductConfig]) -> Vec<Result<Vec<u8>, BuildError>> {
        configs.iter().map(|config| self.build(config)).collect()
    }
}
