//! leafpress renders multi-page PDF products from a declarative JSON
//! configuration.
//!
//! A [`ProductConfig`] names a design system (colors, fonts, page size,
//! margins and one of three layouts) and an ordered list of pages. The
//! [`PdfBuilder`] compiles every page into typed data, then draws them in
//! order onto a single canvas. Chapter pages are paginated: their paragraphs
//! flow over as many physical pages as they need.
//!
//! ```no_run
//! use leafpress::{PdfBuilder, ProductConfig};
//!
//! let config = ProductConfig::from_json(r#"{
//!     "title": "Morning Pages",
//!     "pages": [{ "type": "cover", "data": {} }]
//! }"#)?;
//! let bytes = PdfBuilder::default().build(&config)?;
//! # Ok::<(), leafpress::BuildError>(())
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod renderers;

#[cfg(test)]
mod test_utils;

pub use builder::{FONT_DIR_ENV, PdfBuilder};
pub use context::{PageNumberStyle, RenderContext, TextStyle, TitleStyle};
pub use error::{BuildError, BuildOutput, Warning};
pub use extract::{
    ExtractError, ExtractedChapter, ExtractedText, extract_file, heading_text, paragraphs_from_text,
};
pub use pagination::{ChapterFlow, FlowStyle, FlowSummary, PageChrome};
pub use renderers::{ChapterVariant, chapter_variant, render_page};

pub use leafpress_layout::FontLibrary;
pub use leafpress_types::{ConfigError, DesignSystem, Layout, PageData, PageSpec, ProductConfig};
