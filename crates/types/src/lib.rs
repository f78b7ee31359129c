pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod page;

pub use color::Color;
pub use config::{DesignSystem, Layout, LinkSpec, PageSpec, ProductConfig, DEFAULT_FONT};
pub use error::ConfigError;
pub use geometry::{Margins, PageSize, Rect, Size, INCH};
pub use page::{
    ChapterData, CoverData, CtaData, CtaLink, LetterData, PageData, PageKind, PromptData,
    SectionData, TocData, TocEntry, WritingData,
};
