//! Fonts and text measurement.

pub mod encoding;
pub mod error;
pub mod fonts;
pub mod standard;
pub mod text;

pub use self::error::FontError;
pub use self::fonts::{
    FontFace, FontLibrary, FontSubstitution, ResolvedFont, TrueTypeFace, BUNDLED_FONTS,
    FALLBACK_FONTS,
};
pub use self::standard::StandardFont;
pub use self::text::{
    block_width, fit_title, lines_height, text_height, wrap_columns, wrap_lines, FittedTitle,
    MAX_TITLE_LINES,
};
