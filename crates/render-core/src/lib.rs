//! Core rendering abstractions.
//!
//! - `DrawSurface`, the page-based canvas every page renderer draws on
//! - raster image decoding and fit-box math
//! - the rendering error type

mod error;
mod raster;
mod traits;

pub use error::RenderError;
pub use raster::{fit_within, ImageData, RasterImage};
pub use traits::{DrawSurface, Paint, TextAnchor};
