use crate::error::RenderError;
use crate::raster::RasterImage;
use leafpress_layout::FontFace;
use leafpress_types::{Color, Rect, Size};

/// Horizontal anchoring of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Left,
    Right,
    Center,
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Fill,
    Stroke,
    FillStroke,
}

impl Paint {
    pub fn new(fill: bool, stroke: bool) -> Option<Self> {
        match (fill, stroke) {
            (true, true) => Some(Paint::FillStroke),
            (true, false) => Some(Paint::Fill),
            (false, true) => Some(Paint::Stroke),
            (false, false) => None,
        }
    }

    pub fn fills(self) -> bool {
        matches!(self, Paint::Fill | Paint::FillStroke)
    }

    pub fn strokes(self) -> bool {
        matches!(self, Paint::Stroke | Paint::FillStroke)
    }
}

/// A page-based drawing canvas in page space (origin bottom-left, y up).
///
/// Drawing calls apply to the current page. [`DrawSurface::show_page`]
/// finalizes it and starts the next one; graphics state (colors, line width)
/// is reset on the new page and no cursor position is carried over.
pub trait DrawSurface: Send {
    fn page_size(&self) -> Size;

    fn set_metadata(&mut self, title: &str, author: &str);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    /// Draws one line of text with its baseline at `y`.
    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &FontFace,
        size: f32,
        anchor: TextAnchor,
    );

    fn rect(&mut self, rect: Rect, paint: Paint);

    fn round_rect(&mut self, rect: Rect, radius: f32, paint: Paint);

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);

    /// Strokes a straight line with the current stroke color and width.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    /// Places `image` stretched to `rect`; callers fit it beforehand.
    fn draw_image(&mut self, image: &RasterImage, rect: Rect);

    /// Makes `rect` a clickable link to `url`.
    fn link_url(&mut self, rect: Rect, url: &str);

    fn show_page(&mut self);

    /// Zero-based index of the page currently receiving drawing calls.
    fn page_index(&self) -> usize;

    fn string_width(&self, text: &str, font: &FontFace, size: f32) -> f32 {
        font.string_width(text, size)
    }

    /// Serializes the document. Pages that received no drawing calls are
    /// left out.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_from_flags() {
        assert_eq!(Paint::new(true, false), Some(Paint::Fill));
        assert_eq!(Paint::new(false, true), Some(Paint::Stroke));
        assert_eq!(Paint::new(false, false), None);
        assert!(Paint::FillStroke.fills() && Paint::FillStroke.strokes());
        assert!(!Paint::Stroke.fills());
    }
}
