//! Per-build drawing session: one surface, one design, the page counter and
//! the helpers every page variant draws with.

use crate::error::Warning;
use leafpress_layout::{fit_title, wrap_lines, FontFace, FontLibrary};
use leafpress_render_core::{fit_within, DrawSurface, Paint, RasterImage, RenderError, TextAnchor};
use leafpress_types::{Color, DesignSystem, Layout, Margins, Rect};
use std::collections::HashMap;
use std::path::Path;

/// Line height used by [`RenderContext::draw_text_wrapped`] callers by default.
pub const WRAPPED_LINE_HEIGHT: f32 = 1.65;
pub const RIGHT_ALIGNED_LINE_HEIGHT: f32 = 1.55;
pub const TITLE_LINE_HEIGHT: f32 = 1.3;

/// Where the page number sits in the bottom margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumberStyle {
    Right,
    Center,
}

/// A resolved font, size and fill color for a run of text.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

/// Parameters of an auto-fitted title.
#[derive(Debug, Clone)]
pub struct TitleStyle {
    pub face: FontFace,
    pub max_size: f32,
    pub min_size: f32,
    pub color: Color,
    pub align: TextAnchor,
    pub line_height: f32,
}

impl TitleStyle {
    pub fn new(face: FontFace, max_size: f32, min_size: f32, color: Color) -> Self {
        Self {
            face,
            max_size,
            min_size,
            color,
            align: TextAnchor::Left,
            line_height: TITLE_LINE_HEIGHT,
        }
    }

    pub fn line_height(mut self, factor: f32) -> Self {
        self.line_height = factor;
        self
    }

    pub fn align(mut self, align: TextAnchor) -> Self {
        self.align = align;
        self
    }
}

pub struct RenderContext {
    surface: Box<dyn DrawSurface>,
    design: DesignSystem,
    fonts: FontLibrary,
    faces: HashMap<String, FontFace>,
    warnings: Vec<Warning>,
    page: usize,
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    pub margins: Margins,
    /// Width between the left and right margins.
    pub text_area_width: f32,
}

impl RenderContext {
    pub fn new(surface: Box<dyn DrawSurface>, design: &DesignSystem, fonts: FontLibrary) -> Self {
        let size = surface.page_size();
        let margins = design.margins;
        Self {
            surface,
            design: design.clone(),
            fonts,
            faces: HashMap::new(),
            warnings: Vec::new(),
            page: 0,
            width: size.width,
            height: size.height,
            margins,
            text_area_width: size.width - margins.left - margins.right,
        }
    }

    pub fn layout(&self) -> Layout {
        self.design.layout
    }

    /// Number of pages started so far; the current page's number.
    pub fn page_number(&self) -> usize {
        self.page
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn surface(&mut self) -> &mut dyn DrawSurface {
        self.surface.as_mut()
    }

    pub fn color(&self, role: &str) -> Color {
        self.design.color(role)
    }

    /// Resolves the font a design assigns to `role`.
    pub fn font(&mut self, role: &str) -> FontFace {
        let name = self.design.font(role).to_string();
        self.face(&name)
    }

    /// Resolves a font identifier, recording a warning the first time a
    /// substitute is used for it.
    pub fn face(&mut self, name: &str) -> FontFace {
        if let Some(face) = self.faces.get(name) {
            return face.clone();
        }
        let resolved = self.fonts.resolve(name);
        if let Some(substitution) = resolved.substitution {
            log::warn!(
                "Using '{}' in place of font '{}': {}",
                substitution.used,
                substitution.requested,
                substitution.reason
            );
            self.warnings.push(substitution.into());
        }
        self.faces.insert(name.to_string(), resolved.face.clone());
        resolved.face
    }

    /// Text style from a design font role and color role.
    pub fn text_style(&mut self, font_role: &str, size: f32, color_role: &str) -> TextStyle {
        TextStyle {
            face: self.font(font_role),
            size,
            color: self.color(color_role),
        }
    }

    /// Text style from a concrete font name and a color role.
    pub fn named_style(&mut self, font: &str, size: f32, color_role: &str) -> TextStyle {
        TextStyle {
            face: self.face(font),
            size,
            color: self.color(color_role),
        }
    }

    pub fn string_width(&self, text: &str, style: &TextStyle) -> f32 {
        self.surface.string_width(text, &style.face, style.size)
    }

    // -- Pages ---------------------------------------------------------------

    /// Begins a page: bumps the page counter and fills the background with
    /// `background` when given.
    pub fn start_page(&mut self, background: Option<&str>) {
        self.page += 1;
        if let Some(role) = background {
            self.fill_background(role);
        }
    }

    /// Finalizes the current page. The page counter is left alone.
    pub fn new_page(&mut self) {
        self.surface.show_page();
    }

    pub fn fill_background(&mut self, role: &str) {
        let color = self.color(role);
        self.fill_rect(Rect::new(0.0, 0.0, self.width, self.height), color);
    }

    pub fn draw_header_bar(&mut self, role: &str) {
        let color = self.color(role);
        self.fill_rect(Rect::new(0.0, self.height - 18.0, self.width, 18.0), color);
    }

    /// Vertical band on the left edge spanning the bottom to the top margin.
    pub fn draw_sidebar(&mut self, role: &str, width: f32, x: f32) {
        let color = self.color(role);
        let height = self.height - self.margins.top - self.margins.bottom;
        self.fill_rect(Rect::new(x, self.margins.bottom, width, height), color);
    }

    /// Draws the page number below the bottom margin. The first page is
    /// never numbered.
    pub fn draw_page_number(&mut self, style: PageNumberStyle) {
        if self.page < 2 {
            return;
        }
        let text_style = self.text_style("mono", 7.0, "muted");
        let label = self.page.to_string();
        let y = self.margins.bottom - 20.0;
        match style {
            PageNumberStyle::Center => {
                self.draw_string(&text_style, self.width / 2.0, y, &label, TextAnchor::Center)
            }
            PageNumberStyle::Right => self.draw_string(
                &text_style,
                self.width - self.margins.right,
                y,
                &label,
                TextAnchor::Right,
            ),
        }
    }

    // -- Text ----------------------------------------------------------------

    /// Draws one line of text.
    pub fn draw_string(&mut self, style: &TextStyle, x: f32, y: f32, text: &str, anchor: TextAnchor) {
        self.surface.set_fill_color(style.color);
        self.surface.draw_text(x, y, text, &style.face, style.size, anchor);
    }

    /// Draws `text` left-aligned at `x`, wrapped to `max_width`. Returns the
    /// baseline below the last line.
    pub fn draw_text_wrapped(
        &mut self,
        text: &str,
        style: &TextStyle,
        x: f32,
        y: f32,
        max_width: f32,
        line_height: f32,
    ) -> f32 {
        self.draw_lines(text, style, x, y, max_width, line_height, TextAnchor::Left)
    }

    /// Draws `text` right-aligned against the right margin.
    pub fn draw_right_aligned_text(
        &mut self,
        text: &str,
        style: &TextStyle,
        y: f32,
        max_width: f32,
        line_height: f32,
    ) -> f32 {
        let right = self.width - self.margins.right;
        self.draw_lines(text, style, right, y, max_width, line_height, TextAnchor::Right)
    }

    /// Draws one centered line. Returns `y` moved down by one and a half
    /// times the font size.
    pub fn draw_centered_text(&mut self, text: &str, style: &TextStyle, y: f32) -> f32 {
        self.draw_string(style, self.width / 2.0, y, text, TextAnchor::Center);
        y - style.size * 1.5
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_lines(
        &mut self,
        text: &str,
        style: &TextStyle,
        x: f32,
        mut y: f32,
        max_width: f32,
        line_height: f32,
        anchor: TextAnchor,
    ) -> f32 {
        let lines = wrap_lines(text, &style.face, style.size, max_width);
        if lines.is_empty() {
            return y;
        }
        self.surface.set_fill_color(style.color);
        let step = style.size * line_height;
        for line in &lines {
            self.surface.draw_text(x, y, line, &style.face, style.size, anchor);
            y -= step;
        }
        y
    }

    /// Draws a title at the largest size that keeps it within three lines.
    /// Left-aligned titles start at `x`; centered and right-aligned ones use
    /// the page center and the right margin.
    pub fn draw_title_fitted(
        &mut self,
        text: &str,
        title: &TitleStyle,
        x: f32,
        mut y: f32,
        max_width: f32,
    ) -> f32 {
        let fitted = fit_title(text, &title.face, title.max_size, title.min_size, max_width);
        let anchor_x = match title.align {
            TextAnchor::Left => x,
            TextAnchor::Center => self.width / 2.0,
            TextAnchor::Right => self.width - self.margins.right,
        };
        self.surface.set_fill_color(title.color);
        let step = fitted.size * title.line_height;
        for line in &fitted.lines {
            self.surface
                .draw_text(anchor_x, y, line, &title.face, fitted.size, title.align);
            y -= step;
        }
        y
    }

    // -- Shapes --------------------------------------------------------------

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.surface.set_fill_color(color);
        self.surface.rect(rect, Paint::Fill);
    }

    /// Rounded rectangle, filled and/or stroked with a 0.5 pt outline.
    pub fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
    ) {
        if let Some(color) = fill {
            self.surface.set_fill_color(color);
        }
        if let Some(color) = stroke {
            self.surface.set_stroke_color(color);
            self.surface.set_line_width(0.5);
        }
        if let Some(paint) = Paint::new(fill.is_some(), stroke.is_some()) {
            self.surface.round_rect(rect, radius, paint);
        }
    }

    /// A filled disc with a centered Helvetica-Bold label.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_numbered_circle(
        &mut self,
        x: f32,
        y: f32,
        label: &str,
        background: Color,
        text: Color,
        radius: f32,
        font_size: f32,
    ) {
        self.surface.set_fill_color(background);
        self.surface.circle(x, y, radius, Paint::Fill);
        let style = TextStyle {
            face: self.face("Helvetica-Bold"),
            size: font_size,
            color: text,
        };
        self.draw_string(&style, x, y - font_size * 0.35, label, TextAnchor::Center);
    }

    /// Horizontal rules across the text area from `y_start` down to and
    /// including `y_end`.
    pub fn draw_writing_lines(&mut self, y_start: f32, y_end: f32, spacing: f32, role: &str, width: f32) {
        if spacing <= 0.0 {
            return;
        }
        let color = self.color(role);
        self.surface.set_stroke_color(color);
        self.surface.set_line_width(width);
        let (left, right) = (self.margins.left, self.width - self.margins.right);
        let mut y = y_start;
        while y >= y_end {
            self.surface.line(left, y, right, y);
            y -= spacing;
        }
    }

    pub fn draw_accent_line(&mut self, x1: f32, y: f32, x2: f32, role: &str, width: f32) {
        let color = self.color(role);
        self.surface.set_stroke_color(color);
        self.surface.set_line_width(width);
        self.surface.line(x1, y, x2, y);
    }

    pub fn draw_link(&mut self, rect: Rect, url: &str) {
        self.surface.link_url(rect, url);
    }

    /// Places the image at `path` inside a `max_width` x `max_height` box
    /// whose top edge is at `y`. Returns the y below the image plus spacing,
    /// or `y` itself when there is nothing to draw.
    ///
    /// An unreadable image is skipped and reported as a warning.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_logo(
        &mut self,
        path: &str,
        x: f32,
        y: f32,
        max_width: f32,
        max_height: f32,
        align: TextAnchor,
    ) -> f32 {
        if path.trim().is_empty() {
            return y;
        }
        let image = match load_image(Path::new(path)) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Skipping logo '{}': {}", path, e);
                self.warnings.push(Warning::ImageSkipped {
                    path: path.to_string(),
                    reason: e.to_string(),
                });
                return y;
            }
        };
        let size = fit_within(image.native_size(), max_width, max_height);
        let left = match align {
            TextAnchor::Center => (self.width - size.width) / 2.0,
            TextAnchor::Right => self.width - self.margins.right - size.width,
            TextAnchor::Left => x,
        };
        self.surface.draw_image(
            &image,
            Rect::new(left, y - size.height, size.width, size.height),
        );
        y - size.height - 16.0
    }

    /// Serializes the document, handing back the collected warnings.
    pub fn finish(self) -> Result<(Vec<u8>, Vec<Warning>), RenderError> {
        let bytes = self.surface.finish()?;
        Ok((bytes, self.warnings))
    }
}

fn load_image(path: &Path) -> Result<RasterImage, RenderError> {
    if !path.is_file() {
        return Err(RenderError::Image("file not found".to_string()));
    }
    RasterImage::open(path)
}
