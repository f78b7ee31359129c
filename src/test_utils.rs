//! A drawing surface that records calls instead of producing PDF bytes.

use leafpress_layout::FontFace;
use leafpress_render_core::{DrawSurface, Paint, RasterImage, RenderError, TextAnchor};
use leafpress_types::{Color, Rect, Size};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct TextCall {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: String,
    pub size: f32,
    pub color: Color,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Text(TextCall),
    Rect { rect: Rect, paint: Paint, color: Color },
    RoundRect { rect: Rect, radius: f32, paint: Paint },
    Circle { cx: f32, cy: f32, radius: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Image { rect: Rect },
    Link { rect: Rect, url: String },
    ShowPage,
}

#[derive(Default)]
struct State {
    size: Size,
    page: usize,
    fill: Color,
    calls: Vec<Call>,
    drawn: Vec<usize>,
    metadata: Option<(String, String)>,
}

/// Clones share the same recording, so a test can keep one handle while
/// the render context owns the other.
#[derive(Clone)]
pub struct RecordingSurface {
    state: Arc<Mutex<State>>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                size,
                ..State::default()
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    fn record(&self, call: Call) {
        self.with(|state| {
            let page = state.page;
            if state.drawn.last() != Some(&page) {
                state.drawn.push(page);
            }
            state.calls.push(call);
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.with(|state| state.calls.clone())
    }

    pub fn texts(&self) -> Vec<TextCall> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn texts_on_page(&self, page: usize) -> Vec<String> {
        self.texts()
            .into_iter()
            .filter(|t| t.page == page)
            .map(|t| t.text)
            .collect()
    }

    /// Number of pages that received at least one drawing call.
    pub fn drawn_pages(&self) -> usize {
        self.with(|state| state.drawn.len())
    }

    pub fn metadata(&self) -> Option<(String, String)> {
        self.with(|state| state.metadata.clone())
    }
}

impl DrawSurface for RecordingSurface {
    fn page_size(&self) -> Size {
        self.with(|state| state.size)
    }

    fn set_metadata(&mut self, title: &str, author: &str) {
        self.with(|state| state.metadata = Some((title.to_string(), author.to_string())));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.with(|state| state.fill = color);
    }

    fn set_stroke_color(&mut self, _color: Color) {}

    fn set_line_width(&mut self, _width: f32) {}

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &FontFace, size: f32, anchor: TextAnchor) {
        let (page, color) = self.with(|state| (state.page, state.fill));
        self.record(Call::Text(TextCall {
            page,
            x,
            y,
            text: text.to_string(),
            font: font.key().to_string(),
            size,
            color,
            anchor,
        }));
    }

    fn rect(&mut self, rect: Rect, paint: Paint) {
        let color = self.with(|state| state.fill);
        self.record(Call::Rect { rect, paint, color });
    }

    fn round_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.record(Call::RoundRect { rect, radius, paint });
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, _paint: Paint) {
        self.record(Call::Circle { cx, cy, radius });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.record(Call::Line { x1, y1, x2, y2 });
    }

    fn draw_image(&mut self, _image: &RasterImage, rect: Rect) {
        self.record(Call::Image { rect });
    }

    fn link_url(&mut self, rect: Rect, url: &str) {
        self.record(Call::Link {
            rect,
            url: url.to_string(),
        });
    }

    fn show_page(&mut self) {
        self.with(|state| {
            state.calls.push(Call::ShowPage);
            state.page += 1;
        });
    }

    fn page_index(&self) -> usize {
        self.with(|state| state.page)
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }
}
