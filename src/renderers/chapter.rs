//! Chapters: a heading block on the first page, then body paragraphs
//! flowed over as many pages as they need.

use crate::context::{PageNumberStyle, RenderContext, TitleStyle};
use crate::pagination::{ChapterFlow, FlowStyle, FlowSummary, PageChrome};
use leafpress_render_core::TextAnchor;
use leafpress_types::{ChapterData, INCH, Layout, ProductConfig};

const BODY_SIZE: f32 = 11.0;
const TITLE_MAX_SIZE: f32 = 20.0;
const TITLE_MIN_SIZE: f32 = 14.0;

/// The per-layout numbers a chapter is set with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChapterVariant {
    pub layout: Layout,
    /// Baseline of the heading block on the first page.
    pub first_top: f32,
    /// Baseline of the first paragraph on continuation pages.
    pub continuation_top: f32,
    /// Paragraphs may not extend below this line.
    pub bottom_limit: f32,
    pub line_height: f32,
    pub paragraph_gap: f32,
    pub blank_gap: f32,
    pub max_width: f32,
    pub body_color: &'static str,
    pub page_number: PageNumberStyle,
}

pub fn chapter_variant(layout: Layout, ctx: &RenderContext) -> ChapterVariant {
    let (height, margins, area) = (ctx.height, ctx.margins, ctx.text_area_width);
    match layout {
        Layout::Editorial => ChapterVariant {
            layout,
            first_top: height - margins.top - 40.0,
            continuation_top: height - margins.top - 40.0,
            bottom_limit: margins.bottom + 30.0,
            line_height: 1.65,
            paragraph_gap: 4.0,
            blank_gap: 14.0,
            max_width: area - 60.0,
            body_color: "earth",
            page_number: PageNumberStyle::Right,
        },
        Layout::Clean => ChapterVariant {
            layout,
            first_top: height - 0.8 * INCH,
            continuation_top: height - 0.8 * INCH,
            bottom_limit: margins.bottom + 30.0,
            line_height: 1.85,
            paragraph_gap: 6.0,
            blank_gap: 12.0,
            max_width: area,
            body_color: "ink",
            page_number: PageNumberStyle::Center,
        },
        Layout::Warm => ChapterVariant {
            layout,
            first_top: height - 90.0,
            continuation_top: height - 80.0,
            bottom_limit: margins.bottom + 40.0,
            line_height: 1.85,
            paragraph_gap: 6.0,
            blank_gap: 12.0,
            max_width: area,
            body_color: "background",
            page_number: PageNumberStyle::Center,
        },
    }
}

struct ChapterChrome<'a> {
    variant: ChapterVariant,
    author: &'a str,
}

impl PageChrome for ChapterChrome<'_> {
    fn draw(&self, ctx: &mut RenderContext) {
        match self.variant.layout {
            Layout::Editorial => ctx.start_page(Some("background")),
            Layout::Clean => {
                ctx.start_page(Some("background"));
                ctx.draw_header_bar("primary");
                ctx.draw_sidebar("accent", 3.0, 28.0);
            }
            Layout::Warm => {
                ctx.start_page(Some("primary"));
                super::draw_top_rule(ctx);
                ctx.draw_sidebar("accent", 2.0, 30.0);
            }
        }
    }

    fn continuation_top(&self, _ctx: &RenderContext) -> f32 {
        self.variant.continuation_top
    }

    fn finish_page(&self, ctx: &mut RenderContext) {
        ctx.draw_page_number(self.variant.page_number);
        ctx.new_page();
    }

    fn finish_last_page(&self, ctx: &mut RenderContext) {
        if self.variant.layout == Layout::Warm && !self.author.is_empty() {
            let footer = ctx.named_style("Helvetica", 7.0, "muted");
            ctx.draw_string(&footer, ctx.width / 2.0, 36.0, self.author, TextAnchor::Center);
        }
        self.finish_page(ctx);
    }
}

/// Draws the chapter number and fitted title. Returns where the body starts.
fn draw_heading(ctx: &mut RenderContext, data: &ChapterData, variant: &ChapterVariant) -> f32 {
    let left = ctx.margins.left;
    let mut y = variant.first_top;

    match variant.layout {
        Layout::Editorial => {
            if !data.chapter_number.is_empty() {
                let number = ctx.text_style("mono", 9.0, "accent");
                ctx.draw_string(&number, left, y, &data.chapter_number, TextAnchor::Left);
                y -= 30.0;
            }
            if !data.chapter_title.is_empty() {
                let face = ctx.font("heading");
                let title = TitleStyle::new(face, TITLE_MAX_SIZE, TITLE_MIN_SIZE, ctx.color("ink")).line_height(1.4);
                y = ctx.draw_title_fitted(&data.chapter_title, &title, left, y, variant.max_width);
                ctx.draw_accent_line(left, y - 4.0, left + 60.0, "accent", 1.5);
                y -= 20.0;
            }
        }
        Layout::Clean => {
            if !data.chapter_number.is_empty() {
                let (accent, background) = (ctx.color("accent"), ctx.color("background"));
                ctx.draw_numbered_circle(
                    left + 0.2 * INCH,
                    y - 0.05 * INCH,
                    &data.chapter_number,
                    accent,
                    background,
                    15.0,
                    12.0,
                );
                y -= 0.5 * INCH;
            }
            if !data.chapter_title.is_empty() {
                let face = ctx.face("Helvetica-Bold");
                let title = TitleStyle::new(face, TITLE_MAX_SIZE, TITLE_MIN_SIZE, ctx.color("ink"));
                y = ctx.draw_title_fitted(&data.chapter_title, &title, left, y, variant.max_width);
                ctx.draw_accent_line(left, y - 4.0, left + 80.0, "accent", 2.0);
                y -= 20.0;
            }
        }
        Layout::Warm => {
            if !data.chapter_number.is_empty() {
                let label = ctx.named_style("Helvetica", 11.0, "accent");
                let text = format!("CHAPTER {}", data.chapter_number);
                ctx.draw_string(&label, left, y, &text, TextAnchor::Left);
                y -= 30.0;
            }
            if !data.chapter_title.is_empty() {
                let face = ctx.face("Helvetica-Bold");
                let title = TitleStyle::new(face, TITLE_MAX_SIZE, TITLE_MIN_SIZE, ctx.color("background"));
                y = ctx.draw_title_fitted(&data.chapter_title, &title, left, y, variant.max_width);
                ctx.draw_accent_line(left, y - 4.0, left + 50.0, "accent", 2.0);
                y -= 24.0;
            }
        }
    }
    y
}

pub(super) fn render(ctx: &mut RenderContext, data: &ChapterData, config: &ProductConfig) -> FlowSummary {
    let variant = chapter_variant(ctx.layout(), ctx);
    let chrome = ChapterChrome {
        variant,
        author: &config.author,
    };

    chrome.draw(ctx);
    let y = draw_heading(ctx, data, &variant);

    let style = FlowStyle {
        text: ctx.text_style("body", BODY_SIZE, variant.body_color),
        x: ctx.margins.left,
        max_width: variant.max_width,
        line_height: variant.line_height,
        paragraph_gap: variant.paragraph_gap,
        blank_gap: variant.blank_gap,
    };
    let mut flow = ChapterFlow::new(style, &chrome, y, variant.bottom_limit);
    for paragraph in &data.paragraphs {
        flow.place_paragraph(ctx, paragraph);
    }
    let summary = flow.finish(ctx);
    log::debug!(
        "Chapter '{}' set on {} page(s)",
        data.chapter_title,
        summary.pages_started
    );
    summary
}
