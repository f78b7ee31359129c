use super::draw_top_rule;
use crate::context::{PageNumberStyle, RenderContext, TextStyle};
use leafpress_layout::wrap_lines;
use leafpress_render_core::TextAnchor;
use leafpress_types::{INCH, Layout, ProductConfig, WritingData};

const DEFAULT_HEADING: &str = "Your Notes";
const QUOTE_WIDTH: f32 = 260.0;

pub(super) fn render(ctx: &mut RenderContext, data: &WritingData, config: &ProductConfig) {
    match ctx.layout() {
        Layout::Editorial => editorial(ctx, data),
        Layout::Clean => clean(ctx, data),
        Layout::Warm => warm(ctx, data, &config.author),
    }
    ctx.new_page();
}

/// Draws a margin quote upwards from `y`, so its last line sits at `y`.
fn draw_quote(ctx: &mut RenderContext, quote: &str, style: &TextStyle, mut y: f32, step: f32) {
    let x = ctx.margins.left;
    for line in wrap_lines(quote, &style.face, style.size, QUOTE_WIDTH).iter().rev() {
        ctx.draw_string(style, x, y, line, TextAnchor::Left);
        y += step;
    }
}

fn editorial(ctx: &mut RenderContext, data: &WritingData) {
    ctx.start_page(Some("background"));
    let top = ctx.height - ctx.margins.top;

    if !data.prompt_number.is_empty() {
        let number = ctx.text_style("mono", 9.0, "accent");
        ctx.draw_string(&number, ctx.margins.left, top - 10.0, &data.prompt_number, TextAnchor::Left);
    }

    let bottom = ctx.margins.bottom + 40.0;
    ctx.draw_writing_lines(top - 30.0, bottom, data.line_spacing, "line", 0.3);

    if !data.quote.is_empty() {
        let quote = ctx.text_style("body_italic", 8.5, "earth");
        let (bottom, step) = (ctx.margins.bottom + 5.0, quote.size * 1.5);
        draw_quote(ctx, &data.quote, &quote, bottom, step);
    }
    ctx.draw_page_number(PageNumberStyle::Right);
}

fn clean(ctx: &mut RenderContext, data: &WritingData) {
    ctx.start_page(Some("background"));
    ctx.draw_header_bar("primary");
    let left = ctx.margins.left;
    let mut y = ctx.height - 1.0 * INCH;

    let heading = data.heading.as_deref().unwrap_or(DEFAULT_HEADING);
    if !heading.is_empty() {
        let style = ctx.text_style("heading", 14.0, "ink");
        ctx.draw_string(&style, left, y, heading, TextAnchor::Left);
        y -= 0.5 * INCH;
    }
    if !data.prompt_number.is_empty() {
        let style = ctx.text_style("body", 10.0, "muted");
        ctx.draw_string(&style, left, y, &format!("Prompt {}", data.prompt_number), TextAnchor::Left);
        y -= 0.3 * INCH;
    }

    let bottom = ctx.margins.bottom + 40.0;
    ctx.draw_writing_lines(y, bottom, data.line_spacing, "line", 0.3);
    ctx.draw_page_number(PageNumberStyle::Center);
}

fn warm(ctx: &mut RenderContext, data: &WritingData, author: &str) {
    ctx.start_page(Some("primary"));
    draw_top_rule(ctx);
    let left = ctx.margins.left;
    let mut y = ctx.height - 80.0;

    if !data.prompt_number.is_empty() {
        let style = ctx.text_style("body", 11.0, "accent");
        ctx.draw_string(&style, left, y, &format!("Day {}", data.prompt_number), TextAnchor::Left);
        y -= 30.0;
    }

    let bottom = ctx.margins.bottom + 50.0;
    ctx.draw_writing_lines(y, bottom, data.line_spacing, "muted", 0.3);

    if !data.quote.is_empty() {
        let quote = ctx.text_style("body_italic", 8.5, "secondary");
        let bottom = ctx.margins.bottom + 10.0;
        draw_quote(ctx, &data.quote, &quote, bottom, 13.0);
    }

    if !author.is_empty() {
        let footer = ctx.text_style("body", 7.0, "muted");
        ctx.draw_string(&footer, ctx.width / 2.0, 36.0, author, TextAnchor::Center);
    }
    ctx.draw_page_number(PageNumberStyle::Center);
}
