use super::draw_top_rule;
use crate::context::{PageNumberStyle, RenderContext, WRAPPED_LINE_HEIGHT};
use leafpress_render_core::TextAnchor;
use leafpress_types::{INCH, Layout, LetterData};

pub(super) fn render(ctx: &mut RenderContext, data: &LetterData) {
    match ctx.layout() {
        Layout::Editorial => editorial(ctx, data),
        Layout::Clean => clean(ctx, data),
        Layout::Warm => warm(ctx, data),
    }
    ctx.new_page();
}

/// The first paragraph is set as the opening line in the heading font.
fn editorial(ctx: &mut RenderContext, data: &LetterData) {
    ctx.start_page(Some("background"));
    let left = ctx.margins.left;
    let max_width = ctx.text_area_width - 60.0;
    let opening = ctx.text_style("heading", 16.0, "ink");
    let body = ctx.text_style("body", 11.0, "earth");

    let mut y = ctx.height - ctx.margins.top - 80.0;
    let mut opened = false;
    for paragraph in &data.paragraphs {
        if paragraph.is_empty() {
            y -= 14.0;
        } else if !opened {
            y = ctx.draw_text_wrapped(paragraph, &opening, left, y, max_width, WRAPPED_LINE_HEIGHT);
            y -= 8.0;
            opened = true;
        } else {
            y = ctx.draw_text_wrapped(paragraph, &body, left, y, max_width, WRAPPED_LINE_HEIGHT);
            y -= 4.0;
        }
    }

    if !data.sign_off.is_empty() {
        y -= 10.0;
        let sign_off = ctx.text_style("body_italic", 11.0, "earth");
        ctx.draw_string(&sign_off, left, y, &data.sign_off, TextAnchor::Left);
    }
    ctx.draw_page_number(PageNumberStyle::Right);
}

fn clean(ctx: &mut RenderContext, data: &LetterData) {
    ctx.start_page(Some("background"));
    ctx.draw_header_bar("primary");
    let (left, width) = (ctx.margins.left, ctx.text_area_width);

    let mut y = ctx.height - 1.2 * INCH;
    if !data.heading.is_empty() {
        let heading = ctx.named_style("Helvetica-Bold", 22.0, "ink");
        ctx.draw_string(&heading, left, y, &data.heading, TextAnchor::Left);
        y -= 0.6 * INCH;
    }

    let body = ctx.named_style("Helvetica", 11.0, "ink");
    for paragraph in &data.paragraphs {
        if paragraph.is_empty() {
            y -= 8.0;
        } else {
            y = ctx.draw_text_wrapped(paragraph, &body, left, y, width, WRAPPED_LINE_HEIGHT);
            y -= 4.0;
        }
    }

    if !data.sign_off.is_empty() {
        y -= 16.0;
        let sign_off = ctx.named_style("Helvetica-Bold", 10.0, "ink");
        ctx.draw_string(&sign_off, left, y, &data.sign_off, TextAnchor::Left);
    }
    ctx.draw_page_number(PageNumberStyle::Center);
}

fn warm(ctx: &mut RenderContext, data: &LetterData) {
    ctx.start_page(Some("primary"));
    draw_top_rule(ctx);
    let (left, width) = (ctx.margins.left, ctx.text_area_width);

    let mut y = ctx.height - 100.0;
    if !data.heading.is_empty() {
        let heading = ctx.named_style("Helvetica-Bold", 22.0, "background");
        ctx.draw_centered_text(&data.heading, &heading, y);
        y -= 40.0;
    }

    let body = ctx.named_style("Helvetica", 11.0, "background");
    for paragraph in &data.paragraphs {
        if paragraph.is_empty() {
            y -= 10.0;
        } else {
            y = ctx.draw_text_wrapped(paragraph, &body, left, y, width, WRAPPED_LINE_HEIGHT);
            y -= 6.0;
        }
    }

    if !data.sign_off.is_empty() {
        y -= 20.0;
        let sign_off = ctx.named_style("Helvetica-Oblique", 11.0, "secondary");
        ctx.draw_string(&sign_off, left, y, &data.sign_off, TextAnchor::Left);
    }
    ctx.draw_page_number(PageNumberStyle::Center);
}
