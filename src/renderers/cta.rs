use crate::context::{PageNumberStyle, RenderContext, WRAPPED_LINE_HEIGHT};
use leafpress_render_core::TextAnchor;
use leafpress_types::{CtaData, INCH, Layout, Rect};

/// Height of the clickable band around an inline link.
const LINK_HEIGHT: f32 = 14.0;

pub(super) fn render(ctx: &mut RenderContext, data: &CtaData) {
    match ctx.layout() {
        Layout::Editorial => editorial(ctx, data),
        Layout::Clean => clean(ctx, data),
        Layout::Warm => warm(ctx, data),
    }
    ctx.new_page();
}

fn editorial(ctx: &mut RenderContext, data: &CtaData) {
    ctx.start_page(Some("background"));
    let right_x = ctx.width - ctx.margins.right;
    let mut y = (ctx.height / 2.0).floor() + 20.0;

    let headline = ctx.text_style("heading", 17.0, "ink");
    for line in &data.headline {
        ctx.draw_string(&headline, right_x, y, line, TextAnchor::Right);
        y -= 28.0;
    }

    if data.bridge.is_empty() {
        y -= 30.0;
    } else {
        y -= 12.0;
        let bridge = ctx.text_style("body_italic", 11.0, "earth");
        ctx.draw_string(&bridge, right_x, y, &data.bridge, TextAnchor::Right);
        y -= 50.0;
    }

    let link_style = ctx.text_style("mono", 9.0, "muted");
    for link in &data.links {
        ctx.draw_string(&link_style, right_x, y, &link.display, TextAnchor::Right);
        if !link.url.is_empty() {
            let width = ctx.string_width(&link.display, &link_style);
            ctx.draw_link(Rect::new(right_x - width, y - 3.0, width, LINK_HEIGHT), &link.url);
        }
        y -= 22.0;
    }
    ctx.draw_page_number(PageNumberStyle::Right);
}

/// Headline and body copy followed by one full-width button per link.
fn clean(ctx: &mut RenderContext, data: &CtaData) {
    ctx.start_page(Some("background"));
    ctx.draw_header_bar("primary");
    let (left, width) = (ctx.margins.left, ctx.text_area_width);
    let mut y = ctx.height - 1.2 * INCH;

    let headline = ctx.text_style("heading", 24.0, "ink");
    for line in &data.headline {
        ctx.draw_string(&headline, left, y, line, TextAnchor::Left);
        y -= 36.0;
    }
    y -= 10.0;

    let body = ctx.text_style("body", 11.0, "ink");
    for paragraph in &data.body {
        if paragraph.is_empty() {
            y -= 8.0;
        } else {
            y = ctx.draw_text_wrapped(paragraph, &body, left, y, width, WRAPPED_LINE_HEIGHT);
            y -= 4.0;
        }
    }
    y -= 20.0;

    let label_style = ctx.text_style("heading", 11.0, "accent");
    let button_style = ctx.text_style("heading", 12.0, "background");
    let button_fill = ctx.color("primary");
    for link in &data.links {
        if !link.label.is_empty() {
            ctx.draw_string(&label_style, left, y, &link.label, TextAnchor::Left);
            y -= 16.0;
        }
        let button = Rect::new(left, y - 0.6 * INCH, width, 0.65 * INCH);
        ctx.draw_rounded_rect(button, 5.0, Some(button_fill), None);
        ctx.draw_string(&button_style, ctx.width / 2.0, y - 0.35 * INCH, &link.display, TextAnchor::Center);
        if !link.url.is_empty() {
            ctx.draw_link(button, &link.url);
        }
        y -= 0.9 * INCH;
    }

    if !data.sign_off.is_empty() {
        y -= 10.0;
        let sign_off = ctx.text_style("heading", 10.0, "ink");
        ctx.draw_string(&sign_off, left, y, &data.sign_off, TextAnchor::Left);
    }
    ctx.draw_page_number(PageNumberStyle::Center);
}

fn warm(ctx: &mut RenderContext, data: &CtaData) {
    ctx.start_page(Some("primary"));
    let center = ctx.width / 2.0;
    let mut y = ctx.height / 2.0 + 60.0;

    let headline = ctx.text_style("heading", 22.0, "background");
    for line in &data.headline {
        ctx.draw_string(&headline, center, y, line, TextAnchor::Center);
        y -= 32.0;
    }

    if !data.bridge.is_empty() {
        y -= 10.0;
        let bridge = ctx.text_style("body_italic", 13.0, "secondary");
        ctx.draw_string(&bridge, center, y, &data.bridge, TextAnchor::Center);
        y -= 40.0;
    }

    let link_style = ctx.text_style("body", 10.0, "accent");
    for link in &data.links {
        ctx.draw_string(&link_style, center, y, &link.display, TextAnchor::Center);
        if !link.url.is_empty() {
            let width = ctx.string_width(&link.display, &link_style);
            ctx.draw_link(Rect::new(center - width / 2.0, y - 3.0, width, LINK_HEIGHT), &link.url);
        }
        y -= 22.0;
    }
    ctx.draw_page_number(PageNumberStyle::Center);
}
