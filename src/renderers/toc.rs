use crate::context::{PageNumberStyle, RenderContext};
use leafpress_render_core::TextAnchor;
use leafpress_types::{INCH, Layout, Rect, TocData};

/// Numbered entry list with an optional footer banner. The layouts share
/// one design; the clean layout adds its header bar.
pub(super) fn render(ctx: &mut RenderContext, data: &TocData) {
    ctx.start_page(Some("background"));
    if ctx.layout() == Layout::Clean {
        ctx.draw_header_bar("primary");
    }
    let (left, width) = (ctx.margins.left, ctx.text_area_width);
    let mut y = ctx.height - 1.2 * INCH;

    let heading = ctx.named_style("Helvetica-Bold", 22.0, "ink");
    ctx.draw_string(&heading, left, y, &data.heading, TextAnchor::Left);
    y -= 0.7 * INCH;

    let (accent, background) = (ctx.color("accent"), ctx.color("background"));
    let title_style = ctx.named_style("Helvetica-Bold", 12.0, "ink");
    let description_style = ctx.named_style("Helvetica", 10.0, "muted");
    let text_x = left + 0.55 * INCH;
    for entry in &data.entries {
        ctx.draw_numbered_circle(left + 0.15 * INCH, y - 0.05 * INCH, &entry.number, accent, background, 13.0, 11.0);
        ctx.draw_string(&title_style, text_x, y, &entry.title, TextAnchor::Left);
        if !entry.description.is_empty() {
            ctx.draw_string(&description_style, text_x, y - 0.22 * INCH, &entry.description, TextAnchor::Left);
        }
        y -= 0.65 * INCH;
    }

    if !data.footer_text.is_empty() {
        y -= 0.2 * INCH;
        let fill = ctx.color("primary");
        ctx.draw_rounded_rect(Rect::new(left, y - 0.6 * INCH, width, 0.7 * INCH), 5.0, Some(fill), None);
        let footer = ctx.named_style("Helvetica-Bold", 12.0, "background");
        ctx.draw_string(&footer, left + 0.25 * INCH, y - 0.35 * INCH, &data.footer_text, TextAnchor::Left);
    }

    ctx.draw_page_number(PageNumberStyle::Center);
    ctx.new_page();
}
