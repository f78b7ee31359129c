use crate::context::{PageNumberStyle, RenderContext, WRAPPED_LINE_HEIGHT};
use leafpress_render_core::TextAnchor;
use leafpress_types::SectionData;

/// Divider page: centered title, optional subtitle, a short rule and an
/// optional epigraph. Drawn the same way in every layout.
pub(super) fn render(ctx: &mut RenderContext, data: &SectionData) {
    ctx.start_page(Some("primary"));
    let center = ctx.width / 2.0;
    let mut y = ctx.height / 2.0 + 30.0;

    let title = ctx.named_style("Helvetica-Bold", 28.0, "background");
    ctx.draw_string(&title, center, y, &data.title, TextAnchor::Center);
    y -= 40.0;

    if !data.subtitle.is_empty() {
        let subtitle = ctx.named_style("Helvetica", 13.0, "secondary");
        ctx.draw_string(&subtitle, center, y, &data.subtitle, TextAnchor::Center);
        y -= 30.0;
    }

    ctx.draw_accent_line(center - 60.0, y, center + 60.0, "accent", 0.5);
    y -= 30.0;

    if !data.epigraph.is_empty() {
        let epigraph = ctx.named_style("Helvetica-Oblique", 11.0, "muted");
        let (x, width) = (ctx.margins.left + 40.0, ctx.text_area_width - 80.0);
        ctx.draw_text_wrapped(&data.epigraph, &epigraph, x, y, width, WRAPPED_LINE_HEIGHT);
    }

    ctx.draw_page_number(PageNumberStyle::Center);
    ctx.new_page();
}
