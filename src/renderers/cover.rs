use crate::context::RenderContext;
use leafpress_render_core::TextAnchor;
use leafpress_types::{CoverData, INCH, Layout, ProductConfig, Rect};

pub(super) fn render(ctx: &mut RenderContext, data: &CoverData, config: &ProductConfig) {
    let title = match &data.title {
        Some(lines) => lines.clone(),
        None => vec![config.title.clone()],
    };
    let author = data.author.as_deref().unwrap_or(&config.author);

    match ctx.layout() {
        Layout::Editorial => editorial(ctx, data, &title),
        Layout::Clean => clean(ctx, data, &title, author),
        Layout::Warm => warm(ctx, data, &title),
    }
    ctx.new_page();
}

/// Light page, title and subtitles set flush right in the lower third.
fn editorial(ctx: &mut RenderContext, data: &CoverData, title: &[String]) {
    ctx.start_page(Some("background"));
    let right_x = ctx.width - ctx.margins.right;

    let logo_top = ctx.height - ctx.margins.top - 20.0;
    ctx.draw_logo(&data.logo_path, 0.0, logo_top, 120.0, 60.0, TextAnchor::Right);

    let heading = ctx.text_style("heading", 26.0, "ink");
    ctx.draw_string(&heading, right_x, 240.0, &title.join(" "), TextAnchor::Right);
    ctx.draw_accent_line(right_x - 180.0, 218.0, right_x, "accent", 0.5);

    let subtitle = ctx.text_style("mono", 8.0, "muted");
    let mut y = 195.0;
    for line in &data.subtitle {
        ctx.draw_string(&subtitle, right_x, y, line, TextAnchor::Right);
        y -= 12.0;
    }

    if !data.brand.is_empty() {
        let brand = ctx.text_style("mono", 7.0, "muted");
        ctx.draw_string(&brand, right_x, 130.0, &data.brand, TextAnchor::Right);
    }
}

/// Solid primary page with an accent band, optional badge and a byline.
fn clean(ctx: &mut RenderContext, data: &CoverData, title: &[String], author: &str) {
    ctx.start_page(Some("primary"));
    let (left, height) = (ctx.margins.left, ctx.height);

    ctx.draw_logo(&data.logo_path, 0.0, height - 0.8 * INCH, 180.0, 80.0, TextAnchor::Center);

    let accent = ctx.color("accent");
    ctx.fill_rect(Rect::new(0.0, height - 2.5 * INCH, ctx.width, 0.15 * INCH), accent);

    if !data.badge.is_empty() {
        let badge_box = Rect::new(left, height - 3.1 * INCH, 1.5 * INCH, 0.35 * INCH);
        ctx.draw_rounded_rect(badge_box, 3.0, Some(accent), None);
        let badge = ctx.named_style("Helvetica-Bold", 11.0, "background");
        ctx.draw_string(&badge, left + 0.25 * INCH, height - 3.0 * INCH, &data.badge, TextAnchor::Left);
    }

    let heading = ctx.named_style("Helvetica-Bold", 34.0, "background");
    let mut y = height - 3.9 * INCH;
    for line in title {
        ctx.draw_string(&heading, left, y, line, TextAnchor::Left);
        y -= 0.6 * INCH;
    }

    if !data.subtitle.is_empty() {
        let subtitle = ctx.named_style("Helvetica", 14.0, "muted");
        y -= 0.1 * INCH;
        for line in &data.subtitle {
            ctx.draw_string(&subtitle, left, y, line, TextAnchor::Left);
            y -= 20.0;
        }
    }

    if !author.is_empty() {
        let byline = ctx.named_style("Helvetica", 11.0, "muted");
        ctx.draw_string(&byline, left, 1.5 * INCH, &format!("By {author}"), TextAnchor::Left);
        ctx.draw_accent_line(left, 1.2 * INCH, left + 2.0 * INCH, "accent", 2.0);
    }
}

/// Dark page with everything centered around the middle.
fn warm(ctx: &mut RenderContext, data: &CoverData, title: &[String]) {
    ctx.start_page(Some("primary"));
    let middle = ctx.height / 2.0;

    ctx.draw_logo(&data.logo_path, 0.0, middle + 140.0, 180.0, 95.0, TextAnchor::Center);

    let heading = ctx.named_style("Helvetica-Bold", 30.0, "background");
    let center = ctx.width / 2.0;
    let mut y = middle + 40.0;
    for line in title {
        ctx.draw_string(&heading, center, y, line, TextAnchor::Center);
        y -= 40.0;
    }

    y -= 10.0;
    let subtitle = ctx.named_style("Helvetica", 13.0, "secondary");
    for line in &data.subtitle {
        ctx.draw_string(&subtitle, center, y, line, TextAnchor::Center);
        y -= 20.0;
    }

    if !data.brand.is_empty() {
        let brand = ctx.named_style("Helvetica", 10.0, "muted");
        ctx.draw_string(&brand, center, 60.0, &data.brand, TextAnchor::Center);
    }
}
