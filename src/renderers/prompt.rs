use super::draw_top_rule;
use crate::context::{PageNumberStyle, RenderContext, RIGHT_ALIGNED_LINE_HEIGHT, WRAPPED_LINE_HEIGHT};
use leafpress_layout::wrap_columns;
use leafpress_render_core::TextAnchor;
use leafpress_types::{INCH, Layout, PromptData, Rect};

/// Characters per line inside the monospaced prompt box.
const PROMPT_BOX_COLUMNS: usize = 78;
const PRO_TIP_COLUMNS: usize = 82;
const PROMPT_BOX_LEADING: f32 = 10.0;

pub(super) fn render(ctx: &mut RenderContext, data: &PromptData) {
    match ctx.layout() {
        Layout::Editorial => editorial(ctx, data),
        Layout::Clean => clean(ctx, data),
        Layout::Warm => warm(ctx, data),
    }
    ctx.new_page();
}

fn editorial(ctx: &mut RenderContext, data: &PromptData) {
    ctx.start_page(Some("background"));
    let top = ctx.height - ctx.margins.top;
    let max_width = ctx.text_area_width - 40.0;

    if !data.number.is_empty() {
        let number = ctx.text_style("mono", 9.0, "accent");
        ctx.draw_string(&number, ctx.margins.left, top - 10.0, &data.number, TextAnchor::Left);
    }

    let prompt = ctx.text_style("heading", 17.0, "ink");
    let y = ctx.draw_right_aligned_text(&data.prompt, &prompt, top - 140.0, max_width, RIGHT_ALIGNED_LINE_HEIGHT);

    if !data.example.is_empty() {
        let example = ctx.text_style("body_italic", 12.0, "earth");
        ctx.draw_right_aligned_text(&data.example, &example, y - 35.0, max_width, RIGHT_ALIGNED_LINE_HEIGHT);
    }
    ctx.draw_page_number(PageNumberStyle::Right);
}

/// Lines of the monospaced prompt box. Source lines are kept as written
/// unless they are too long for the box.
fn prompt_box_lines(prompt: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in prompt.trim().split('\n') {
        if raw.chars().count() > PROMPT_BOX_COLUMNS {
            let wrapped = wrap_columns(raw, PROMPT_BOX_COLUMNS);
            if wrapped.is_empty() {
                lines.push(String::new());
            } else {
                lines.extend(wrapped);
            }
        } else {
            lines.push(raw.to_string());
        }
    }
    lines
}

/// Title strip with a number badge, the prompt in a boxed monospaced block,
/// the example, then a pro tip.
fn clean(ctx: &mut RenderContext, data: &PromptData) {
    ctx.start_page(Some("background"));
    ctx.draw_header_bar("primary");
    let (left, width) = (ctx.margins.left, ctx.text_area_width);
    let mut y = ctx.height - 0.7 * INCH;

    let strip = ctx.color("line");
    ctx.draw_rounded_rect(Rect::new(left, y - 0.55 * INCH, width, 0.6 * INCH), 4.0, Some(strip), None);
    let (accent, background) = (ctx.color("accent"), ctx.color("background"));
    ctx.draw_numbered_circle(left + 0.25 * INCH, y - 0.25 * INCH, &data.number, accent, background, 13.0, 11.0);

    if !data.title.is_empty() {
        let title = ctx.text_style("heading", 14.0, "ink");
        ctx.draw_string(&title, left + 0.6 * INCH, y - 0.2 * INCH, &data.title, TextAnchor::Left);
    }
    if !data.time_saved.is_empty() {
        let saved = ctx.text_style("heading", 9.0, "accent");
        let label = format!("Time Saved: {}", data.time_saved);
        ctx.draw_string(&saved, left + 0.6 * INCH, y - 0.42 * INCH, &label, TextAnchor::Left);
    }
    y -= 0.85 * INCH;

    if !data.prompt.is_empty() {
        let lines = prompt_box_lines(&data.prompt);
        let box_height = lines.len() as f32 * PROMPT_BOX_LEADING + 16.0;
        let (fill, stroke) = (ctx.color("line"), ctx.color("muted"));
        ctx.draw_rounded_rect(Rect::new(left, y - box_height, width, box_height), 4.0, Some(fill), Some(stroke));

        let mono = ctx.named_style("Courier", 8.0, "ink");
        let mut line_y = y - 10.0;
        for line in &lines {
            ctx.draw_string(&mono, left + 8.0, line_y, line, TextAnchor::Left);
            line_y -= PROMPT_BOX_LEADING;
        }
        y -= box_height + 0.2 * INCH;
    }

    if !data.example.is_empty() {
        let example = ctx.text_style("body", 10.0, "ink");
        y = ctx.draw_text_wrapped(&data.example, &example, left, y, width, WRAPPED_LINE_HEIGHT);
        y -= 0.15 * INCH;
    }

    if !data.pro_tip.is_empty() {
        let label = ctx.text_style("heading", 9.0, "accent");
        ctx.draw_string(&label, left, y, "Pro Tip: ", TextAnchor::Left);

        let tip = ctx.text_style("body", 9.0, "ink");
        let mut lines = wrap_columns(&data.pro_tip, PRO_TIP_COLUMNS).into_iter();
        if let Some(first) = lines.next() {
            ctx.draw_string(&tip, left + 45.0, y, &first, TextAnchor::Left);
            y -= 12.0;
            for line in lines {
                ctx.draw_string(&tip, left, y, &line, TextAnchor::Left);
                y -= 12.0;
            }
        }
    }
    ctx.draw_page_number(PageNumberStyle::Center);
}

fn warm(ctx: &mut RenderContext, data: &PromptData) {
    ctx.start_page(Some("primary"));
    draw_top_rule(ctx);
    let (left, width) = (ctx.margins.left, ctx.text_area_width);
    let mut y = ctx.height - 100.0;

    if !data.number.is_empty() {
        let label = ctx.text_style("body", 11.0, "accent");
        ctx.draw_string(&label, left, y, &format!("DAY {}", data.number), TextAnchor::Left);
        y -= 30.0;
    }
    if !data.prompt.is_empty() {
        let prompt = ctx.text_style("heading", 20.0, "background");
        y = ctx.draw_text_wrapped(&data.prompt, &prompt, left, y, width, 1.5);
        y -= 20.0;
    }
    if !data.example.is_empty() {
        let example = ctx.text_style("body", 11.0, "secondary");
        ctx.draw_text_wrapped(&data.example, &example, left, y, width, WRAPPED_LINE_HEIGHT);
    }
    ctx.draw_page_number(PageNumberStyle::Center);
}
