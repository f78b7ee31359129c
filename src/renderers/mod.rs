//! Page renderers, one module per page type.
//!
//! Every renderer picks its drawing routine from the design's [`Layout`]:
//! the three variants share the [`RenderContext`] helpers and differ only in
//! positions, fonts and colors.
//!
//! [`Layout`]: leafpress_types::Layout

mod chapter;
mod cover;
mod cta;
mod letter;
mod prompt;
mod section;
mod toc;
mod writing;

pub use chapter::{ChapterVariant, chapter_variant};

use crate::context::RenderContext;
use leafpress_types::{PageData, ProductConfig};

/// Draws one page (or, for chapters, a run of pages) and closes it.
pub fn render_page(ctx: &mut RenderContext, page: &PageData, config: &ProductConfig) {
    log::debug!(
        "Rendering {} page at page {}",
        page.kind().name(),
        ctx.page_number() + 1
    );
    match page {
        PageData::Cover(data) => cover::render(ctx, data, config),
        PageData::Letter(data) => letter::render(ctx, data),
        PageData::Prompt(data) => prompt::render(ctx, data),
        PageData::Writing(data) => writing::render(ctx, data, config),
        PageData::Cta(data) => cta::render(ctx, data),
        PageData::Toc(data) => toc::render(ctx, data),
        PageData::Section(data) => section::render(ctx, data),
        PageData::Chapter(data) => {
            chapter::render(ctx, data, config);
        }
    }
}

/// Thin accent rule near the top edge used by the warm variants.
fn draw_top_rule(ctx: &mut RenderContext) {
    let y = ctx.height - 50.0;
    let right = ctx.width - 72.0;
    ctx.draw_accent_line(72.0, y, right, "accent", 0.5);
}
