//! Flowing paragraphs down a page and onto new pages.
//!
//! [`ChapterFlow`] owns the vertical cursor of a run of paragraphs. Each
//! paragraph is measured before it is drawn; when it would cross the bottom
//! limit the current page is finished, a continuation page is started by the
//! [`PageChrome`], and the paragraph is drawn whole at the top of it. A
//! paragraph is never split, so one that is taller than an entire page
//! overflows the bottom of the page it lands on.

use crate::context::{RenderContext, TextStyle};
use leafpress_layout::text_height;

/// Persistent decoration of the pages a flow runs over.
pub trait PageChrome {
    /// Starts a page and draws its decoration.
    fn draw(&self, ctx: &mut RenderContext);

    /// Baseline of the first paragraph on a continuation page.
    fn continuation_top(&self, ctx: &RenderContext) -> f32;

    /// Decorates and closes a page that is followed by another one.
    fn finish_page(&self, ctx: &mut RenderContext);

    /// Decorates and closes the final page of the flow.
    fn finish_last_page(&self, ctx: &mut RenderContext) {
        self.finish_page(ctx);
    }

    /// Starts a continuation page and returns where its content begins.
    fn begin_continuation(&self, ctx: &mut RenderContext) -> f32 {
        self.draw(ctx);
        self.continuation_top(ctx)
    }
}

/// How flowed paragraphs are set.
#[derive(Debug, Clone)]
pub struct FlowStyle {
    pub text: TextStyle,
    /// Left edge of every line.
    pub x: f32,
    pub max_width: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_height: f32,
    /// Space added after each drawn paragraph.
    pub paragraph_gap: f32,
    /// Space a blank paragraph stands for.
    pub blank_gap: f32,
}

/// What a finished flow did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSummary {
    pub pages_started: usize,
    /// For each paragraph, the zero-based page of the flow it was drawn on,
    /// or `None` for blank paragraphs.
    pub placements: Vec<Option<usize>>,
}

pub struct ChapterFlow<'a> {
    style: FlowStyle,
    chrome: &'a dyn PageChrome,
    y: f32,
    bottom_limit: f32,
    page: usize,
    placements: Vec<Option<usize>>,
}

impl<'a> ChapterFlow<'a> {
    /// Starts a flow at `y` on a page the caller has already begun.
    pub fn new(style: FlowStyle, chrome: &'a dyn PageChrome, y: f32, bottom_limit: f32) -> Self {
        Self {
            style,
            chrome,
            y,
            bottom_limit,
            page: 0,
            placements: Vec::new(),
        }
    }

    pub fn cursor(&self) -> f32 {
        self.y
    }

    pub fn pages_started(&self) -> usize {
        self.page + 1
    }

    pub fn placements(&self) -> &[Option<usize>] {
        &self.placements
    }

    /// Places one paragraph. An empty paragraph only moves the cursor down.
    pub fn place_paragraph(&mut self, ctx: &mut RenderContext, paragraph: &str) {
        if paragraph.is_empty() {
            self.y -= self.style.blank_gap;
            self.placements.push(None);
            return;
        }

        let style = &self.style;
        let needed = text_height(
            paragraph,
            &style.text.face,
            style.text.size,
            style.max_width,
            style.line_height,
        );

        if self.y - needed < self.bottom_limit {
            log::debug!(
                "Paragraph {} needs {:.1}pt with {:.1}pt left; breaking to a new page",
                self.placements.len(),
                needed,
                self.y - self.bottom_limit
            );
            self.chrome.finish_page(ctx);
            self.y = self.chrome.begin_continuation(ctx);
            self.page += 1;
        }

        self.y = ctx.draw_text_wrapped(
            paragraph,
            &self.style.text,
            self.style.x,
            self.y,
            self.style.max_width,
            self.style.line_height,
        );
        self.y -= self.style.paragraph_gap;
        self.placements.push(Some(self.page));
    }

    /// Closes the last page of the flow.
    pub fn finish(self, ctx: &mut RenderContext) -> FlowSummary {
        self.chrome.finish_last_page(ctx);
        FlowSummary {
            pages_started: self.page + 1,
            placements: self.placements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PageNumberStyle;
    use crate::test_utils::RecordingSurface;
    use leafpress_layout::{wrap_lines, FontFace, FontLibrary};
    use leafpress_types::{Color, DesignSystem, Size};

    struct PlainChrome;

    impl PageChrome for PlainChrome {
        fn draw(&self, ctx: &mut RenderContext) {
            ctx.start_page(Some("background"));
        }

        fn continuation_top(&self, ctx: &RenderContext) -> f32 {
            ctx.height - 100.0
        }

        fn finish_page(&self, ctx: &mut RenderContext) {
            ctx.draw_page_number(PageNumberStyle::Center);
            ctx.new_page();
        }
    }

    const TOP: f32 = 692.0;
    const BOTTOM: f32 = 90.0;

    fn style() -> FlowStyle {
        FlowStyle {
            text: TextStyle {
                face: FontFace::HELVETICA,
                size: 10.0,
                color: Color::BLACK,
            },
            x: 90.0,
            max_width: 300.0,
            line_height: 1.5,
            paragraph_gap: 5.0,
            blank_gap: 12.0,
        }
    }

    fn context() -> (RenderContext, RecordingSurface) {
        let surface = RecordingSurface::new(Size::new(612.0, 792.0));
        let ctx = RenderContext::new(
            Box::new(surface.clone()),
            &DesignSystem::default(),
            FontLibrary::new(),
        );
        (ctx, surface)
    }

    /// A paragraph that wraps to exactly `lines` lines at the test style.
    fn paragraph(lines: usize, tag: &str) -> String {
        let text = (0..lines)
            .map(|i| format!("{tag}{i} {}", "filler words here ".repeat(3).trim()))
            .collect::<Vec<_>>()
            .join("\n");
        let s = style();
        assert_eq!(wrap_lines(&text, &s.text.face, s.text.size, s.max_width).len(), lines);
        text
    }

    fn run(paragraphs: &[String]) -> (FlowSummary, RecordingSurface) {
        let (mut ctx, surface) = context();
        let chrome = PlainChrome;
        chrome.draw(&mut ctx);
        let mut flow = ChapterFlow::new(style(), &chrome, TOP, BOTTOM);
        for p in paragraphs {
            flow.place_paragraph(&mut ctx, p);
        }
        (flow.finish(&mut ctx), surface)
    }

    #[test]
    fn short_flow_stays_on_one_page() {
        let (summary, surface) = run(&[paragraph(2, "a"), String::new(), paragraph(3, "b")]);
        assert_eq!(summary.pages_started, 1);
        assert_eq!(summary.placements, vec![Some(0), None, Some(0)]);
        assert_eq!(surface.drawn_pages(), 1);
    }

    #[test]
    fn paragraph_that_does_not_fit_moves_whole() {
        // 40 lines take 600pt of the 602pt above the limit.
        let first = paragraph(40, "a");
        let second = paragraph(3, "b");
        let (summary, surface) = run(&[first, second]);
        assert_eq!(summary.placements, vec![Some(0), Some(1)]);
        assert_eq!(surface.drawn_pages(), 2);

        let second_page = surface.texts_on_page(1);
        assert!(second_page.iter().any(|t| t.starts_with("b0 ")));
        assert!(!surface.texts_on_page(0).iter().any(|t| t.starts_with('b')));
    }

    #[test]
    fn continuation_starts_at_the_chrome_top() {
        let (_, surface) = run(&[paragraph(40, "a"), paragraph(1, "b")]);
        let first_on_next = surface
            .texts()
            .into_iter()
            .find(|t| t.page == 1 && t.text.starts_with("b0"))
            .unwrap();
        assert_eq!(first_on_next.y, 692.0);
    }

    #[test]
    fn blank_paragraphs_never_break_pages() {
        let mut paragraphs = vec![paragraph(39, "a")];
        paragraphs.extend(std::iter::repeat_n(String::new(), 80));
        let (summary, surface) = run(&paragraphs);
        assert_eq!(summary.pages_started, 1);
        assert_eq!(surface.drawn_pages(), 1);
    }

    #[test]
    fn oversized_paragraph_overflows_its_new_page() {
        let (summary, _) = run(&[paragraph(2, "a"), paragraph(60, "b"), paragraph(1, "c")]);
        assert_eq!(summary.placements, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(summary.pages_started, 3);
    }

    #[test]
    fn oversized_first_paragraph_leaves_a_started_page_behind() {
        // The break happens before anything but chrome was drawn.
        let (summary, surface) = run(&[paragraph(60, "a")]);
        assert_eq!(summary.placements, vec![Some(1)]);
        assert_eq!(surface.drawn_pages(), 2);
    }

    #[test]
    fn paragraphs_are_never_split_across_pages() {
        let sizes = [3, 7, 1, 12, 0, 5, 9, 2, 0, 0, 14, 6, 8, 11, 4, 1, 13, 2, 9, 7];
        let paragraphs: Vec<String> = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| if n == 0 { String::new() } else { paragraph(n, &format!("p{i}x")) })
            .collect();
        let (summary, surface) = run(&paragraphs);
        assert!(summary.pages_started > 1);

        for (i, placement) in summary.placements.iter().enumerate() {
            let tag = format!("p{i}x");
            let pages: Vec<usize> = surface
                .texts()
                .into_iter()
                .filter(|t| t.text.starts_with(&tag))
                .map(|t| t.page)
                .collect();
            match placement {
                None => assert!(pages.is_empty()),
                Some(page) => {
                    assert_eq!(pages.len(), sizes[i]);
                    assert!(pages.iter().all(|p| p == page), "paragraph {i} split: {pages:?}");
                }
            }
        }
    }

    #[test]
    fn same_input_paginates_the_same_way() {
        let paragraphs: Vec<String> = (0..25).map(|i| paragraph(1 + i % 9, &format!("q{i}x"))).collect();
        let (first, _) = run(&paragraphs);
        let (second, _) = run(&paragraphs);
        assert_eq!(first, second);
    }
}
