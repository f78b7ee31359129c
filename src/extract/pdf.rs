//! PDF text with layout cues.
//!
//! Page content streams are walked directly so every shown string keeps its
//! font size, weight and position. Lines set noticeably larger than the
//! dominant body size (or bold at body size) become headings, and lines that
//! fill the text column are merged with the line after them into one
//! paragraph. Short lines such as list items stay on their own.

use super::{ExtractError, ExtractedText, heading};
use leafpress_layout::FontFace;
use leafpress_layout::encoding::decode_byte;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// Points above the body size at which a line reads as a heading.
const HEADING_SIZE_DELTA: f32 = 1.5;
/// Bold body-size lines only count as headings when shorter than this.
const BOLD_HEADING_MAX_CHARS: usize = 80;
/// Longer "headings" are kept as body text.
const HEADING_MAX_CHARS: usize = 120;
/// Share of the column a line must fill to continue into the next one.
const FULL_WIDTH_RATIO: f32 = 0.85;
const MIN_COLUMN_WIDTH: f32 = 50.0;
const DEFAULT_BODY_SIZE: f32 = 12.0;
/// `TJ` adjustments (thousandths of an em) wide enough to read as a space.
const TJ_SPACE_THRESHOLD: f32 = -200.0;

/// One shown string with the state it was drawn in.
#[derive(Debug, Clone, PartialEq)]
struct Span {
    text: String,
    y: f32,
    size: f32,
    bold: bool,
}

/// A classified text line, ready for paragraph merging.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    is_heading: bool,
    is_full_width: bool,
}

pub(super) fn extract(path: &Path) -> Result<ExtractedText, ExtractError> {
    let pdf_error = |source| ExtractError::Pdf {
        path: path.display().to_string(),
        source,
    };
    let document = Document::load(path).map_err(pdf_error)?;
    let pages: Vec<ObjectId> = document.get_pages().values().copied().collect();

    let mut page_spans = Vec::with_capacity(pages.len());
    for (number, page_id) in pages.iter().enumerate() {
        match spans_on_page(&document, *page_id) {
            Ok(spans) => page_spans.push(spans),
            Err(e) => log::warn!("Skipping page {} of {}: {}", number + 1, path.display(), e),
        }
    }

    let lines = classify_lines(&page_spans);
    let paragraphs = merge_lines(&lines);
    log::debug!(
        "Extracted {} paragraph(s) from {} PDF page(s)",
        paragraphs.len(),
        pages.len()
    );
    Ok(ExtractedText {
        paragraphs,
        source_pages: Some(pages.len()),
    })
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes.iter().filter_map(|b| decode_byte(*b)).collect()
}

/// Text state tracked while walking a content stream. Only the vertical
/// position and scale of the text matrix matter here.
#[derive(Debug, Clone, Copy)]
struct TextState {
    y: f32,
    scale: f32,
    leading: f32,
    size: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            y: 0.0,
            scale: 1.0,
            leading: 0.0,
            size: DEFAULT_BODY_SIZE,
        }
    }
}

impl TextState {
    fn next_line(&mut self) {
        self.y -= self.leading * self.scale;
    }
}

fn spans_on_page(document: &Document, page_id: ObjectId) -> Result<Vec<Span>, lopdf::Error> {
    let fonts = document.get_page_fonts(page_id)?;
    let content = Content::decode(&document.get_page_content(page_id)?)?;

    let mut spans = Vec::new();
    let mut state = TextState::default();
    let mut bold = false;
    let mut encoding = None;

    for operation in &content.operations {
        let operands = &operation.operands;
        // Shown strings in order. `None` stands for a TJ gap wide enough to be a space.
        let shown: Option<Vec<Option<&[u8]>>> = match operation.operator.as_str() {
            "BT" => {
                state = TextState {
                    leading: state.leading,
                    size: state.size,
                    ..TextState::default()
                };
                None
            }
            "Tf" => {
                let font = operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| fonts.get(name));
                bold = font
                    .and_then(|f| f.get(b"BaseFont").ok())
                    .and_then(|name| name.as_name().ok())
                    .is_some_and(|name| String::from_utf8_lossy(name).contains("Bold"));
                encoding = font.and_then(|f| f.get_font_encoding(document).ok());
                if let Some(size) = operands.get(1).and_then(number) {
                    state.size = size;
                }
                None
            }
            "TL" => {
                state.leading = operands.first().and_then(number).unwrap_or(0.0);
                None
            }
            "Td" | "TD" => {
                let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                if operation.operator == "TD" {
                    state.leading = -ty;
                }
                state.y += ty * state.scale;
                None
            }
            "Tm" => {
                let values: Vec<f32> = operands.iter().filter_map(number).collect();
                if let [_, _, c, d, _, f] = values[..] {
                    state.scale = c.hypot(d);
                    state.y = f;
                }
                None
            }
            "T*" => {
                state.next_line();
                None
            }
            "Tj" | "'" | "\"" => {
                if operation.operator != "Tj" {
                    state.next_line();
                }
                operands
                    .last()
                    .and_then(|s| s.as_str().ok())
                    .map(|bytes| vec![Some(bytes)])
            }
            "TJ" => operands.first().and_then(|a| a.as_array().ok()).map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item.as_str() {
                        Ok(bytes) => Some(Some(bytes)),
                        Err(_) => number(item)
                            .is_some_and(|adjust| adjust < TJ_SPACE_THRESHOLD)
                            .then_some(None),
                    })
                    .collect()
            }),
            _ => None,
        };

        let Some(pieces) = shown else {
            continue;
        };
        let text: String = pieces
            .into_iter()
            .map(|piece| match (piece, &encoding) {
                (Some(bytes), Some(encoding)) => Document::decode_text(encoding, bytes)
                    .unwrap_or_else(|_| decode_win_ansi(bytes)),
                (Some(bytes), None) => decode_win_ansi(bytes),
                (None, _) => " ".to_string(),
            })
            .collect();
        if !text.trim().is_empty() {
            spans.push(Span {
                text,
                y: state.y,
                size: state.size * state.scale,
                bold,
            });
        }
    }
    Ok(spans)
}

/// Font size carrying the most characters, rounded to a tenth of a point.
fn dominant_size(pages: &[Vec<Span>]) -> f32 {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for span in pages.iter().flatten() {
        *counts.entry((span.size * 10.0).round() as i32).or_default() += span.text.chars().count();
    }
    counts
        .into_iter()
        .max_by_key(|(_, chars)| *chars)
        .map(|(tenths, _)| tenths as f32 / 10.0)
        .unwrap_or(DEFAULT_BODY_SIZE)
}

fn is_heading_span(span: &Span, text: &str, body_size: f32) -> bool {
    let size = (span.size * 10.0).round() / 10.0;
    size > body_size + HEADING_SIZE_DELTA
        || (size >= body_size && span.bold && text.chars().count() < BOLD_HEADING_MAX_CHARS)
}

/// Groups spans sharing a baseline into lines and classifies each one.
fn classify_lines(pages: &[Vec<Span>]) -> Vec<Line> {
    let body_size = dominant_size(pages);
    let mut lines = Vec::new();

    for spans in pages {
        // (text, heading, estimated width)
        let mut page_lines: Vec<(String, bool, f32)> = Vec::new();
        let mut previous: Option<&Span> = None;
        for span in spans {
            let text = span.text.trim();
            let same_line = previous
                .is_some_and(|p| (p.y - span.y).abs() < span.size.max(p.size) * 0.5);
            let heading = is_heading_span(span, text, body_size);
            let width = FontFace::HELVETICA.string_width(text, span.size);
            match page_lines.last_mut() {
                Some((line, is_heading, line_width)) if same_line => {
                    line.push(' ');
                    line.push_str(text);
                    *is_heading |= heading;
                    *line_width += width;
                }
                _ => page_lines.push((text.to_string(), heading, width)),
            }
            previous = Some(span);
        }

        let column = page_lines
            .iter()
            .filter(|(_, heading, _)| !heading)
            .map(|(_, _, width)| *width)
            .fold(0.0f32, f32::max);
        lines.extend(page_lines.into_iter().map(|(text, is_heading, width)| Line {
            text,
            is_heading,
            is_full_width: column > MIN_COLUMN_WIDTH && width / column > FULL_WIDTH_RATIO,
        }));
    }
    lines
}

/// Joins wrapped body lines into paragraphs and marks headings.
fn merge_lines(lines: &[Line]) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        i += 1;
        if line.is_heading && line.text.chars().count() < HEADING_MAX_CHARS {
            paragraphs.push(heading(&line.text));
            continue;
        }

        let mut merged = line.text.clone();
        let mut continues = line.is_full_width;
        while continues && i < lines.len() && !lines[i].is_heading {
            merged.push(' ');
            merged.push_str(&lines[i].text);
            continues = lines[i].is_full_width;
            i += 1;
        }
        paragraphs.push(merged);
    }
    paragraphs
}
