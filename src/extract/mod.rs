//! Turns uploaded documents into chapter paragraphs.
//!
//! Every extractor yields plain paragraph strings. Paragraphs recognized as
//! headings carry a leading [`HEADING_MARKER`], the same convention markdown
//! input already uses, so [`ExtractedText::into_chapter`] can lift the first
//! one into the chapter title.

mod docx;
mod pdf;

use std::path::Path;
use thiserror::Error;

/// Prefix marking a paragraph as a heading.
pub const HEADING_MARKER: &str = "# ";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read PDF '{path}': {source}")]
    Pdf {
        path: String,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to open DOCX archive '{path}': {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Malformed DOCX '{path}': {message}")]
    Docx { path: String, message: String },

    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),
}

/// Text pulled out of a file, already split into paragraphs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub paragraphs: Vec<String>,
    /// Number of source pages for PDFs, `None` otherwise.
    pub source_pages: Option<usize>,
}

/// A chapter assembled from extracted text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedChapter {
    /// The first heading, when the text opens with one.
    pub title: Option<String>,
    pub paragraphs: Vec<String>,
}

impl ExtractedText {
    /// Splits off a leading heading as the chapter title. Later headings stay
    /// in the body as plain paragraphs without their marker.
    pub fn into_chapter(self) -> ExtractedChapter {
        let mut paragraphs = self.paragraphs.into_iter().skip_while(|p| p.is_empty()).peekable();
        let title = paragraphs
            .next_if(|p| heading_text(p).is_some())
            .and_then(|p| heading_text(&p).map(str::to_string));
        let paragraphs = paragraphs
            .map(|p| match heading_text(&p) {
                Some(text) => text.to_string(),
                None => p,
            })
            .collect();
        ExtractedChapter { title, paragraphs }
    }
}

/// The text of a heading paragraph such as `# Title` or `## Part`.
pub fn heading_text(paragraph: &str) -> Option<&str> {
    let rest = paragraph.trim_start_matches('#');
    if rest.len() == paragraph.len() || !rest.starts_with(' ') {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

fn heading(text: &str) -> String {
    format!("{HEADING_MARKER}{text}")
}

/// Splits text into paragraphs at blank lines.
///
/// Lines inside a block are joined with single spaces. Two or more blank
/// lines between blocks insert one empty paragraph, which chapter pages
/// render as extra vertical space.
pub fn paragraphs_from_text(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
            blank_run += 1;
            continue;
        }
        if current.is_empty() && !paragraphs.is_empty() && blank_run >= 2 {
            paragraphs.push(String::new());
        }
        blank_run = 0;
        current.push(line);
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

/// Reads a text, markdown, DOCX or PDF file into paragraphs.
pub fn extract_file(path: impl AsRef<Path>) -> Result<ExtractedText, ExtractError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "text" | "md" | "markdown" => {
            let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Ok(ExtractedText {
                paragraphs: paragraphs_from_text(&String::from_utf8_lossy(&bytes)),
                source_pages: None,
            })
        }
        "docx" => docx::extract(path),
        "pdf" => pdf::extract(path),
        other => Err(ExtractError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            other.to_string()
        })),
    }
}
