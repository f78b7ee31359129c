//! Word documents: paragraphs of `word/document.xml`, with `Heading*`
//! paragraph styles turned into heading markers.

use super::{ExtractError, ExtractedText, heading};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn extract(path: &Path) -> Result<ExtractedText, ExtractError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: display.clone(),
        source,
    })?;
    let archive_error = |source| ExtractError::Archive {
        path: display.clone(),
        source,
    };
    let mut archive = zip::ZipArchive::new(file).map_err(archive_error)?;
    let mut xml = Vec::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(archive_error)?
        .read_to_end(&mut xml)
        .map_err(|source| ExtractError::Io {
            path: display.clone(),
            source,
        })?;

    let paragraphs = document_paragraphs(&xml).map_err(|message| ExtractError::Docx {
        path: display.clone(),
        message,
    })?;
    log::debug!("Extracted {} paragraph(s) from {}", paragraphs.len(), display);
    Ok(ExtractedText {
        paragraphs,
        source_pages: None,
    })
}

fn is_heading_style(element: &BytesStart<'_>, reader: &Reader<&[u8]>) -> bool {
    element
        .attributes()
        .flatten()
        .filter(|attr| attr.key.local_name().as_ref() == b"val")
        .any(|attr| {
            reader
                .decoder()
                .decode(attr.value.as_ref())
                .is_ok_and(|style| style.starts_with("Heading"))
        })
}

/// Paragraph texts of a WordprocessingML body, skipping empty ones.
fn document_paragraphs(xml: &[u8]) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut is_heading = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => {
                    current.clear();
                    is_heading = false;
                }
                b"t" => in_text = true,
                b"pStyle" => is_heading |= is_heading_style(&e, &reader),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"pStyle" => is_heading |= is_heading_style(&e, &reader),
                b"tab" | b"br" => current.push(' '),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.decode().map_err(|err| format!("text decode: {err:?}"))?;
                current.push_str(&text);
            }
            Ok(Event::GeneralRef(e)) if in_text => {
                let name = e.decode().map_err(|err| format!("entity decode: {err:?}"))?;
                let entity = format!("&{name};");
                let resolved = quick_xml::escape::unescape(&entity)
                    .map_err(|err| format!("entity unescape: {err:?}"))?;
                current.push_str(&resolved);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(if is_heading {
                            heading(text)
                        } else {
                            text.to_string()
                        });
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(format!(
                    "XML error at byte {}: {err}",
                    reader.buffer_position()
                ));
            }
        }
        buf.clear();
    }
    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_file;
    use std::io::Write;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Slow Mornings</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Coffee </w:t></w:r><w:r><w:t>&amp; quiet.</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:pPr><w:pStyle w:val="Normal"/></w:pPr><w:r><w:t>Tea</w:t><w:tab/><w:t>too.</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Evenings</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn write_docx(path: &Path, document: &str) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        writer
            .start_file(DOCUMENT_PART, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn heading_styles_become_markers() {
        let paragraphs = document_paragraphs(BODY.as_bytes()).unwrap();
        assert_eq!(
            paragraphs,
            vec!["# Slow Mornings", "Coffee & quiet.", "Tea too.", "# Evenings"]
        );
    }

    #[test]
    fn reads_docx_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.DOCX");
        write_docx(&path, BODY);

        let chapter = extract_file(&path).unwrap().into_chapter();
        assert_eq!(chapter.title.as_deref(), Some("Slow Mornings"));
        assert_eq!(chapter.paragraphs, vec!["Coffee & quiet.", "Tea too.", "Evenings"]);
    }

    #[test]
    fn archive_without_a_document_part_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        writer
            .start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.finish().unwrap();

        let err = extract_file(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Archive { .. }));
    }

    #[test]
    fn malformed_xml_is_reported() {
        let err = document_paragraphs(b"<w:p><w:t>open</w:p>").unwrap_err();
        assert!(err.contains("XML error"), "{err}");
    }
}
