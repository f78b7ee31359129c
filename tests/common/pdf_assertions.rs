use lopdf::{Dictionary, Document as LopdfDocument, Object};
use std::collections::BTreeSet;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        if let Ok(page_text) = doc.extract_text(&[*page_num]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Follows a reference, or returns the dictionary held inline.
fn resolve_dict<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object.as_reference() {
        Ok(id) => doc.get_dictionary(id).ok(),
        Err(_) => object.as_dict().ok(),
    }
}

fn page_dicts(doc: &LopdfDocument) -> Vec<&Dictionary> {
    doc.get_pages()
        .values()
        .filter_map(|id| doc.get_dictionary(*id).ok())
        .collect()
}

/// Base font names referenced by the given page's resources, 1-based
pub fn page_font_names(doc: &LopdfDocument, page: u32) -> BTreeSet<String> {
    let mut fonts = BTreeSet::new();
    let Some(page_id) = doc.get_pages().get(&page).copied() else {
        return fonts;
    };
    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        return fonts;
    };
    let resources = page_dict.get(b"Resources").ok().and_then(|r| resolve_dict(doc, r));
    let font_dict = resources
        .and_then(|r| r.get(b"Font").ok())
        .and_then(|f| resolve_dict(doc, f));
    if let Some(font_dict) = font_dict {
        for (_, font) in font_dict.iter() {
            if let Some(font) = resolve_dict(doc, font)
                && let Ok(name) = font.get(b"BaseFont").and_then(|n| n.as_name())
            {
                fonts.insert(String::from_utf8_lossy(name).to_string());
            }
        }
    }
    fonts
}

/// Font names used anywhere in the document
pub fn extract_font_names(doc: &LopdfDocument) -> BTreeSet<String> {
    doc.get_pages()
        .keys()
        .flat_map(|page| page_font_names(doc, *page))
        .collect()
}

/// URIs of every link annotation, in page order
pub fn link_uris(doc: &LopdfDocument) -> Vec<String> {
    let mut uris = Vec::new();
    for page in page_dicts(doc) {
        let Ok(annots) = page.get(b"Annots").and_then(|a| a.as_array()) else {
            continue;
        };
        for annot in annots {
            let uri = resolve_dict(doc, annot)
                .and_then(|a| a.get(b"A").ok())
                .and_then(|action| resolve_dict(doc, action))
                .and_then(|action| action.get(b"URI").ok())
                .and_then(|uri| uri.as_str().ok());
            if let Some(uri) = uri {
                uris.push(String::from_utf8_lossy(uri).to_string());
            }
        }
    }
    uris
}

/// Title and author from the document info dictionary
pub fn metadata(doc: &LopdfDocument) -> (Option<String>, Option<String>) {
    let info = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|info| resolve_dict(doc, info));
    let field = |key: &[u8]| {
        info.and_then(|i| i.get(key).ok())
            .and_then(|v| v.as_str().ok())
            .map(|s| String::from_utf8_lossy(s).to_string())
    };
    (field(b"Title"), field(b"Author"))
}

/// Asserts every `needle` occurs in the document text.
pub fn assert_contains_all(doc: &LopdfDocument, needles: &[&str]) {
    let text = extract_text(doc);
    for needle in needles {
        assert!(text.contains(needle), "missing '{needle}' in:\n{text}");
    }
}
