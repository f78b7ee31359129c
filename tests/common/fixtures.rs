use serde_json::{Value, json};

/// Warm paper tones with the bundled serif fonts.
pub fn editorial_design() -> Value {
    json!({
        "colors": {
            "background": "#F7F4EF", "ink": "#111110", "earth": "#2E2A25",
            "muted": "#A09890", "accent": "#8A9E8C", "line": "#A09890",
            "primary": "#111110", "secondary": "#8A9E8C"
        },
        "fonts": {
            "heading": "Italiana", "body": "CrimsonPro",
            "body_italic": "CrimsonProItalic", "mono": "DMMono"
        },
        "layout": "editorial"
    })
}

pub fn clean_design() -> Value {
    json!({
        "colors": {
            "primary": "#1a2744", "secondary": "#2d3436", "accent": "#e17055",
            "background": "#ffffff", "muted": "#b2bec3", "line": "#f5f6fa",
            "ink": "#2d3436", "earth": "#2d3436"
        },
        "fonts": {
            "heading": "Helvetica-Bold", "body": "Helvetica",
            "body_italic": "Helvetica-Oblique", "mono": "Courier"
        },
        "layout": "clean"
    })
}

/// Dark background with light text.
pub fn warm_design() -> Value {
    json!({
        "colors": {
            "primary": "#1a1a2e", "secondary": "#B4A7D6", "accent": "#F4C430",
            "background": "#e8e8e8", "muted": "#999999", "line": "#2a3a5c",
            "ink": "#FFFFFF", "earth": "#e8e8e8"
        },
        "fonts": {
            "heading": "Helvetica-Bold", "body": "Helvetica",
            "body_italic": "Helvetica-Oblique", "mono": "Courier"
        },
        "layout": "warm"
    })
}

pub fn all_designs() -> Vec<(&'static str, Value)> {
    vec![
        ("editorial", editorial_design()),
        ("clean", clean_design()),
        ("warm", warm_design()),
    ]
}

/// Wraps a design and page list into a full product configuration.
pub fn product(design: Value, pages: Value) -> Value {
    json!({
        "title": "Morning Pages",
        "subtitle": "A Thirty Day Practice",
        "author": "Jordan Reyes",
        "filename": "morning-pages",
        "design": design,
        "links": {
            "shop": { "url": "https://shop.example.com", "display": "shop.example.com" }
        },
        "pages": pages
    })
}

/// One page of every type, each with its fields filled in.
pub fn every_page_type() -> Value {
    json!([
        { "type": "cover", "data": {
            "title": ["Morning", "Pages"], "subtitle": "A Thirty Day Practice",
            "badge": "30 DAYS", "brand": "Quiet Studio"
        }},
        { "type": "toc", "data": { "entries": [
            { "number": 1, "title": "Begin", "description": "Setting up the habit" },
            { "number": 2, "title": "Continue" }
        ], "footer_text": "Start anywhere" }},
        { "type": "letter", "data": {
            "heading": "Dear reader",
            "paragraphs": ["Welcome to the practice.", "", "Write every morning."],
            "sign_off": "See you tomorrow"
        }},
        { "type": "section", "data": { "title": "Part One", "subtitle": "Foundations", "epigraph": "Begin where you are." }},
        { "type": "prompt", "data": {
            "number": "01", "title": "The Blank Page",
            "prompt": "Write three pages without stopping.",
            "example": "I woke up thinking about the garden.",
            "pro_tip": "Set a timer and keep the pen moving.",
            "time_saved": "20 minutes"
        }},
        { "type": "writing", "data": { "prompt_number": "01", "quote": "Begin anywhere." }},
        { "type": "chapter", "data": {
            "chapter_number": 1, "chapter_title": "Why Mornings",
            "paragraphs": ["The morning mind is quiet.", "", "Use it."]
        }},
        { "type": "cta", "data": {
            "headline": ["Keep", "Going"], "bridge": "More journals are waiting.",
            "body": ["Thank you for writing with us."],
            "links": [{ "link": "shop", "label": "Shop" }],
            "sign_off": "With care"
        }}
    ])
}

/// A paragraph of roughly `words` words.
pub fn paragraph(words: usize) -> String {
    const WORDS: [&str; 8] = ["quiet", "morning", "light", "paper", "ink", "garden", "slowly", "notice"];
    (0..words)
        .map(|i| WORDS[i % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}
