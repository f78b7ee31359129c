mod common;

use common::fixtures::{self, clean_design, editorial_design, warm_design};
use common::{TestResult, build, build_single};
use leafpress_layout::{FontFace, text_height};
use serde_json::json;

/// A paragraph of `lines` hard-broken lines, each tagged with its paragraph.
fn tagged_paragraph(tag: &str, lines: usize) -> String {
    (0..lines)
        .map(|i| format!("{tag} line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn third_paragraph_starts_the_second_page() -> TestResult {
    // Clean chapters start at 734.4 and stop at 90 with 20.35pt lines:
    // two 14-line paragraphs fit, the third does not.
    let step = text_height("x", &FontFace::HELVETICA, 11.0, 432.0, 1.85);
    let available = (792.0 - 0.8 * 72.0) - (60.0 + 30.0);
    let lines = 14;
    assert!(2.0 * (lines as f32 * step + 6.0) <= available);
    assert!(3.0 * (lines as f32 * step) > available);

    let pdf = build_single(
        clean_design(),
        "chapter",
        json!({
            "paragraphs": [
                tagged_paragraph("alpha", lines),
                tagged_paragraph("beta", lines),
                tagged_paragraph("gamma", lines),
            ]
        }),
    )?;

    assert_eq!(pdf.page_count(), 2);
    let first = pdf.page_text(1);
    let second = pdf.page_text(2);
    assert!(first.contains("alpha line 13"));
    assert!(first.contains("beta line 13"));
    assert!(!first.contains("gamma"));
    assert!(second.contains("gamma line 0"));
    assert!(second.contains("gamma line 13"));
    Ok(())
}

#[test]
fn paragraphs_are_never_split_across_pages() -> TestResult {
    let paragraphs: Vec<String> = (0..12).map(|p| tagged_paragraph(&format!("p{p}"), 9)).collect();
    let pdf = build_single(editorial_design(), "chapter", json!({ "paragraphs": paragraphs }))?;
    assert!(pdf.page_count() > 1);

    for p in 0..12 {
        let first = format!("p{p} line 0");
        let last = format!("p{p} line 8");
        let page_of = |needle: &str| {
            (1..=pdf.page_count() as u32)
                .find(|page| pdf.page_text(*page).contains(needle))
                .expect("paragraph line is somewhere")
        };
        assert_eq!(page_of(&first), page_of(&last), "paragraph {p} was split");
    }
    Ok(())
}

#[test]
fn oversized_paragraph_breaks_once_and_overflows() -> TestResult {
    let pdf = build_single(
        clean_design(),
        "chapter",
        json!({ "paragraphs": ["A short opener.", tagged_paragraph("huge", 60)] }),
    )?;
    assert_eq!(pdf.page_count(), 2);
    assert!(pdf.page_text(2).contains("huge line 0"));
    assert!(pdf.page_text(2).contains("huge line 59"));
    Ok(())
}

#[test]
fn blank_paragraphs_only_add_space() -> TestResult {
    let pdf = build_single(
        warm_design(),
        "chapter",
        json!({ "chapter_title": "Quiet", "paragraphs": ["", "", "", "Still here.", ""] }),
    )?;
    assert_eq!(pdf.page_count(), 1);
    assert!(pdf.page_text(1).contains("Still here."));
    Ok(())
}

#[test]
fn page_count_is_stable_across_builds() -> TestResult {
    let paragraphs: Vec<String> = (0..40).map(|_| fixtures::paragraph(70)).collect();
    for (name, design) in fixtures::all_designs() {
        let pages = json!([
            { "type": "chapter", "data": { "chapter_number": 2, "chapter_title": "Habits", "paragraphs": paragraphs } }
        ]);
        let first = build(fixtures::product(design.clone(), pages.clone()))?;
        let second = build(fixtures::product(design, pages))?;
        assert!(first.page_count() > 1, "{name}");
        assert_eq!(first.page_count(), second.page_count(), "{name}");
        assert_eq!(first.output.page_count, first.page_count(), "{name}");
    }
    Ok(())
}

#[test]
fn continuation_pages_carry_page_numbers() -> TestResult {
    let paragraphs: Vec<String> = (0..30).map(|_| fixtures::paragraph(80)).collect();
    let pages = json!([
        { "type": "cover", "data": {} },
        { "type": "chapter", "data": { "chapter_title": "Long", "paragraphs": paragraphs } }
    ]);
    let pdf = build(fixtures::product(clean_design(), pages))?;
    assert!(pdf.page_count() >= 3);
    for page in 2..=pdf.page_count() {
        assert!(pdf.page_text(page as u32).contains(&page.to_string()), "page {page}");
    }
    Ok(())
}

#[test]
fn warm_author_appears_on_the_final_chapter_page() -> TestResult {
    let paragraphs: Vec<String> = (0..30).map(|_| fixtures::paragraph(80)).collect();
    let pdf = build_single(
        warm_design(),
        "chapter",
        json!({ "chapter_title": "Rituals", "paragraphs": paragraphs }),
    )?;
    let last = pdf.page_count() as u32;
    assert!(last > 1);
    assert!(pdf.page_text(last).contains("Jordan Reyes"));
    for page in 1..last {
        assert!(!pdf.page_text(page).contains("Jordan Reyes"), "page {page}");
    }
    Ok(())
}

#[test]
fn pages_after_a_chapter_follow_its_last_page() -> TestResult {
    let paragraphs: Vec<String> = (0..30).map(|_| fixtures::paragraph(80)).collect();
    let chapter_only = build_single(
        editorial_design(),
        "chapter",
        json!({ "paragraphs": paragraphs }),
    )?;
    let pages = json!([
        { "type": "chapter", "data": { "paragraphs": paragraphs } },
        { "type": "writing", "data": { "prompt_number": "07" } }
    ]);
    let pdf = build(fixtures::product(editorial_design(), pages))?;
    assert_eq!(pdf.page_count(), chapter_only.page_count() + 1);
    assert!(pdf.page_text(pdf.page_count() as u32).contains("07"));
    Ok(())
}
