#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use leafpress::{BuildError, BuildOutput, FontLibrary, PdfBuilder, ProductConfig};
use lopdf::Document as LopdfDocument;
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub output: BuildOutput,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_output(output: BuildOutput) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&output.bytes)?;
        Ok(Self { output, doc })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.output.bytes
    }

    /// Number of pages in the PDF page tree
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        pdf_assertions::extract_text(&self.doc)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), self.bytes())
    }
}

/// A builder with no font directory: bundled fonts fall back to the
/// standard faces.
pub fn builder() -> PdfBuilder {
    PdfBuilder::new(FontLibrary::new())
}

pub fn config_from(json: Value) -> ProductConfig {
    ProductConfig::from_value(json).expect("fixture config parses")
}

pub fn build(json: Value) -> Result<GeneratedPdf, BuildError> {
    let output = builder().build_report(&config_from(json))?;
    Ok(GeneratedPdf::from_output(output).expect("output is a readable PDF"))
}

/// Builds a document holding a single page spec.
pub fn build_single(design: Value, page_type: &str, data: Value) -> Result<GeneratedPdf, BuildError> {
    let pages = serde_json::json!([{ "type": page_type, "data": data }]);
    build(fixtures::product(design, pages))
}
