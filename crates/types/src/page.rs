//! Typed page data.
//!
//! Each page type has its own data struct with explicit optional fields and
//! documented defaults. [`PageData::from_spec`] validates the opaque JSON
//! mapping of a [`PageSpec`] once, so renderers never probe loosely typed data.

use crate::config::{LinkSpec, PageSpec};
use crate::error::ConfigError;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The closed set of page types known to the renderer registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Cover,
    Letter,
    Prompt,
    Writing,
    Cta,
    Toc,
    Section,
    Chapter,
}

impl PageKind {
    pub const ALL: [PageKind; 8] = [
        PageKind::Cover,
        PageKind::Letter,
        PageKind::Prompt,
        PageKind::Writing,
        PageKind::Cta,
        PageKind::Toc,
        PageKind::Section,
        PageKind::Chapter,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        PageKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            PageKind::Cover => "cover",
            PageKind::Letter => "letter",
            PageKind::Prompt => "prompt",
            PageKind::Writing => "writing",
            PageKind::Cta => "cta",
            PageKind::Toc => "toc",
            PageKind::Section => "section",
            PageKind::Chapter => "chapter",
        }
    }
}

/// Scalar JSON values that read as text. Null is left to the caller.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts a string, a number, a boolean or null and yields a string.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        other => scalar_text(&other)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected text, found {other}"))),
    }
}

fn value_to_lines<E: de::Error>(value: Value) -> Result<Vec<String>, E> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Null => Ok(String::new()),
                other => scalar_text(&other)
                    .ok_or_else(|| E::custom(format!("expected a line of text, found {other}"))),
            })
            .collect(),
        other => match scalar_text(&other) {
            Some(line) => Ok(vec![line]),
            None => Err(E::custom(format!(
                "expected text or a list of text, found {other}"
            ))),
        },
    }
}

/// Accepts a single string or a list of strings.
fn lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_lines(Value::deserialize(deserializer)?)
}

fn optional_lines<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        other => value_to_lines(other).map(Some),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoverData {
    /// Defaults to the document title when absent.
    #[serde(deserialize_with = "optional_lines")]
    pub title: Option<Vec<String>>,
    #[serde(deserialize_with = "lines")]
    pub subtitle: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub badge: String,
    #[serde(deserialize_with = "text")]
    pub brand: String,
    /// Defaults to the document author when absent.
    #[serde(deserialize_with = "optional_text")]
    pub author: Option<String>,
    #[serde(deserialize_with = "text")]
    pub logo_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LetterData {
    #[serde(deserialize_with = "lines")]
    pub paragraphs: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub sign_off: String,
    #[serde(deserialize_with = "text")]
    pub heading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PromptData {
    #[serde(deserialize_with = "text")]
    pub number: String,
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub prompt: String,
    #[serde(deserialize_with = "text")]
    pub example: String,
    #[serde(deserialize_with = "text")]
    pub pro_tip: String,
    #[serde(deserialize_with = "text")]
    pub time_saved: String,
}

pub const DEFAULT_LINE_SPACING: f32 = 28.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WritingData {
    #[serde(deserialize_with = "text")]
    pub prompt_number: String,
    #[serde(deserialize_with = "text")]
    pub quote: String,
    pub line_spacing: f32,
    /// The clean layout shows "Your Notes" when absent.
    #[serde(deserialize_with = "optional_text")]
    pub heading: Option<String>,
}

impl Default for WritingData {
    fn default() -> Self {
        Self {
            prompt_number: String::new(),
            quote: String::new(),
            line_spacing: DEFAULT_LINE_SPACING,
            heading: None,
        }
    }
}

/// A call-to-action link. `link` may name an entry of the document's links.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CtaLink {
    #[serde(deserialize_with = "text")]
    pub display: String,
    #[serde(deserialize_with = "text")]
    pub url: String,
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "optional_text")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CtaData {
    #[serde(deserialize_with = "lines")]
    pub headline: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub bridge: String,
    #[serde(deserialize_with = "lines")]
    pub body: Vec<String>,
    pub links: Vec<CtaLink>,
    #[serde(deserialize_with = "text")]
    pub sign_off: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TocEntry {
    #[serde(deserialize_with = "text")]
    pub number: String,
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
}

pub const DEFAULT_TOC_HEADING: &str = "What\u{2019}s Inside";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TocData {
    #[serde(deserialize_with = "text")]
    pub heading: String,
    pub entries: Vec<TocEntry>,
    #[serde(deserialize_with = "text")]
    pub footer_text: String,
}

impl Default for TocData {
    fn default() -> Self {
        Self {
            heading: DEFAULT_TOC_HEADING.to_string(),
            entries: Vec::new(),
            footer_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub subtitle: String,
    #[serde(deserialize_with = "text")]
    pub epigraph: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChapterData {
    #[serde(deserialize_with = "text")]
    pub chapter_number: String,
    #[serde(deserialize_with = "text")]
    pub chapter_title: String,
    /// Body text in order; `""` inserts vertical spacing.
    #[serde(deserialize_with = "lines")]
    pub paragraphs: Vec<String>,
}

/// Validated page data, one variant per page type.
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    Cover(CoverData),
    Letter(LetterData),
    Prompt(PromptData),
    Writing(WritingData),
    Cta(CtaData),
    Toc(TocData),
    Section(SectionData),
    Chapter(ChapterData),
}

impl PageData {
    pub fn kind(&self) -> PageKind {
        match self {
            PageData::Cover(_) => PageKind::Cover,
            PageData::Letter(_) => PageKind::Letter,
            PageData::Prompt(_) => PageKind::Prompt,
            PageData::Writing(_) => PageKind::Writing,
            PageData::Cta(_) => PageKind::Cta,
            PageData::Toc(_) => PageKind::Toc,
            PageData::Section(_) => PageKind::Section,
            PageData::Chapter(_) => PageKind::Chapter,
        }
    }

    /// Converts the wire form of page `index` into typed data.
    pub fn from_spec(
        index: usize,
        spec: &PageSpec,
        links: &BTreeMap<String, LinkSpec>,
    ) -> Result<PageData, ConfigError> {
        let kind = PageKind::from_name(&spec.kind).ok_or_else(|| ConfigError::UnknownPageType {
            index,
            page_type: spec.kind.clone(),
        })?;

        let data = match &spec.data {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };

        let page = match kind {
            PageKind::Cover => PageData::Cover(parse(index, kind, data)?),
            PageKind::Letter => PageData::Letter(parse(index, kind, data)?),
            PageKind::Prompt => PageData::Prompt(parse(index, kind, data)?),
            PageKind::Writing => {
                let writing: WritingData = parse(index, kind, data)?;
                if !(writing.line_spacing.is_finite() && writing.line_spacing > 0.0) {
                    return Err(ConfigError::InvalidPageData {
                        index,
                        page_type: kind.name(),
                        message: format!(
                            "line_spacing must be a positive number, got {}",
                            writing.line_spacing
                        ),
                    });
                }
                PageData::Writing(writing)
            }
            PageKind::Cta => {
                let mut cta: CtaData = parse(index, kind, data)?;
                resolve_links(&mut cta, links)?;
                PageData::Cta(cta)
            }
            PageKind::Toc => PageData::Toc(parse(index, kind, data)?),
            PageKind::Section => PageData::Section(parse(index, kind, data)?),
            PageKind::Chapter => PageData::Chapter(parse(index, kind, data)?),
        };
        Ok(page)
    }
}

fn parse<T: DeserializeOwned>(index: usize, kind: PageKind, data: Value) -> Result<T, ConfigError> {
    serde_json::from_value(data).map_err(|e| ConfigError::InvalidPageData {
        index,
        page_type: kind.name(),
        message: e.to_string(),
    })
}

fn resolve_links(cta: &mut CtaData, links: &BTreeMap<String, LinkSpec>) -> Result<(), ConfigError> {
    for link in cta.links.iter_mut() {
        if let Some(name) = &link.link {
            let named = links
                .get(name)
                .ok_or_else(|| ConfigError::UnknownLink { name: name.clone() })?;
            if link.url.is_empty() {
                link.url = named.url.clone();
            }
            if link.display.is_empty() {
                link.display = named.display.clone();
            }
        }
        if link.display.is_empty() {
            link.display = link.url.clone();
        }
    }
    Ok(())
}
