//! The declarative product configuration: metadata, design system and the
//! ordered list of page specifications.

use crate::color::Color;
use crate::error::ConfigError;
use crate::geometry::{Margins, PageSize};
use crate::page::PageData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Font used when a design does not name one for a role.
pub const DEFAULT_FONT: &str = "Helvetica";

/// One of the three named visual styles.
///
/// A missing `layout` key means [`Layout::Editorial`]; an unrecognized one
/// means [`Layout::Clean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    #[default]
    Editorial,
    Clean,
    Warm,
}

impl Layout {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "editorial" => Layout::Editorial,
            "warm" => Layout::Warm,
            _ => Layout::Clean,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Editorial => "editorial",
            Layout::Clean => "clean",
            Layout::Warm => "warm",
        }
    }
}

impl From<String> for Layout {
    fn from(value: String) -> Self {
        Layout::from_name(&value)
    }
}

impl From<Layout> for String {
    fn from(value: Layout) -> Self {
        value.name().to_string()
    }
}

/// Visual design configuration for a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSystem {
    /// Color role name to hex value (`primary`, `accent`, `ink`, ...).
    pub colors: BTreeMap<String, String>,
    /// Font role name to font identifier (`heading`, `body`, `body_italic`, `mono`).
    pub fonts: BTreeMap<String, String>,
    pub page_size: PageSize,
    pub margins: Margins,
    pub layout: Layout,
}

impl DesignSystem {
    /// Resolves a color role, falling back to black when the role is absent
    /// or was never validated.
    pub fn color(&self, role: &str) -> Color {
        self.colors
            .get(role)
            .and_then(|hex| Color::parse_hex(hex).ok())
            .unwrap_or(Color::BLACK)
    }

    /// Resolves a font role to a font identifier.
    pub fn font(&self, role: &str) -> &str {
        self.fonts
            .get(role)
            .map(String::as_str)
            .unwrap_or(DEFAULT_FONT)
    }

    /// Checks every color value and the margin invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (role, value) in &self.colors {
            Color::parse_hex(value).map_err(|message| ConfigError::InvalidColor {
                role: role.clone(),
                value: value.clone(),
                message,
            })?;
        }
        self.margins
            .check_against(self.page_size.dimensions())
            .map_err(ConfigError::InvalidMargins)
    }
}

/// A named hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub url: String,
    pub display: String,
}

/// A single page definition in its wire form: a type tag plus opaque data.
///
/// The data is converted into a typed [`PageData`] by
/// [`ProductConfig::compile_pages`] before anything is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl PageSpec {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }
}

/// Complete product configuration, immutable for the duration of a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub filename: String,
    pub design: DesignSystem,
    pub links: BTreeMap<String, LinkSpec>,
    pub pages: Vec<PageSpec>,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            subtitle: String::new(),
            author: String::new(),
            filename: "output.pdf".to_string(),
            design: DesignSystem::default(),
            links: BTreeMap::new(),
            pages: Vec::new(),
        }
    }
}

impl ProductConfig {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The output filename, always ending in `.pdf`.
    pub fn output_filename(&self) -> String {
        let name = if self.filename.trim().is_empty() {
            "output.pdf"
        } else {
            self.filename.trim()
        };
        if name.to_ascii_lowercase().ends_with(".pdf") {
            name.to_string()
        } else {
            format!("{name}.pdf")
        }
    }

    /// Converts every page spec into typed page data. The first invalid page
    /// aborts the whole conversion.
    pub fn compile_pages(&self) -> Result<Vec<PageData>, ConfigError> {
        self.pages
            .iter()
            .enumerate()
            .map(|(index, spec)| PageData::from_spec(index, spec, &self.links))
            .collect()
    }
}
