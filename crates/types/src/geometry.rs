use serde::{Deserialize, Serialize};

/// Points per inch in page space.
pub const INCH: f32 = 72.0;

/// An axis-aligned rectangle in page space (origin bottom-left, y up).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The closed set of supported page sizes.
///
/// Unrecognized identifiers fall back to [`PageSize::Letter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "a4" => PageSize::A4,
            _ => PageSize::Letter,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::Letter => "letter",
            PageSize::A4 => "a4",
        }
    }

    pub fn dimensions(self) -> Size {
        match self {
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::A4 => Size::new(595.2756, 841.8898),
        }
    }
}

impl From<String> for PageSize {
    fn from(value: String) -> Self {
        PageSize::from_name(&value)
    }
}

impl From<PageSize> for String {
    fn from(value: PageSize) -> Self {
        value.name().to_string()
    }
}

/// Page margins in points. Missing keys fall back individually.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 90.0,
            right: 90.0,
            top: 80.0,
            bottom: 60.0,
        }
    }
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    /// Returns a description of the first violated constraint, if any.
    ///
    /// Each margin must be non-negative and strictly smaller than half the
    /// page dimension it eats into.
    pub fn check_against(&self, page: Size) -> Result<(), String> {
        let checks = [
            ("left", self.left, page.width),
            ("right", self.right, page.width),
            ("top", self.top, page.height),
            ("bottom", self.bottom, page.height),
        ];
        for (side, value, extent) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{side} margin {value} must be a non-negative number"));
            }
            if value >= extent / 2.0 {
                return Err(format!(
                    "{side} margin {value} must be smaller than half the page dimension ({:.2})",
                    extent / 2.0
                ));
            }
        }
        Ok(())
    }
}
