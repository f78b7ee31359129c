//! Font faces and the font library.
//!
//! A font identifier used by a design resolves to one of:
//! 1. a TrueType face registered in the [`FontLibrary`],
//! 2. one of the standard PDF faces,
//! 3. a substitute from the fallback table (or Helvetica), reported as a
//!    [`FontSubstitution`].
//!
//! The library is an explicitly owned handle. Clones share the same registry,
//! so concurrent builds can hold one library and race on first registration
//! safely: registration is "insert or no-op" under a write lock.

use crate::encoding::{decode_byte, to_win_ansi};
use crate::error::FontError;
use crate::standard::StandardFont;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Logical font names shipped as files in the font directory.
pub const BUNDLED_FONTS: [(&str, &str); 4] = [
    ("Italiana", "Italiana-Regular.ttf"),
    ("CrimsonPro", "CrimsonPro-Regular.ttf"),
    ("CrimsonProItalic", "CrimsonPro-Italic.ttf"),
    ("DMMono", "DMMono-Regular.ttf"),
];

/// Standard faces substituted for bundled fonts that could not be loaded.
pub const FALLBACK_FONTS: [(&str, StandardFont); 4] = [
    ("Italiana", StandardFont::Helvetica),
    ("CrimsonPro", StandardFont::Helvetica),
    ("CrimsonProItalic", StandardFont::HelveticaOblique),
    ("DMMono", StandardFont::Courier),
];

/// Parsed metrics and raw program of an embeddable TrueType font.
pub struct TrueTypeFace {
    /// Name the face was registered under.
    pub name: String,
    pub postscript_name: String,
    pub data: Arc<Vec<u8>>,
    /// Advance widths in thousandths of an em, indexed by WinAnsi code.
    pub widths: [u16; 256],
    pub ascent: i16,
    pub descent: i16,
    pub cap_height: i16,
    pub bbox: [i16; 4],
    pub italic: bool,
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("name", &self.name)
            .field("postscript_name", &self.postscript_name)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl TrueTypeFace {
    pub fn parse(name: &str, data: Vec<u8>) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| FontError::InvalidData(format!("{name}: {e}")))?;

        let units = face.units_per_em().max(1) as f32;
        let scale = |v: f32| (v * 1000.0 / units).round();

        let notdef = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .unwrap_or(0) as f32;
        let mut widths = [0u16; 256];
        for code in 0x20u8..=0xFF {
            let Some(c) = decode_byte(code) else { continue };
            let advance = face
                .glyph_index(c)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .map(f32::from)
                .unwrap_or(notdef);
            widths[code as usize] = scale(advance) as u16;
        }

        let bounds = face.global_bounding_box();
        let ascent = scale(face.ascender() as f32) as i16;
        let postscript_name = postscript_name(&face).unwrap_or_else(|| name.replace(' ', ""));
        log::debug!("Parsed TrueType font '{}' ({})", name, postscript_name);

        Ok(Self {
            name: name.to_string(),
            postscript_name,
            widths,
            ascent,
            descent: scale(face.descender() as f32) as i16,
            cap_height: face
                .capital_height()
                .map(|h| scale(h as f32) as i16)
                .unwrap_or(ascent),
            bbox: [
                scale(bounds.x_min as f32) as i16,
                scale(bounds.y_min as f32) as i16,
                scale(bounds.x_max as f32) as i16,
                scale(bounds.y_max as f32) as i16,
            ],
            italic: face.is_italic(),
            data: Arc::new(data),
        })
    }
}

/// PostScript name (ID 6), else full name (ID 4), else family (ID 1).
fn postscript_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    [
        ttf_parser::name_id::POST_SCRIPT_NAME,
        ttf_parser::name_id::FULL_NAME,
        ttf_parser::name_id::FAMILY,
    ]
    .into_iter()
    .find_map(|id| {
        face.names()
            .into_iter()
            .find(|n| n.name_id == id)
            .and_then(|n| n.to_string())
    })
    .map(|name| name.replace(' ', ""))
}

/// A resolved font: something that can both measure and be embedded.
#[derive(Debug, Clone)]
pub enum FontFace {
    Standard(StandardFont),
    TrueType(Arc<TrueTypeFace>),
}

impl FontFace {
    pub const HELVETICA: FontFace = FontFace::Standard(StandardFont::Helvetica);
    pub const HELVETICA_BOLD: FontFace = FontFace::Standard(StandardFont::HelveticaBold);

    /// Stable identity of the face inside one document.
    pub fn key(&self) -> &str {
        match self {
            FontFace::Standard(font) => font.base_font(),
            FontFace::TrueType(face) => &face.name,
        }
    }

    pub fn code_width(&self, code: u8) -> u16 {
        match self {
            FontFace::Standard(font) => font.width(code),
            FontFace::TrueType(face) => face.widths[code as usize],
        }
    }

    /// Rendered width of `text` at `size` points.
    pub fn string_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = to_win_ansi(text)
            .into_iter()
            .map(|code| self.code_width(code) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FontFace::Standard(a), FontFace::Standard(b)) => a == b,
            (FontFace::TrueType(a), FontFace::TrueType(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Records that a requested font was replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSubstitution {
    pub requested: String,
    pub used: String,
    pub reason: String,
}

/// The outcome of [`FontLibrary::resolve`].
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub face: FontFace,
    pub substitution: Option<FontSubstitution>,
}

#[derive(Default)]
struct Registry {
    faces: HashMap<String, Arc<TrueTypeFace>>,
    /// Names whose load already failed, with the reason.
    failures: HashMap<String, FontError>,
}

/// Thread-safe registry of TrueType faces keyed by logical name.
#[derive(Clone, Default)]
pub struct FontLibrary {
    registry: Arc<RwLock<Registry>>,
    font_dir: Option<PathBuf>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("font_dir", &self.font_dir)
            .field("registered", &self.registered_names())
            .finish()
    }
}

impl FontLibrary {
    /// Creates an empty library without a font directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library that looks up bundled fonts in `dir`.
    pub fn with_font_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            registry: Arc::default(),
            font_dir: Some(dir.into()),
        }
    }

    pub fn font_dir(&self) -> Option<&Path> {
        self.font_dir.as_deref()
    }

    /// Registers TrueType font bytes under `name`. A name that is already
    /// registered keeps its first face.
    pub fn register_bytes(&self, name: &str, data: Vec<u8>) -> Result<(), FontError> {
        let face = TrueTypeFace::parse(name, data)?;
        self.insert(name, face)
    }

    pub fn register_file(&self, name: &str, path: impl AsRef<Path>) -> Result<(), FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| FontError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.register_bytes(name, data)
    }

    fn insert(&self, name: &str, face: TrueTypeFace) -> Result<(), FontError> {
        let mut registry = self.registry.write().map_err(|_| poisoned(name))?;
        registry.failures.remove(name);
        registry
            .faces
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(face));
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry
            .read()
            .map(|registry| registry.faces.contains_key(name))
            .unwrap_or(false)
    }

    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .registry
            .read()
            .map(|registry| registry.faces.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Makes `name` available if it can be, loading a bundled font file on
    /// first use. Repeated calls are no-ops, including for names that failed.
    ///
    /// Returns whether a TrueType face is registered under `name` afterwards.
    pub fn ensure_registered(&self, name: &str) -> bool {
        if let Ok(registry) = self.registry.read()
            && (registry.faces.contains_key(name) || registry.failures.contains_key(name))
        {
            return registry.faces.contains_key(name);
        }
        if StandardFont::from_name(name).is_some() {
            return false;
        }
        let Some((_, file)) = BUNDLED_FONTS.iter().find(|(logical, _)| *logical == name) else {
            return false;
        };
        let result = match &self.font_dir {
            Some(dir) => self.register_file(name, dir.join(file)),
            None => Err(FontError::NotFound {
                name: name.to_string(),
            }),
        };
        match result {
            Ok(()) => {
                log::debug!("Registered bundled font '{}'", name);
                true
            }
            Err(e) => {
                log::warn!("Bundled font '{}' unavailable: {}", name, e);
                if let Ok(mut registry) = self.registry.write() {
                    registry.failures.entry(name.to_string()).or_insert(e);
                }
                false
            }
        }
    }

    /// Resolves a font identifier without touching the filesystem.
    pub fn resolve(&self, name: &str) -> ResolvedFont {
        let (face, failure) = match self.registry.read() {
            Ok(registry) => (
                registry.faces.get(name).cloned(),
                registry.failures.get(name).cloned(),
            ),
            Err(_) => (None, Some(poisoned(name))),
        };
        if let Some(face) = face {
            return ResolvedFont {
                face: FontFace::TrueType(face),
                substitution: None,
            };
        }
        if let Some(font) = StandardFont::from_name(name) {
            return ResolvedFont {
                face: FontFace::Standard(font),
                substitution: None,
            };
        }

        let fallback = FALLBACK_FONTS
            .iter()
            .find(|(logical, _)| *logical == name)
            .map(|(_, font)| *font)
            .unwrap_or(StandardFont::Helvetica);
        let reason = failure
            .map(|e| e.to_string())
            .unwrap_or_else(|| "font is not registered".to_string());
        log::debug!(
            "Font '{}' resolved to fallback '{}': {}",
            name,
            fallback.base_font(),
            reason
        );
        ResolvedFont {
            face: FontFace::Standard(fallback),
            substitution: Some(FontSubstitution {
                requested: name.to_string(),
                used: fallback.base_font().to_string(),
                reason,
            }),
        }
    }
}

fn poisoned(name: &str) -> FontError {
    FontError::LoadFailed {
        path: name.to_string(),
        message: "font registry lock poisoned".to_string(),
    }
}
