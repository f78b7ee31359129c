//! The standard PDF Type1 faces and their AFM advance widths.
//!
//! Widths are in thousandths of an em, indexed by WinAnsi code. Accented
//! Latin-1 letters share the width of their base letter; oblique faces share
//! the widths of their upright counterparts.

/// Widths for codes 0x20..=0x7E.
type AsciiWidths = [u16; 95];

#[rustfmt::skip]
const HELVETICA: AsciiWidths = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: AsciiWidths = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: AsciiWidths = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: AsciiWidths = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC: AsciiWidths = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

/// Widths for the typographic characters of the 0x80..=0x9F block.
#[derive(Debug, Clone, Copy)]
struct Punctuation {
    single_quote: u16,
    double_quote: u16,
    bullet: u16,
    en_dash: u16,
    em_dash: u16,
    ellipsis: u16,
    euro: u16,
    /// Width of any glyph without a dedicated entry.
    other: u16,
}

const HELVETICA_PUNCT: Punctuation = Punctuation {
    single_quote: 222,
    double_quote: 333,
    bullet: 350,
    en_dash: 556,
    em_dash: 1000,
    ellipsis: 1000,
    euro: 556,
    other: 556,
};

const HELVETICA_BOLD_PUNCT: Punctuation = Punctuation {
    single_quote: 278,
    double_quote: 500,
    bullet: 350,
    en_dash: 556,
    em_dash: 1000,
    ellipsis: 1000,
    euro: 556,
    other: 611,
};

const TIMES_ROMAN_PUNCT: Punctuation = Punctuation {
    single_quote: 333,
    double_quote: 444,
    bullet: 350,
    en_dash: 500,
    em_dash: 1000,
    ellipsis: 1000,
    euro: 500,
    other: 500,
};

const TIMES_BOLD_PUNCT: Punctuation = Punctuation {
    single_quote: 333,
    double_quote: 500,
    bullet: 350,
    en_dash: 500,
    em_dash: 1000,
    ellipsis: 1000,
    euro: 500,
    other: 500,
};

const TIMES_ITALIC_PUNCT: Punctuation = Punctuation {
    single_quote: 333,
    double_quote: 556,
    bullet: 350,
    en_dash: 500,
    em_dash: 889,
    ellipsis: 889,
    euro: 500,
    other: 500,
};

/// The twelve standard Latin faces every PDF viewer provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    pub const ALL: [StandardFont; 12] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Times" => Some(StandardFont::TimesRoman),
            _ => StandardFont::ALL
                .into_iter()
                .find(|font| font.base_font() == name),
        }
    }

    /// The `/BaseFont` name.
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    fn tables(self) -> Option<(&'static AsciiWidths, Punctuation)> {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => {
                Some((&HELVETICA, HELVETICA_PUNCT))
            }
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                Some((&HELVETICA_BOLD, HELVETICA_BOLD_PUNCT))
            }
            StandardFont::TimesRoman => Some((&TIMES_ROMAN, TIMES_ROMAN_PUNCT)),
            // Bold italic is measured with the upright bold widths.
            StandardFont::TimesBold | StandardFont::TimesBoldItalic => {
                Some((&TIMES_BOLD, TIMES_BOLD_PUNCT))
            }
            StandardFont::TimesItalic => Some((&TIMES_ITALIC, TIMES_ITALIC_PUNCT)),
            _ => None,
        }
    }

    /// Advance width of a WinAnsi code in thousandths of an em.
    pub fn width(self, code: u8) -> u16 {
        let Some((ascii, punct)) = self.tables() else {
            // Courier is monospaced.
            return 600;
        };
        let code = match code {
            0xA0 => b' ',
            _ => latin1_base_letter(code).unwrap_or(code),
        };
        match code {
            0x20..=0x7E => ascii[(code - 0x20) as usize],
            0x91 | 0x92 | 0x82 | 0x8B | 0x9B => punct.single_quote,
            0x93 | 0x94 | 0x84 => punct.double_quote,
            0x95 => punct.bullet,
            0x96 => punct.en_dash,
            0x97 => punct.em_dash,
            0x85 => punct.ellipsis,
            0x80 => punct.euro,
            _ => punct.other,
        }
    }
}

/// Maps accented Latin-1 letters to the ASCII letter they are built on.
fn latin1_base_letter(code: u8) -> Option<u8> {
    let base = match code {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD1 => b'N',
        0xD2..=0xD6 | 0xD8 => b'O',
        0xD9..=0xDC => b'U',
        0xDD => b'Y',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xEC..=0xEF => b'i',
        0xF1 => b'n',
        0xF2..=0xF6 | 0xF8 => b'o',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        0x8A => b'S',
        0x9A => b's',
        0x8E => b'Z',
        0x9E => b'z',
        0x9F => b'Y',
        _ => return None,
    };
    Some(base)
}
