//! WinAnsiEncoding, the single-byte encoding every font in a document uses.

/// Code points of the 0x80..=0x9F block that differ from Latin-1.
const HIGH_BLOCK: [(u8, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Encodes a single character, or `None` when WinAnsi has no slot for it.
pub fn encode_char(c: char) -> Option<u8> {
    match c {
        '\t' => Some(b' '),
        ' '..='~' => Some(c as u8),
        '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        _ => HIGH_BLOCK
            .iter()
            .find(|(_, mapped)| *mapped == c)
            .map(|(code, _)| *code),
    }
}

/// Decodes a WinAnsi byte back to its character.
pub fn decode_byte(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        _ => HIGH_BLOCK
            .iter()
            .find(|(mapped, _)| *mapped == code)
            .map(|(_, c)| *c),
    }
}

/// Encodes a string, replacing anything outside the encoding with `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| encode_char(c).unwrap_or(b'?')).collect()
}
