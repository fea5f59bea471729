//! Per-code-page text decoding.
//!
//! Decoders exist for the encodings the classifier can actually detect:
//! the Unicode families, US-ASCII, ISO-8859-1/-15, Windows-1252, and the
//! three IA5 national variants. Any other registered page is decoded
//! through the US-ASCII fallback — its label survives, its high half
//! does not.
//!
//! Undecodable input is replaced with `?`. The stabilizer keys off that
//! marker to decide when a line deserves reclassification, so the
//! replacement character is part of the contract, not a cosmetic choice.

use crate::codepage::CodePage;

/// The replacement character substituted for undecodable input.
pub const REPLACEMENT: char = '?';

/// Decodes a byte-line under the given code page.
///
/// Never fails: bytes that have no mapping under `code_page` come back
/// as [`REPLACEMENT`]. Pages without a real decoder fall back to
/// US-ASCII semantics.
#[must_use]
pub fn decode(bytes: &[u8], code_page: CodePage) -> String {
    match code_page {
        CodePage::UTF_8 => decode_utf8(bytes),
        CodePage::UTF_16LE => decode_utf16(bytes, false),
        CodePage::UTF_16BE => decode_utf16(bytes, true),
        CodePage::UTF_32LE => decode_utf32(bytes, false),
        CodePage::UTF_32BE => decode_utf32(bytes, true),
        CodePage::LATIN_1 => decode_latin1(bytes),
        CodePage::LATIN_9 => decode_latin9(bytes),
        CodePage::WINDOWS_1252 => decode_windows1252(bytes),
        CodePage::IA5_GERMAN => decode_ia5(bytes, IA5_GERMAN_MAP),
        CodePage::IA5_SWEDISH => decode_ia5(bytes, IA5_SWEDISH_MAP),
        CodePage::IA5_NORWEGIAN => decode_ia5(bytes, IA5_NORWEGIAN_MAP),
        _ => decode_ascii(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\u{FFFD}', "?")
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> String {
    let mut chunks = bytes.chunks_exact(2);
    let units: Vec<u16> = chunks
        .by_ref()
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    let mut out: String = char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(REPLACEMENT))
        .collect();
    if !chunks.remainder().is_empty() {
        out.push(REPLACEMENT);
    }
    out
}

fn decode_utf32(bytes: &[u8], big_endian: bool) -> String {
    let mut chunks = bytes.chunks_exact(4);
    let mut out = String::with_capacity(bytes.len() / 4);
    for quad in chunks.by_ref() {
        let value = if big_endian {
            u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])
        } else {
            u32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]])
        };
        out.push(char::from_u32(value).unwrap_or(REPLACEMENT));
    }
    if !chunks.remainder().is_empty() {
        out.push(REPLACEMENT);
    }
    out
}

fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b < 0x80 { b as char } else { REPLACEMENT })
        .collect()
}

fn decode_latin1(bytes: &[u8]) -> String {
    // ISO-8859-1 maps every byte directly to U+0000..U+00FF.
    bytes.iter().map(|&b| b as char).collect()
}

/// Positions where ISO-8859-15 departs from ISO-8859-1.
static LATIN_9_DIFF: &[(u8, char)] = &[
    (0xA4, '\u{20AC}'), // euro sign
    (0xA6, '\u{0160}'),
    (0xA8, '\u{0161}'),
    (0xB4, '\u{017D}'),
    (0xB8, '\u{017E}'),
    (0xBC, '\u{0152}'),
    (0xBD, '\u{0153}'),
    (0xBE, '\u{0178}'),
];

fn decode_latin9(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            LATIN_9_DIFF
                .iter()
                .find(|(pos, _)| *pos == b)
                .map_or(b as char, |(_, c)| *c)
        })
        .collect()
}

/// Windows-1252 mappings for `0x80..=0x9F`, the range where 1252 departs
/// from ISO-8859-1. The five undefined positions map to the replacement.
static WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '?', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '?', '\u{017D}', '?', //
    '?', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '?', '\u{017E}', '\u{0178}',
];

fn decode_windows1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => WINDOWS_1252_HIGH[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}

/// IA5 national substitutions: `(ascii byte, national letter)`.
type Ia5Map = &'static [(u8, char)];

/// DIN 66003.
static IA5_GERMAN_MAP: Ia5Map = &[
    (0x40, '\u{00A7}'), // @ -> section sign
    (0x5B, 'Ä'),
    (0x5C, 'Ö'),
    (0x5D, 'Ü'),
    (0x7B, 'ä'),
    (0x7C, 'ö'),
    (0x7D, 'ü'),
    (0x7E, 'ß'),
];

/// SEN 850200.
static IA5_SWEDISH_MAP: Ia5Map = &[
    (0x5B, 'Ä'),
    (0x5C, 'Ö'),
    (0x5D, 'Å'),
    (0x5E, 'Ü'),
    (0x60, 'é'),
    (0x7B, 'ä'),
    (0x7C, 'ö'),
    (0x7D, 'å'),
    (0x7E, 'ü'),
];

/// NS 4551-1.
static IA5_NORWEGIAN_MAP: Ia5Map = &[
    (0x5B, 'Æ'),
    (0x5C, 'Ø'),
    (0x5D, 'Å'),
    (0x7B, 'æ'),
    (0x7C, 'ø'),
    (0x7D, 'å'),
];

fn decode_ia5(bytes: &[u8], map: Ia5Map) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b >= 0x80 {
                REPLACEMENT
            } else {
                map.iter()
                    .find(|(pos, _)| *pos == b)
                    .map_or(b as char, |(_, c)| *c)
            }
        })
        .collect()
}
