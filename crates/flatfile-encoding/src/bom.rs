//! Byte-order-mark recognition.

use crate::codepage::CodePage;

/// How many leading bytes the loader peeks when looking for a BOM.
pub const BOM_PEEK_LEN: usize = 10;

/// Recognizes a Unicode byte-order mark at the head of `bytes`.
///
/// Returns the encoding the mark names and the mark's length in bytes.
/// UTF-32 is tested before UTF-16 because the UTF-32 LE mark begins
/// with the UTF-16 LE mark.
#[must_use]
pub fn sniff_bom(bytes: &[u8]) -> Option<(CodePage, usize)> {
    if bytes.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        return Some((CodePage::UTF_32LE, 4));
    }
    if bytes.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        return Some((CodePage::UTF_32BE, 4));
    }
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some((CodePage::UTF_8, 3));
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Some((CodePage::UTF_16LE, 2));
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Some((CodePage::UTF_16BE, 2));
    }
    None
}
