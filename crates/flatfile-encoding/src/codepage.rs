//! Numeric code-page identities and the lazily initialized page registry.
//!
//! The classifier names encodings by their legacy Windows / IANA code-page
//! number. Only a handful of pages have real decoders in [`crate::decode`];
//! the rest are *labels* — ASCII-compatible legacy pages the classifier may
//! confirm as an assumption without ever decoding their high half. The
//! registry that backs the label set is a process-wide [`LazyLock`] static,
//! initialized once and idempotently.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// A character encoding identified by its numeric code page.
///
/// The numeric space is the IANA / legacy Windows code-page namespace
/// (e.g. `65001` is UTF-8, `1252` is Windows-1252).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePage(u32);

impl CodePage {
    /// UTF-32, little-endian.
    pub const UTF_32LE: CodePage = CodePage(12000);
    /// UTF-32, big-endian.
    pub const UTF_32BE: CodePage = CodePage(12001);
    /// UTF-16, little-endian.
    pub const UTF_16LE: CodePage = CodePage(1200);
    /// UTF-16, big-endian.
    pub const UTF_16BE: CodePage = CodePage(1201);
    /// UTF-8.
    pub const UTF_8: CodePage = CodePage(65001);
    /// US-ASCII (7-bit).
    pub const US_ASCII: CodePage = CodePage(20127);
    /// Windows-1252 (Western European).
    pub const WINDOWS_1252: CodePage = CodePage(1252);
    /// ISO-8859-1 (Latin-1).
    pub const LATIN_1: CodePage = CodePage(28591);
    /// ISO-8859-15 (Latin-9, the Euro revision of Latin-1).
    pub const LATIN_9: CodePage = CodePage(28605);
    /// IA5 German (DIN 66003), a 7-bit national ISO 646 variant.
    pub const IA5_GERMAN: CodePage = CodePage(20106);
    /// IA5 Swedish (SEN 850200), a 7-bit national ISO 646 variant.
    pub const IA5_SWEDISH: CodePage = CodePage(20107);
    /// IA5 Norwegian (NS 4551-1), a 7-bit national ISO 646 variant.
    pub const IA5_NORWEGIAN: CodePage = CodePage(20108);

    /// Creates a code page from its numeric identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric code-page identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns `true` for the multi-byte Unicode families (UTF-16 and
    /// UTF-32, either byte order).
    #[must_use]
    pub const fn is_multi_byte_unicode(self) -> bool {
        matches!(self.0, 1200 | 1201 | 12000 | 12001)
    }

    /// Returns `true` if this page is registered as ASCII-compatible:
    /// bytes below 128 decode as ASCII, whatever the high half holds.
    ///
    /// UTF-8 and US-ASCII themselves are part of the set; the multi-byte
    /// Unicode families are not.
    #[must_use]
    pub fn is_ascii_compatible(self) -> bool {
        !self.is_multi_byte_unicode() && registry().contains_key(&self.0)
    }

    /// Returns the registered display name, if this page is known.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        registry().get(&self.0).copied()
    }

    /// Looks a code page up by its registered name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTERED_PAGES
            .iter()
            .find(|(_, label)| label.eq_ignore_ascii_case(name.trim()))
            .map(|(id, _)| Self(*id))
    }
}

impl fmt::Display for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "cp{}", self.0),
        }
    }
}

/// Known code pages, keyed by numeric identifier.
///
/// Everything except the four multi-byte Unicode entries is
/// ASCII-compatible. The table is the complete set of pages the
/// classifier may *name*; only the subset in [`crate::decode`] is
/// actually decodable.
static REGISTERED_PAGES: &[(u32, &str)] = &[
    // Unicode
    (1200, "utf-16le"),
    (1201, "utf-16be"),
    (12000, "utf-32le"),
    (12001, "utf-32be"),
    (65001, "utf-8"),
    // 7-bit
    (20105, "ia5-irv"),
    (20106, "ia5-german"),
    (20107, "ia5-swedish"),
    (20108, "ia5-norwegian"),
    (20127, "us-ascii"),
    // DOS OEM
    (437, "ibm437"),
    (720, "dos-720"),
    (737, "ibm737"),
    (775, "ibm775"),
    (850, "ibm850"),
    (852, "ibm852"),
    (855, "ibm855"),
    (857, "ibm857"),
    (858, "ibm858"),
    (860, "ibm860"),
    (861, "ibm861"),
    (862, "dos-862"),
    (863, "ibm863"),
    (864, "ibm864"),
    (865, "ibm865"),
    (866, "cp866"),
    (869, "ibm869"),
    // Windows
    (874, "windows-874"),
    (1250, "windows-1250"),
    (1251, "windows-1251"),
    (1252, "windows-1252"),
    (1253, "windows-1253"),
    (1254, "windows-1254"),
    (1255, "windows-1255"),
    (1256, "windows-1256"),
    (1257, "windows-1257"),
    (1258, "windows-1258"),
    // Macintosh
    (10000, "macintosh"),
    (10004, "x-mac-arabic"),
    (10005, "x-mac-hebrew"),
    (10006, "x-mac-greek"),
    (10007, "x-mac-cyrillic"),
    (10010, "x-mac-romanian"),
    (10017, "x-mac-ukrainian"),
    (10021, "x-mac-thai"),
    (10029, "x-mac-ce"),
    (10079, "x-mac-icelandic"),
    (10081, "x-mac-turkish"),
    (10082, "x-mac-croatian"),
    // ISO-8859
    (28591, "iso-8859-1"),
    (28592, "iso-8859-2"),
    (28593, "iso-8859-3"),
    (28594, "iso-8859-4"),
    (28595, "iso-8859-5"),
    (28596, "iso-8859-6"),
    (28597, "iso-8859-7"),
    (28598, "iso-8859-8"),
    (28599, "iso-8859-9"),
    (28603, "iso-8859-13"),
    (28605, "iso-8859-15"),
    // KOI8
    (20866, "koi8-r"),
    (21866, "koi8-u"),
];

static REGISTRY: LazyLock<HashMap<u32, &'static str>> =
    LazyLock::new(|| REGISTERED_PAGES.iter().copied().collect());

fn registry() -> &'static HashMap<u32, &'static str> {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_byte_unicode_flags() {
        assert!(CodePage::UTF_16LE.is_multi_byte_unicode());
        assert!(CodePage::UTF_32BE.is_multi_byte_unicode());
        assert!(!CodePage::UTF_8.is_multi_byte_unicode());
        assert!(!CodePage::WINDOWS_1252.is_multi_byte_unicode());
    }

    #[test]
    fn test_ascii_compatible_set() {
        assert!(CodePage::UTF_8.is_ascii_compatible());
        assert!(CodePage::US_ASCII.is_ascii_compatible());
        assert!(CodePage::new(437).is_ascii_compatible());
        assert!(CodePage::new(20866).is_ascii_compatible());
        assert!(!CodePage::UTF_16LE.is_ascii_compatible());
        assert!(!CodePage::new(54936).is_ascii_compatible());
    }

    #[test]
    fn test_display_uses_registered_name() {
        assert_eq!(CodePage::LATIN_1.to_string(), "iso-8859-1");
        assert_eq!(CodePage::new(99999).to_string(), "cp99999");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            CodePage::from_name("ISO-8859-1"),
            Some(CodePage::LATIN_1)
        );
        assert_eq!(
            CodePage::from_name(" utf-8 "),
            Some(CodePage::UTF_8)
        );
        assert_eq!(CodePage::from_name("klingon"), None);
    }

    #[test]
    fn test_registry_is_idempotent() {
        // Two lookups observe the same lazily built table.
        let a = CodePage::WINDOWS_1252.name();
        let b = CodePage::WINDOWS_1252.name();
        assert_eq!(a, Some("windows-1252"));
        assert_eq!(a, b);
    }
}
