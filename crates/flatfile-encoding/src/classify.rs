//! Staged encoding classification.
//!
//! Given a byte buffer and an optional assumed encoding, ranks the
//! candidate encodings and answers with a tri-state verdict:
//!
//! - **Stage A** looks for the UTF-32 Western-Latin quadruple patterns.
//! - **Stage B** looks for the UTF-16 pair patterns.
//! - **Stage C** walks the buffer once, validating UTF-8 and counting
//!   the byte classes the single-byte decision rules need.
//!
//! The verdict is deliberately three-valued. *Inconclusive* is what lets
//! the decoder keep a caller's hint alive when the evidence cannot rule
//! it out, and collapsing it into either of the other two values breaks
//! the stabilization loop downstream.

use std::fmt;

use crate::codepage::CodePage;

/// Outcome of matching detection evidence against an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Detection matches the assumption, or there was no assumption and
    /// the evidence is sufficient on its own.
    Confirmed,
    /// Detection is incompatible with the assumption, or nothing fits.
    Rejected,
    /// Something was detected but the assumption cannot be ruled out,
    /// or vice versa.
    Inconclusive,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Confirmed => "confirmed",
            Verdict::Rejected => "rejected",
            Verdict::Inconclusive => "inconclusive",
        };
        f.write_str(s)
    }
}

/// A classification verdict plus the best-guess encoding.
///
/// `detected` may be `None` only when the verdict is
/// [`Verdict::Rejected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The tri-state verdict.
    pub verdict: Verdict,
    /// The best-guess encoding, if any evidence fit.
    pub detected: Option<CodePage>,
}

impl Classification {
    fn new(verdict: Verdict, detected: Option<CodePage>) -> Self {
        Self { verdict, detected }
    }
}

/// Classifies a byte buffer against an optional assumed encoding.
///
/// See the module docs for the staging; the decision rules follow the
/// order: multi-byte Unicode patterns, valid UTF-8, 7-bit (IA5 variants,
/// then the ASCII-compatible label set, then US-ASCII), then the
/// Latin-1 / Latin-9 / Windows-1252 family, then rejection.
#[must_use]
pub fn classify(bytes: &[u8], assumed: Option<CodePage>) -> Classification {
    // Stage A: UTF-32 quadruple patterns.
    let mut wide = if bytes.len() % 4 == 0 {
        scan_utf32(bytes)
    } else {
        None
    };

    // Stage B: UTF-16 pair patterns, unless Stage A already decided and
    // the assumption is not itself UTF-16.
    let utf16_assumed = matches!(
        assumed,
        Some(CodePage::UTF_16LE) | Some(CodePage::UTF_16BE)
    );
    if bytes.len() % 2 == 0 && (wide.is_none() || utf16_assumed) {
        if let Some(cp) = scan_utf16(bytes) {
            wide = Some(cp);
        }
    }

    if let Some(cp) = wide {
        if assumed.is_none() || assumed == Some(cp) {
            return Classification::new(Verdict::Confirmed, Some(cp));
        }
        // A conflicting multi-byte assumption cannot be rescued by the
        // byte scan; recoding between multi-byte families is unsupported.
        if assumed.is_some_and(CodePage::is_multi_byte_unicode) {
            return Classification::new(Verdict::Rejected, Some(cp));
        }
    }

    // Stage C: single-pass byte scan.
    let scan = ByteScan::run(bytes);
    if let Some(outcome) = decide_from_scan(&scan, assumed) {
        return outcome;
    }

    // Post-stage reconciliation: a surviving Stage A/B detection against
    // a different single-byte assumption.
    if let Some(cp) = wide {
        return Classification::new(Verdict::Rejected, Some(cp));
    }

    tracing::debug!(
        latin1 = scan.latin1,
        latin9 = scan.latin9,
        win1252 = scan.win1252,
        ibm437 = scan.ibm437,
        asmo708 = scan.asmo708,
        "no classification fits"
    );
    Classification::new(Verdict::Rejected, None)
}

fn scan_utf32(bytes: &[u8]) -> Option<CodePage> {
    let mut le = 0usize;
    let mut be = 0usize;
    let mut other = 0usize;
    for quad in bytes.chunks_exact(4) {
        if quad[0] != 0 && quad[1] == 0 && quad[2] == 0 && quad[3] == 0 {
            le += 1;
        } else if quad[0] == 0 && quad[1] == 0 && quad[2] == 0 && quad[3] != 0 {
            be += 1;
        } else {
            other += 1;
        }
    }
    if le > other && be == 0 {
        Some(CodePage::UTF_32LE)
    } else if be > other && le == 0 {
        Some(CodePage::UTF_32BE)
    } else {
        None
    }
}

fn scan_utf16(bytes: &[u8]) -> Option<CodePage> {
    let mut le = 0usize;
    let mut be = 0usize;
    let mut other = 0usize;
    for pair in bytes.chunks_exact(2) {
        if pair[0] != 0 && pair[1] == 0 {
            le += 1;
        } else if pair[0] == 0 && pair[1] != 0 {
            be += 1;
        } else {
            other += 1;
        }
    }
    if le > other && be == 0 {
        Some(CodePage::UTF_16LE)
    } else if be > other && le == 0 {
        Some(CodePage::UTF_16BE)
    } else {
        None
    }
}

/// UTF-8 validity as observed so far: unknown until a multi-byte
/// sequence completes, invalid forever after the first violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Utf8State {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

/// Counters accumulated by the Stage C byte walk.
#[derive(Debug, Default)]
struct ByteScan {
    seven_bit: bool,
    utf8: Utf8State,
    pending_continuations: u8,
    ascii_control: usize,
    ascii_other: usize,
    ia5_german: usize,
    ia5_swedish: usize,
    ia5_norwegian: usize,
    bracket_balance: i64,
    brace_balance: i64,
    ibm437: usize,
    asmo708: usize,
    latin1: usize,
    latin9: usize,
    win1252: usize,
}

impl ByteScan {
    fn run(bytes: &[u8]) -> Self {
        let mut scan = ByteScan {
            seven_bit: true,
            ..ByteScan::default()
        };
        for &b in bytes {
            if b >= 0x80 {
                scan.high_byte(b);
            } else {
                scan.low_byte(b);
            }
        }
        // A dangling lead sequence at end of buffer is a violation.
        if scan.pending_continuations > 0 && scan.utf8 != Utf8State::Invalid {
            scan.utf8 = Utf8State::Invalid;
        }
        scan
    }

    fn low_byte(&mut self, b: u8) {
        if self.pending_continuations > 0 {
            self.utf8 = Utf8State::Invalid;
            self.pending_continuations = 0;
        }
        if (b < 0x20 && b != b'\t') || b == 0x7F {
            self.ascii_control += 1;
        } else {
            self.ascii_other += 1;
        }
        match b {
            b'[' => self.bracket_balance += 1,
            b']' => self.bracket_balance -= 1,
            b'{' => self.brace_balance += 1,
            b'}' => self.brace_balance -= 1,
            _ => {}
        }
        if matches!(b, b'@' | b'[' | b'\\' | b']' | b'{' | b'|' | b'}' | b'~') {
            self.ia5_german += 1;
        }
        if matches!(b, b'[' | b'\\' | b']' | b'^' | b'`' | b'{' | b'|' | b'}' | b'~') {
            self.ia5_swedish += 1;
        }
        if matches!(b, b'[' | b'\\' | b']' | b'{' | b'|' | b'}') {
            self.ia5_norwegian += 1;
        }
    }

    fn high_byte(&mut self, b: u8) {
        self.seven_bit = false;
        if self.utf8 != Utf8State::Invalid {
            if self.pending_continuations > 0 {
                if (0x80..=0xBF).contains(&b) {
                    self.pending_continuations -= 1;
                    if self.pending_continuations == 0 {
                        self.utf8 = Utf8State::Valid;
                    }
                } else {
                    self.utf8 = Utf8State::Invalid;
                    self.pending_continuations = 0;
                }
            } else {
                match b {
                    0x80..=0xBF => self.utf8 = Utf8State::Invalid,
                    0xC0..=0xDF => self.pending_continuations = 1,
                    0xE0..=0xEF => self.pending_continuations = 2,
                    0xF0..=0xF7 => self.pending_continuations = 3,
                    _ => self.utf8 = Utf8State::Invalid,
                }
            }
        }
        // IBM-437 accented-letter region.
        if (0x80..=0xA5).contains(&b) {
            self.ibm437 += 1;
        }
        // ASMO-708 Arabic letter regions.
        if (0xC1..=0xDA).contains(&b) || (0xE0..=0xF2).contains(&b) {
            self.asmo708 += 1;
        }
        // ISO-8859-1 defined high characters.
        if b >= 0xA0 {
            self.latin1 += 1;
        }
        // ISO-8859-15 positions that differ from ISO-8859-1.
        if matches!(b, 0xA4 | 0xA6 | 0xA8 | 0xB4 | 0xB8 | 0xBC | 0xBD | 0xBE) {
            self.latin9 += 1;
        }
        // Defined in Windows-1252 but not in ISO-8859-1/-15.
        if (0x80..=0x9F).contains(&b) && !matches!(b, 0x81 | 0x8D | 0x8F | 0x90 | 0x9D) {
            self.win1252 += 1;
        }
    }

    /// The ASCII plausibility rule: almost no control characters, and
    /// printable characters clearly outnumbering them.
    fn ascii_rule(&self) -> bool {
        self.ascii_control < 2 && self.ascii_other >= self.ascii_control * 4
    }
}

fn decide_from_scan(scan: &ByteScan, assumed: Option<CodePage>) -> Option<Classification> {
    let rule = scan.ascii_rule();
    let graded = |detected: CodePage| {
        let verdict = if rule {
            Verdict::Confirmed
        } else {
            Verdict::Inconclusive
        };
        Classification::new(verdict, Some(detected))
    };

    // Rule 1: cleanly validated UTF-8.
    if scan.utf8 == Utf8State::Valid {
        let verdict = match assumed {
            None | Some(CodePage::UTF_8) => Verdict::Confirmed,
            Some(_) => Verdict::Inconclusive,
        };
        return Some(Classification::new(verdict, Some(CodePage::UTF_8)));
    }

    // Rule 2: pure 7-bit content.
    if scan.seven_bit {
        if let Some(a) = assumed {
            let ia5_letters = match a {
                CodePage::IA5_GERMAN => Some(scan.ia5_german),
                CodePage::IA5_SWEDISH => Some(scan.ia5_swedish),
                CodePage::IA5_NORWEGIAN => Some(scan.ia5_norwegian),
                _ => None,
            };
            if let Some(letters) = ia5_letters {
                if letters > 0 {
                    return Some(graded(a));
                }
            }
        } else if scan.bracket_balance.abs() > 2 || scan.brace_balance.abs() > 2 {
            if let Some(variant) = infer_ia5_variant(scan) {
                return Some(graded(variant));
            }
        }
        if let Some(a) = assumed {
            if a.is_ascii_compatible() {
                return Some(graded(a));
            }
        }
        let verdict = if rule && assumed.is_none() {
            Verdict::Confirmed
        } else {
            Verdict::Inconclusive
        };
        return Some(Classification::new(verdict, Some(CodePage::US_ASCII)));
    }

    // Rule 3: the Latin-1 / Latin-9 / Windows-1252 family.
    if scan.latin1 > 0 && rule {
        let family = if scan.win1252 == 0 && scan.latin9 == 0 {
            (
                CodePage::LATIN_1,
                [
                    Some(CodePage::WINDOWS_1252),
                    Some(CodePage::LATIN_1),
                    Some(CodePage::LATIN_9),
                ],
            )
        } else if scan.latin9 > 0 && scan.win1252 == 0 {
            (
                CodePage::LATIN_9,
                [Some(CodePage::WINDOWS_1252), Some(CodePage::LATIN_9), None],
            )
        } else {
            (CodePage::WINDOWS_1252, [Some(CodePage::WINDOWS_1252), None, None])
        };
        let (fallback, acceptable) = family;
        let outcome = match assumed {
            Some(a) if acceptable.contains(&Some(a)) => {
                Classification::new(Verdict::Confirmed, Some(a))
            }
            None => Classification::new(Verdict::Confirmed, Some(fallback)),
            Some(_) => Classification::new(Verdict::Inconclusive, Some(fallback)),
        };
        return Some(outcome);
    }

    None
}

/// Picks the IA5 national variant suggested by the potential-letter
/// scores. Ties go to Norwegian; German must strictly dominate; Swedish
/// is the remaining positive case.
fn infer_ia5_variant(scan: &ByteScan) -> Option<CodePage> {
    let (nor, ger, swe) = (scan.ia5_norwegian, scan.ia5_german, scan.ia5_swedish);
    if nor > 0 && nor >= ger && nor >= swe {
        Some(CodePage::IA5_NORWEGIAN)
    } else if ger > 0 && ger > nor && ger > swe {
        Some(CodePage::IA5_GERMAN)
    } else if swe > 0 {
        Some(CodePage::IA5_SWEDISH)
    } else {
        None
    }
}
