//! Decoding with encoding stabilization.
//!
//! [`load_lines`] decodes a whole buffer line by line. Each pass decodes
//! under a running default encoding, reclassifies any line that decoded
//! lossily, and may promote a newly detected code page to the default
//! for the rest of the pass. Because a promotion changes every later
//! per-line decision, a single pass can settle on a mix of encodings;
//! the retry loop then replays the buffer once per code page observed in
//! a conflicted pass and keeps the most internally consistent result.

use std::collections::VecDeque;

use crate::bom::{sniff_bom, BOM_PEEK_LEN};
use crate::classify::{classify, Verdict};
use crate::codepage::CodePage;
use crate::decode::{decode, REPLACEMENT};
use crate::split::split_lines;

/// A decoded line together with the code page that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// The decoded text, terminator stripped.
    pub text: String,
    /// The code page actually used to decode this line.
    pub code_page: CodePage,
}

/// The stabilized result of [`load_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Decoded lines in buffer order.
    pub lines: Vec<TextLine>,
    /// The dominant code page of the selected pass.
    pub encoding: CodePage,
}

/// Per-pass code-page usage, in first-use order.
///
/// First-use ordering makes dominant selection deterministic when two
/// pages tie on count.
#[derive(Debug, Default)]
struct Histogram {
    counts: Vec<(CodePage, usize)>,
}

impl Histogram {
    fn bump(&mut self, cp: CodePage) {
        match self.counts.iter_mut().find(|(page, _)| *page == cp) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((cp, 1)),
        }
    }

    fn count(&self, cp: CodePage) -> usize {
        self.counts
            .iter()
            .find(|(page, _)| *page == cp)
            .map_or(0, |(_, n)| *n)
    }

    fn max_count(&self) -> usize {
        self.counts.iter().map(|(_, n)| *n).max().unwrap_or(0)
    }

    fn dominant(&self) -> Option<CodePage> {
        let max = self.max_count();
        self.counts
            .iter()
            .find(|(_, n)| *n == max)
            .map(|(cp, _)| *cp)
    }

    fn pages(&self) -> impl Iterator<Item = CodePage> + '_ {
        self.counts.iter().map(|(cp, _)| *cp)
    }

    fn len(&self) -> usize {
        self.counts.len()
    }
}

#[derive(Debug)]
struct Pass {
    start: Option<CodePage>,
    lines: Vec<TextLine>,
    histogram: Histogram,
}

/// Decodes a buffer into text lines, stabilizing on a dominant encoding.
///
/// `default` seeds the first pass; when absent, the head of the buffer
/// is checked for a BOM and the first line otherwise falls back to
/// UTF-8. With `retry_on_conflict`, every code page observed in a
/// mixed-encoding pass is tried as a starting default of its own, and
/// the pass with the highest dominant per-line count wins (earliest
/// pass on ties).
///
/// For an empty buffer the outcome has no lines and reports the caller's
/// default, the BOM encoding, or UTF-8, in that order of preference.
#[must_use]
pub fn load_lines(
    bytes: &[u8],
    default: Option<CodePage>,
    retry_on_conflict: bool,
) -> LoadOutcome {
    let byte_lines = split_lines(bytes);
    let bom = sniff_bom(&bytes[..bytes.len().min(BOM_PEEK_LEN)]);

    let mut to_check: VecDeque<Option<CodePage>> = VecDeque::new();
    to_check.push_back(default);
    let mut passes: Vec<Pass> = Vec::new();

    while let Some(start) = to_check.pop_front() {
        if passes.iter().any(|p| p.start == start) {
            continue;
        }
        let pass = run_pass(&byte_lines, bom, start);
        tracing::debug!(
            start = start.map(|cp| cp.id()),
            pages = pass.histogram.len(),
            dominant = pass.histogram.max_count(),
            "decode pass finished"
        );
        if retry_on_conflict && pass.histogram.len() > 1 {
            for cp in pass.histogram.pages() {
                let candidate = Some(cp);
                if !passes.iter().any(|p| p.start == candidate)
                    && !to_check.contains(&candidate)
                {
                    to_check.push_back(candidate);
                }
            }
        }
        passes.push(pass);
    }

    // Select the pass whose dominant code page covers the most lines;
    // the earliest pass wins ties, so the caller's own default is
    // preferred when retries cannot improve on it.
    let mut best = 0;
    for (i, pass) in passes.iter().enumerate() {
        if pass.histogram.max_count() > passes[best].histogram.max_count() {
            best = i;
        }
    }
    let selected = passes.swap_remove(best);
    let encoding = selected
        .histogram
        .dominant()
        .or(default)
        .or(bom.map(|(cp, _)| cp))
        .unwrap_or(CodePage::UTF_8);
    LoadOutcome {
        lines: selected.lines,
        encoding,
    }
}

fn run_pass(byte_lines: &[&[u8]], bom: Option<(CodePage, usize)>, start: Option<CodePage>) -> Pass {
    let mut default = start;
    let mut strip = 0;
    if let Some((cp, len)) = bom {
        // The mark is metadata, not content, so it is stripped in every
        // pass; only the no-default pass also adopts its encoding.
        strip = len;
        if default.is_none() {
            default = Some(cp);
        }
    }

    let mut lines = Vec::with_capacity(byte_lines.len());
    let mut histogram = Histogram::default();

    for (idx, &raw) in byte_lines.iter().enumerate() {
        let raw: &[u8] = if idx == 0 && strip <= raw.len() {
            &raw[strip..]
        } else {
            raw
        };
        let effective = default.unwrap_or(CodePage::UTF_8);
        let mut text = decode(raw, effective);
        let mut used = effective;

        if default.is_none() || text.contains(REPLACEMENT) {
            let classification = classify(raw, Some(effective));
            if matches!(
                classification.verdict,
                Verdict::Confirmed | Verdict::Inconclusive
            ) {
                if let Some(detected) = classification.detected {
                    if detected != effective {
                        text = decode(raw, detected);
                        used = detected;
                        let seen = histogram.count(detected) + 1;
                        if default.is_none() || seen >= histogram.max_count() {
                            tracing::debug!(
                                line = idx,
                                code_page = %detected,
                                "promoted new default encoding"
                            );
                            default = Some(detected);
                        }
                    }
                }
            }
        }

        histogram.bump(used);
        lines.push(TextLine {
            text,
            code_page: used,
        });
    }

    Pass {
        start,
        lines,
        histogram,
    }
}
