//! Structural line filtering with sentinel-bracketed windows.
//!
//! [`filter`] first resolves the window of candidate lines (explicit
//! indices narrowed by start/end sentinel lines), then judges each line
//! in the window against the structural predicates. Failures are
//! reported through [`FilterOutcome`]; nothing unwinds.

/// Structural predicates and window bounds for [`filter`].
///
/// An empty predicate set with default flags passes every non-blank
/// line through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    /// Exact line that marks the start of the data window; data begins
    /// on the following line.
    pub start_sentinel: Option<String>,
    /// Exact line that marks the end of the data window; data ends on
    /// the preceding line.
    pub end_sentinel: Option<String>,
    /// Drop empty and whitespace-only lines (counted as skipped).
    pub skip_empty: bool,
    /// Require each line to start with this prefix.
    pub required_prefix: Option<String>,
    /// Require each line to contain this substring.
    pub required_substring: Option<String>,
    /// Require each line to end with this suffix.
    pub required_suffix: Option<String>,
    /// Require each line to have exactly this many characters.
    pub required_length: Option<usize>,
    /// First line index considered, 0-based inclusive.
    pub first_index: Option<usize>,
    /// Last line index considered, 0-based inclusive.
    pub last_index: Option<usize>,
    /// Stop at the first structurally failing line instead of skipping
    /// past it.
    pub stop_at_error: bool,
}

impl Default for LineFilter {
    fn default() -> Self {
        Self {
            start_sentinel: None,
            end_sentinel: None,
            skip_empty: true,
            required_prefix: None,
            required_substring: None,
            required_suffix: None,
            required_length: None,
            first_index: None,
            last_index: None,
            stop_at_error: false,
        }
    }
}

impl LineFilter {
    /// Creates the default predicate set (skip blank lines, no window).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start-sentinel line.
    #[must_use]
    pub fn with_start_sentinel(mut self, line: impl Into<String>) -> Self {
        self.start_sentinel = Some(line.into());
        self
    }

    /// Sets the end-sentinel line.
    #[must_use]
    pub fn with_end_sentinel(mut self, line: impl Into<String>) -> Self {
        self.end_sentinel = Some(line.into());
        self
    }

    /// Sets whether blank lines are dropped.
    #[must_use]
    pub fn with_skip_empty(mut self, skip: bool) -> Self {
        self.skip_empty = skip;
        self
    }

    /// Requires a line prefix.
    #[must_use]
    pub fn with_required_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.required_prefix = Some(prefix.into());
        self
    }

    /// Requires a substring.
    #[must_use]
    pub fn with_required_substring(mut self, substring: impl Into<String>) -> Self {
        self.required_substring = Some(substring.into());
        self
    }

    /// Requires a line suffix.
    #[must_use]
    pub fn with_required_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.required_suffix = Some(suffix.into());
        self
    }

    /// Requires an exact line length, in characters.
    #[must_use]
    pub fn with_required_length(mut self, length: usize) -> Self {
        self.required_length = Some(length);
        self
    }

    /// Sets the first line index considered (0-based, inclusive).
    #[must_use]
    pub fn with_first_index(mut self, index: usize) -> Self {
        self.first_index = Some(index);
        self
    }

    /// Sets the last line index considered (0-based, inclusive).
    #[must_use]
    pub fn with_last_index(mut self, index: usize) -> Self {
        self.last_index = Some(index);
        self
    }

    /// Sets whether filtering stops at the first failing line.
    #[must_use]
    pub fn with_stop_at_error(mut self, stop: bool) -> Self {
        self.stop_at_error = stop;
        self
    }

    fn judge(&self, line: &str) -> bool {
        if let Some(len) = self.required_length {
            if line.chars().count() != len {
                return false;
            }
        }
        if let Some(prefix) = &self.required_prefix {
            if !line.starts_with(prefix.as_str()) {
                return false;
            }
        }
        if let Some(substring) = &self.required_substring {
            if !line.contains(substring.as_str()) {
                return false;
            }
        }
        if let Some(suffix) = &self.required_suffix {
            if !line.ends_with(suffix.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Result of a [`filter`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// The selected lines, a subsequence of the input window.
    pub lines: Vec<String>,
    /// `false` when a sentinel was missing, the window was empty, or
    /// any line failed a structural predicate.
    pub is_success: bool,
    /// Lines dropped inside the window (blank lines and structural
    /// failures; on an early stop, the remainder of the window).
    pub skipped: usize,
}

impl FilterOutcome {
    fn failed() -> Self {
        Self {
            lines: Vec::new(),
            is_success: false,
            skipped: 0,
        }
    }
}

/// Applies structural predicates and window bounds to `lines`.
///
/// The output preserves input order and is a subsequence of the
/// resolved window. A missing sentinel or an empty resolved window
/// fails the call with no lines.
#[must_use]
pub fn filter<S: AsRef<str>>(lines: &[S], predicates: &LineFilter) -> FilterOutcome {
    let n = lines.len();
    let mut start = predicates.first_index.unwrap_or(0);

    if let Some(sentinel) = &predicates.start_sentinel {
        let from = start.saturating_sub(1);
        let found = (from..n).find(|&i| lines[i].as_ref() == sentinel.as_str());
        match found {
            // The sentinel may already sit just before the window.
            Some(i) if i >= start => start = i + 1,
            Some(_) => {}
            None => {
                tracing::debug!(sentinel = %sentinel, "start sentinel not found");
                return FilterOutcome::failed();
            }
        }
    }

    let last = n as i64 - 1;
    let mut end = predicates
        .last_index
        .map_or(last, |l| (l as i64).min(last));

    if let Some(sentinel) = &predicates.end_sentinel {
        if let Some(i) = (start..n).find(|&i| lines[i].as_ref() == sentinel.as_str()) {
            if (i as i64) <= end {
                end = i as i64 - 1;
            }
        }
    }

    if end < start as i64 {
        tracing::debug!(start, end, "empty filter window");
        return FilterOutcome::failed();
    }
    let end = end as usize;

    let mut selected = Vec::new();
    let mut skipped = 0;
    let mut is_success = true;
    for i in start..=end {
        let line = lines[i].as_ref();
        if !predicates.judge(line) {
            is_success = false;
            if predicates.stop_at_error {
                skipped = end - i + 1;
                break;
            }
            skipped += 1;
            continue;
        }
        if predicates.skip_empty && line.trim().is_empty() {
            skipped += 1;
            continue;
        }
        selected.push(line.to_string());
    }

    FilterOutcome {
        lines: selected,
        is_success,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    // ── Window resolution ─────────────────────────────────────

    #[test]
    fn test_sentinel_window() {
        let input = lines(&["HDR", "a", "b", "TRL", "c"]);
        let predicates = LineFilter::new()
            .with_start_sentinel("HDR")
            .with_end_sentinel("TRL");
        let out = filter(&input, &predicates);
        assert_eq!(out.lines, vec!["a", "b"]);
        assert!(out.is_success);
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn test_missing_start_sentinel_fails() {
        let input = lines(&["a", "b"]);
        let out = filter(&input, &LineFilter::new().with_start_sentinel("HDR"));
        assert!(!out.is_success);
        assert!(out.lines.is_empty());
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn test_missing_end_sentinel_runs_to_last_line() {
        let input = lines(&["HDR", "a", "b"]);
        let predicates = LineFilter::new()
            .with_start_sentinel("HDR")
            .with_end_sentinel("TRL");
        let out = filter(&input, &predicates);
        assert_eq!(out.lines, vec!["a", "b"]);
        assert!(out.is_success);
    }

    #[test]
    fn test_start_sentinel_just_before_first_index() {
        // The sentinel at first_index - 1 satisfies the search without
        // moving the window.
        let input = lines(&["HDR", "a", "b"]);
        let predicates = LineFilter::new()
            .with_start_sentinel("HDR")
            .with_first_index(1);
        let out = filter(&input, &predicates);
        assert_eq!(out.lines, vec!["a", "b"]);
        assert!(out.is_success);
    }

    #[test]
    fn test_index_window() {
        let input = lines(&["a", "b", "c", "d"]);
        let predicates = LineFilter::new().with_first_index(1).with_last_index(2);
        let out = filter(&input, &predicates);
        assert_eq!(out.lines, vec!["b", "c"]);
    }

    #[test]
    fn test_last_index_clamped() {
        let input = lines(&["a", "b"]);
        let out = filter(&input, &LineFilter::new().with_last_index(99));
        assert_eq!(out.lines, vec!["a", "b"]);
    }

    #[test]
    fn test_inverted_window_fails() {
        let input = lines(&["a", "b"]);
        let predicates = LineFilter::new().with_first_index(2).with_last_index(1);
        let out = filter(&input, &predicates);
        assert!(!out.is_success);
        assert!(out.lines.is_empty());
    }

    #[test]
    fn test_empty_input_fails() {
        let out = filter(&Vec::<String>::new(), &LineFilter::new());
        assert!(!out.is_success);
        assert!(out.lines.is_empty());
    }

    // ── Structural predicates ─────────────────────────────────

    #[test]
    fn test_required_prefix() {
        let input = lines(&["D;1", "D;2", "X;3"]);
        let out = filter(&input, &LineFilter::new().with_required_prefix("D;"));
        assert_eq!(out.lines, vec!["D;1", "D;2"]);
        assert!(!out.is_success);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn test_required_suffix_and_substring() {
        let input = lines(&["a|end", "a|mid", "b|end"]);
        let predicates = LineFilter::new()
            .with_required_substring("|")
            .with_required_suffix("end");
        let out = filter(&input, &predicates);
        assert_eq!(out.lines, vec!["a|end", "b|end"]);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn test_required_length_counts_characters() {
        let input = lines(&["abc", "Grüß", "abcd"]);
        let out = filter(&input, &LineFilter::new().with_required_length(4));
        assert_eq!(out.lines, vec!["Grüß", "abcd"]);
    }

    #[test]
    fn test_stop_at_error_assigns_remaining_as_skipped() {
        let input = lines(&["ok1", "bad", "ok2", "ok3"]);
        let predicates = LineFilter::new()
            .with_required_prefix("ok")
            .with_stop_at_error(true);
        let out = filter(&input, &predicates);
        assert_eq!(out.lines, vec!["ok1"]);
        assert!(!out.is_success);
        // Lines 1..=3 remained when the stop hit.
        assert_eq!(out.skipped, 3);
    }

    #[test]
    fn test_skip_empty_counts_blank_lines() {
        let input = lines(&["a", "", "  ", "b"]);
        let out = filter(&input, &LineFilter::new());
        assert_eq!(out.lines, vec!["a", "b"]);
        assert!(out.is_success);
        assert_eq!(out.skipped, 2);
    }

    #[test]
    fn test_keep_empty_when_disabled() {
        let input = lines(&["a", "", "b"]);
        let out = filter(&input, &LineFilter::new().with_skip_empty(false));
        assert_eq!(out.lines, vec!["a", "", "b"]);
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn test_output_is_ordered_subsequence() {
        let input = lines(&["1", "x", "2", "x", "3"]);
        let out = filter(&input, &LineFilter::new().with_required_substring("x"));
        assert_eq!(out.lines, vec!["x", "x"]);
    }
}
