//! Schema-driven field extraction from record lines.
//!
//! [`read_fields`] walks each record line once, extracting one field
//! per definition in schema order. A field is captured from a quoted
//! span when one opens at the cursor, otherwise up to the next
//! separator, otherwise as a fixed-width slice bounded by the
//! definition's maximum length. Captured text is validated against the
//! definition's constraints and coerced into the declared type.
//!
//! All indexing is by character: record lines are decoded text, and a
//! byte cursor would split multi-byte characters.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{RecordError, RecordResult};
use crate::schema::{FieldFormat, FieldSpec, FieldType};
use crate::value::FieldValue;

/// Separator, quote, and error-handling options for [`read_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Field separators, tried in declaration order. Empty means
    /// fixed-width extraction driven by each definition's maximum
    /// length.
    pub separators: Vec<String>,
    /// Permitted quote characters. A field starting with an odd run of
    /// one of these is captured as a quoted span.
    pub quotes: Vec<char>,
    /// Stop parsing at the first failing field instead of marking the
    /// line and continuing.
    pub stop_at_first_error: bool,
}

impl ParseOptions {
    /// Creates empty options: no separators, no quotes, keep going on
    /// errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field separators, tried in declaration order.
    #[must_use]
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the permitted quote characters.
    #[must_use]
    pub fn with_quotes<I: IntoIterator<Item = char>>(mut self, quotes: I) -> Self {
        self.quotes = quotes.into_iter().collect();
        self
    }

    /// Sets whether parsing halts at the first failing field.
    #[must_use]
    pub fn with_stop_at_first_error(mut self, stop: bool) -> Self {
        self.stop_at_first_error = stop;
        self
    }
}

/// One parsed record line: typed values keyed by the zero-based index
/// of their definition in the schema slice.
///
/// A definition appears at most once; a repeated insert overwrites
/// (last write wins). Iteration follows definition order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    slots: Vec<Option<FieldValue>>,
}

impl Record {
    fn with_width(width: usize) -> Self {
        Self {
            slots: vec![None; width],
        }
    }

    fn insert(&mut self, index: usize, value: FieldValue) {
        self.slots[index] = Some(value);
    }

    /// Returns the value parsed for the definition at `index`, if its
    /// field passed validation and coercion.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Iterates `(definition index, value)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FieldValue)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` when no field was populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Result of a [`read_fields`] call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadOutcome {
    /// Parsed records, in line order.
    pub records: Vec<Record>,
    /// `false` when any line had a failing field.
    pub is_success: bool,
    /// Indices (into the input lines) of lines with at least one
    /// failing field.
    pub error_lines: Vec<usize>,
}

/// Parses each record line into typed fields per `definitions`.
///
/// Validation or coercion failure marks the line in
/// [`ReadOutcome::error_lines`]; the offending field is left out of the
/// record while the rest of the line still parses. With
/// [`ParseOptions::stop_at_first_error`] the current record is dropped
/// and parsing halts, returning what was complete.
///
/// # Errors
///
/// Returns [`RecordError::InvalidPattern`] when a definition's pattern
/// does not compile; this is a schema defect, not a data failure.
pub fn read_fields<S: AsRef<str>>(
    lines: &[S],
    definitions: &[FieldSpec],
    options: &ParseOptions,
) -> RecordResult<ReadOutcome> {
    let patterns = compile_patterns(definitions)?;
    let invariant = FieldFormat::invariant();

    let mut records = Vec::with_capacity(lines.len());
    let mut error_lines = Vec::new();
    let mut is_success = true;

    'lines: for (line_index, line) in lines.iter().enumerate() {
        let chars: Vec<char> = line.as_ref().chars().collect();
        let mut record = Record::with_width(definitions.len());
        let mut cursor = 0usize;
        let mut line_errored = false;

        for (def_index, def) in definitions.iter().enumerate() {
            let extracted = extract_field(&chars, cursor, def.max_length, options);
            cursor = extracted.next_cursor;

            let mut field = extracted.text;
            if let Some(max) = def.max_length {
                if field.chars().count() > max {
                    field = field.chars().take(max).collect();
                }
            }

            let format = def.format.as_ref().unwrap_or(&invariant);
            let value = validate(&field, def, patterns[def_index].as_ref())
                .then(|| coerce(&field, def.field_type, format))
                .flatten();

            match value {
                Some(value) => record.insert(def_index, value),
                None => {
                    tracing::debug!(
                        line = line_index,
                        field = %def.name,
                        "field failed validation or coercion"
                    );
                    line_errored = true;
                    if options.stop_at_first_error {
                        error_lines.push(line_index);
                        is_success = false;
                        break 'lines;
                    }
                }
            }
        }

        if line_errored {
            error_lines.push(line_index);
            is_success = false;
        }
        records.push(record);
    }

    Ok(ReadOutcome {
        records,
        is_success,
        error_lines,
    })
}

fn compile_patterns(definitions: &[FieldSpec]) -> RecordResult<Vec<Option<Regex>>> {
    definitions
        .iter()
        .map(|def| match &def.pattern {
            Some(pattern) if !pattern.is_empty() => Regex::new(pattern)
                .map(Some)
                .map_err(|source| RecordError::InvalidPattern {
                    field: def.name.clone(),
                    source,
                }),
            _ => Ok(None),
        })
        .collect()
}

struct Extracted {
    text: String,
    next_cursor: usize,
}

/// Extracts one field starting at `cursor`.
///
/// Capture preference: quoted span, then separator-delimited slice,
/// then a fixed-width slice bounded by `max_length`. Cursor advance
/// preference: past the separator, else past the closing quote, else by
/// the field's own length.
fn extract_field(
    chars: &[char],
    cursor: usize,
    max_length: Option<usize>,
    options: &ParseOptions,
) -> Extracted {
    let len = chars.len();
    if cursor >= len {
        return Extracted {
            text: String::new(),
            next_cursor: cursor,
        };
    }
    let budget = (len - cursor).min(max_length.unwrap_or(usize::MAX));

    // Quoted span: only an odd-length opening run can enclose content.
    let mut quoted: Option<String> = None;
    let mut close_index: Option<usize> = None;
    if let Some(&quote) = options.quotes.iter().find(|&&q| chars[cursor] == q) {
        let mut run = 0;
        while cursor + run < len && chars[cursor + run] == quote {
            run += 1;
        }
        if run % 2 == 1 {
            if let Some(close) = find_closing_quote(chars, cursor + run, quote) {
                quoted = Some(unescape_quoted(&chars[cursor + 1..close], quote));
                close_index = Some(close);
            }
        }
    }

    // Separator: declaration order decides which separator wins, not
    // buffer position.
    let search_from = close_index.map_or(cursor, |close| (close + 1).max(cursor));
    let mut separator: Option<(usize, usize)> = None;
    for sep in &options.separators {
        let needle: Vec<char> = sep.chars().collect();
        if needle.is_empty() {
            continue;
        }
        if let Some(at) = find_subslice(chars, &needle, search_from) {
            separator = Some((at, needle.len()));
            break;
        }
    }

    let text = if let Some(text) = quoted {
        text
    } else if let Some((at, _)) = separator {
        chars[cursor..at].iter().collect()
    } else {
        chars[cursor..cursor + budget].iter().collect()
    };

    let next_cursor = if let Some((at, sep_len)) = separator {
        at + sep_len
    } else if let Some(close) = close_index {
        close + 1
    } else {
        cursor + text.chars().count()
    };

    Extracted { text, next_cursor }
}

/// Finds the closing quote, skipping candidates escaped by a preceding
/// backslash and consuming doubled-quote pairs whole.
fn find_closing_quote(chars: &[char], from: usize, quote: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == quote {
            if chars.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            if i > 0 && chars[i - 1] == '\\' {
                i += 1;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Rewrites `\q` and `qq` to a literal `q` inside quoted content.
fn unescape_quoted(content: &[char], quote: char) -> String {
    let mut out = String::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        let c = content[i];
        if (c == '\\' || c == quote) && content.get(i + 1) == Some(&quote) {
            out.push(quote);
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

fn find_subslice(chars: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.len() > chars.len() {
        return None;
    }
    (from..=chars.len() - needle.len()).find(|&i| chars[i..i + needle.len()] == *needle)
}

fn validate(field: &str, def: &FieldSpec, pattern: Option<&Regex>) -> bool {
    if let Some(min) = def.min_length {
        if field.chars().count() < min {
            return false;
        }
    }
    if let Some(regex) = pattern {
        if !regex.is_match(field) {
            return false;
        }
    }
    true
}

fn coerce(field: &str, field_type: FieldType, format: &FieldFormat) -> Option<FieldValue> {
    match field_type {
        FieldType::Text => Some(FieldValue::Text(field.to_string())),
        FieldType::Integer => parse_integer(field, format).map(FieldValue::Integer),
        FieldType::Decimal => parse_decimal(field, format).map(FieldValue::Decimal),
        FieldType::DateTime => parse_date_time(field, format).map(FieldValue::DateTime),
        FieldType::Boolean => parse_boolean(field, format).map(FieldValue::Boolean),
    }
}

fn parse_boolean(field: &str, format: &FieldFormat) -> Option<bool> {
    let trimmed = field.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    // Integer text is accepted: zero is false, anything else is true.
    parse_integer(field, format).map(|i| i != 0)
}

fn parse_integer(field: &str, format: &FieldFormat) -> Option<i64> {
    let mut text = field.trim().to_string();
    if let Some(group) = format.group_separator {
        text = text.replace(group, "");
    }
    text.parse().ok()
}

fn parse_decimal(field: &str, format: &FieldFormat) -> Option<Decimal> {
    let mut text = field.trim().to_string();
    if let Some(group) = format.group_separator {
        text = text.replace(group, "");
    }
    if format.decimal_separator != '.' {
        text = text.replace(format.decimal_separator, ".");
    }
    text.parse().ok()
}

fn parse_date_time(field: &str, format: &FieldFormat) -> Option<NaiveDateTime> {
    let trimmed = field.trim();
    for pattern in &format.date_time_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Some(dt);
        }
        // A date-only pattern still yields a value at midnight; missing
        // time is defaultable, a missing date is not.
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, pattern) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}
