//! Field schema: declared types, format hints, and constraints.
//!
//! A [`FieldSpec`] is a value struct, constructed once and read many
//! times by the parser. The parser never mutates a spec: when a spec
//! has no format hint, the locale-invariant [`FieldFormat`] is used in
//! its place at parse time.

use serde::{Deserialize, Serialize};

/// The closed set of declared field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// The raw field text, unconverted.
    Text,
    /// A signed 64-bit integer.
    Integer,
    /// An arbitrary-precision decimal.
    Decimal,
    /// A date-time without time zone (local-time assumption).
    DateTime,
    /// A boolean; integer text is accepted with zero meaning `false`.
    Boolean,
}

/// Format hint for coercing field text into a typed value.
///
/// The default is locale-invariant: `.` as the decimal separator, no
/// digit grouping, and an ISO-leaning list of date-time patterns tried
/// in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFormat {
    /// Decimal separator for [`FieldType::Decimal`] fields.
    pub decimal_separator: char,
    /// Digit-group separator stripped before numeric parsing, if any.
    pub group_separator: Option<char>,
    /// `chrono` format strings tried in order for
    /// [`FieldType::DateTime`] fields. Each pattern is tried as a full
    /// date-time first, then as a date (midnight); time-only patterns
    /// are deliberately absent, so a missing date is never filled in
    /// from the current day.
    pub date_time_formats: Vec<String>,
}

impl FieldFormat {
    /// The locale-invariant format.
    #[must_use]
    pub fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: None,
            date_time_formats: [
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%Y-%m-%d",
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl Default for FieldFormat {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Definition of one field to extract from a record line.
///
/// Identity is positional: the parser keys records by the definition's
/// zero-based index in the schema slice, so two definitions may share a
/// name without colliding. Name uniqueness, when needed, is the
/// caller's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, used for diagnostics and caller-side lookup.
    pub name: String,
    /// Declared type the field text is coerced into.
    pub field_type: FieldType,
    /// Optional format hint; locale-invariant when absent.
    pub format: Option<FieldFormat>,
    /// Optional regular expression the raw field text must match.
    pub pattern: Option<String>,
    /// Minimum length of the raw field text, in characters.
    pub min_length: Option<usize>,
    /// Maximum length; longer extractions are truncated, and fallback
    /// extraction consumes at most this many characters.
    pub max_length: Option<usize>,
}

impl FieldSpec {
    /// Creates a definition with only a name and a declared type.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            format: None,
            pattern: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Sets the format hint.
    #[must_use]
    pub fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the validation pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the minimum field length.
    #[must_use]
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum field length.
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}
