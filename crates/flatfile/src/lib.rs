//! # flatfile
//!
//! Ingestion core for legacy line-delimited exports: recover a
//! plausible character encoding from raw bytes, decode the buffer into
//! text lines, narrow the lines to the record window, and parse each
//! record into typed fields against a caller-supplied schema.
//!
//! This crate is the umbrella over the two halves of the pipeline:
//!
//! - [`flatfile_encoding`]: [`split_lines`], [`classify`],
//!   [`load_lines`]
//! - [`flatfile_records`]: [`filter`], [`read_fields`]
//!
//! # Pipeline
//!
//! ```
//! use flatfile::{
//!     filter, load_lines, read_fields, FieldSpec, FieldType, FieldValue,
//!     LineFilter, ParseOptions,
//! };
//!
//! // Bytes straight from a legacy export; encoding unknown.
//! let bytes = b"HDR\nwidget;4\ngadget;11\nTRL\n";
//!
//! let loaded = load_lines(bytes, None, true);
//! let lines: Vec<String> = loaded.lines.into_iter().map(|l| l.text).collect();
//!
//! let window = filter(
//!     &lines,
//!     &LineFilter::new()
//!         .with_start_sentinel("HDR")
//!         .with_end_sentinel("TRL"),
//! );
//! assert!(window.is_success);
//!
//! let schema = vec![
//!     FieldSpec::new("name", FieldType::Text),
//!     FieldSpec::new("count", FieldType::Integer),
//! ];
//! let parsed = read_fields(
//!     &window.lines,
//!     &schema,
//!     &ParseOptions::new().with_separators([";"]),
//! )
//! .unwrap();
//! assert!(parsed.is_success);
//! assert_eq!(parsed.records[1].get(1), Some(&FieldValue::Integer(11)));
//! ```
//!
//! The whole pipeline is a pure transformation over in-memory buffers:
//! no I/O, no shared state, and all data-level failures reported
//! through return values.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub use flatfile_encoding::{
    classify, decode, load_lines, sniff_bom, split_lines, Classification, CodePage, LoadOutcome,
    TextLine, Verdict, BOM_PEEK_LEN, REPLACEMENT,
};
pub use flatfile_records::{
    filter, read_fields, FieldFormat, FieldSpec, FieldType, FieldValue, FilterOutcome, LineFilter,
    ParseOptions, ReadOutcome, Record, RecordError, RecordResult,
};
