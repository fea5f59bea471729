//! # `flatfile-records`
//!
//! Back half of the flat-file ingestion core: once a buffer has been
//! decoded into text lines, this crate narrows the lines down to the
//! record window and parses each surviving line into typed fields.
//!
//! - [`filter`] — structural predicates and sentinel-bracketed windows
//!   over a sequence of text lines
//! - [`read_fields`] — schema-driven extraction of quoted, separated,
//!   or fixed-width fields, coerced into the five declared types
//!
//! Data-level failures are reported through [`FilterOutcome`] and
//! [`ReadOutcome`]; only schema defects (an invalid field pattern)
//! surface as [`RecordError`].

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod fields;
pub mod filter;
pub mod schema;
pub mod value;

pub use error::{RecordError, RecordResult};
pub use fields::{read_fields, ParseOptions, ReadOutcome, Record};
pub use filter::{filter, FilterOutcome, LineFilter};
pub use schema::{FieldFormat, FieldSpec, FieldType};
pub use value::FieldValue;
