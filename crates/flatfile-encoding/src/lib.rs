//! # `flatfile-encoding`
//!
//! Byte-level front half of the flat-file ingestion core:
//!
//! - [`split_lines`] — segment a raw buffer into byte-lines at LF /
//!   CR+LF boundaries
//! - [`classify`] — rank candidate encodings for a buffer against an
//!   optional assumption, answering with a tri-state [`Verdict`]
//! - [`load_lines`] — decode a buffer line by line, iterating starting
//!   defaults until the per-line encoding choices stabilize
//!
//! The pipeline is purely functional over in-memory bytes: no I/O, no
//! internal state across calls. The only process-wide state is the
//! lazily initialized code-page registry in [`codepage`], which is
//! read-only after construction and safe to race on first use.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod bom;
pub mod classify;
pub mod codepage;
pub mod decode;
pub mod loader;
pub mod split;

pub use bom::{sniff_bom, BOM_PEEK_LEN};
pub use classify::{classify, Classification, Verdict};
pub use codepage::CodePage;
pub use decode::{decode, REPLACEMENT};
pub use loader::{load_lines, LoadOutcome, TextLine};
pub use split::split_lines;
