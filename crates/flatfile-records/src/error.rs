//! Record parsing error types.
//!
//! Only programmer errors travel this channel. Data-level failures —
//! rejected lines, violated constraints, coercion misses — are reported
//! through the outcome structs of [`crate::filter`] and
//! [`crate::fields`].

use thiserror::Error;

/// Result alias for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors that indicate a malformed schema rather than malformed data.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A field definition carries a pattern that is not a valid
    /// regular expression.
    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        /// Name of the offending field definition.
        field: String,
        /// The underlying regex compilation error.
        source: regex::Error,
    },
}
