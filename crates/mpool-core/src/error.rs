//! # Error Types
//!
//! Operational errors for the core types. Field-level validation problems
//! are not errors in this sense; they are [`FieldError`](crate::FieldError)
//! values collected into an [`ErrorList`](crate::ErrorList). They only
//! become an `MpoolError` once a caller decides the list is fatal.

use thiserror::Error;

use crate::field::AggregateError;

/// Top-level error type for mpool.
#[derive(Error, Debug)]
pub enum MpoolError {
    /// A textual field path could not be parsed.
    #[error("invalid field path {path:?}: {reason}")]
    InvalidFieldPath {
        /// The input that was rejected.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// One or more field errors, aggregated for presentation.
    #[error(transparent)]
    Validation(#[from] AggregateError),
}
