//! # Validate Trait
//!
//! The seam between rule sets and the code that drives them. A rule set
//! reports every violation it finds relative to a caller-supplied location;
//! whether those violations are fatal is the caller's decision.

use crate::error::MpoolError;
use crate::field::ErrorList;
use crate::path::FieldPath;

/// A value that can check itself against a rule set.
pub trait Validate {
    /// Collect every violation, each located under `path`.
    ///
    /// Implementations must not stop at the first violation and must report
    /// violations in a deterministic order.
    fn validate_at(&self, path: &FieldPath) -> ErrorList;

    /// Validate and turn any violations into a single error.
    ///
    /// # Errors
    ///
    /// Returns [`MpoolError::Validation`] carrying every violation found by
    /// [`validate_at`](Self::validate_at).
    fn validate(&self, path: &FieldPath) -> Result<(), MpoolError> {
        match self.validate_at(path).to_aggregate() {
            Some(aggregate) => Err(aggregate.into()),
            None => Ok(()),
        }
    }
}
