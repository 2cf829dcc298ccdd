//! # Field Errors
//!
//! Structured validation results. A [`FieldError`] names the offending
//! field, echoes the value that was rejected, and explains why. Rule sets
//! push every violation they find into an [`ErrorList`]; callers that want a
//! single `std::error::Error` turn the list into an [`AggregateError`].
//!
//! ## Rendering
//!
//! ```text
//! test-path.cpus: Invalid value: -1: number of CPUs must be positive
//! ```
//!
//! Integers render bare, strings are quoted, so the rendered line is
//! unambiguous about the type that was supplied.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::path::FieldPath;

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{field}: Invalid value: {bad_value}: {detail}")]
pub struct FieldError {
    /// Rendered path of the offending field.
    pub field: String,
    /// The value that was rejected.
    pub bad_value: Value,
    /// Human-readable reason.
    pub detail: String,
}

impl FieldError {
    /// Record that the field at `path` holds an unacceptable value.
    pub fn invalid(path: &FieldPath, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self {
            field: path.to_string(),
            bad_value: value.into(),
            detail: detail.into(),
        }
    }
}

/// Ordered collection of field errors.
///
/// Order is insertion order; rule sets rely on it to report violations in a
/// fixed, documented sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorList {
    errors: Vec<FieldError>,
}

impl ErrorList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one error.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Returns a slice of all errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }

    /// Combine the list into a single error, or `None` if it is empty.
    pub fn to_aggregate(&self) -> Option<AggregateError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(AggregateError {
                errors: self.errors.clone(),
            })
        }
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Several field errors presented as one.
///
/// A single error displays as itself. Several display as
/// `[first, second, ...]`, with repeated messages shown once.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateError {
    errors: Vec<FieldError>,
}

impl AggregateError {
    /// The underlying errors, in the order they were reported.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.errors.as_slice() {
            return write!(f, "{only}");
        }

        let mut seen = HashSet::new();
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(ToString::to_string)
            .filter(|msg| seen.insert(msg.clone()))
            .collect();

        if let [only] = messages.as_slice() {
            write!(f, "{only}")
        } else {
            write!(f, "[{}]", messages.join(", "))
        }
    }
}

impl std::error::Error for AggregateError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpus_error() -> FieldError {
        FieldError::invalid(
            &FieldPath::new("test-path").child("cpus"),
            -1,
            "number of CPUs must be positive",
        )
    }

    fn memory_error() -> FieldError {
        FieldError::invalid(
            &FieldPath::new("test-path").child("memoryMB"),
            -1i64,
            "memory size must be positive",
        )
    }

    #[test]
    fn field_error_display_format() {
        assert_eq!(
            cpus_error().to_string(),
            "test-path.cpus: Invalid value: -1: number of CPUs must be positive"
        );
    }

    #[test]
    fn string_values_are_quoted() {
        let err = FieldError::invalid(&FieldPath::new("name"), "x y", "bad name");
        assert_eq!(err.to_string(), r#"name: Invalid value: "x y": bad name"#);
    }

    #[test]
    fn empty_list_has_no_aggregate() {
        assert!(ErrorList::new().to_aggregate().is_none());
    }

    #[test]
    fn single_error_aggregate_is_unbracketed() {
        let list: ErrorList = std::iter::once(cpus_error()).collect();
        let agg = list.to_aggregate().unwrap();
        assert_eq!(agg.to_string(), cpus_error().to_string());
        assert_eq!(agg.errors().len(), 1);
    }

    #[test]
    fn multiple_errors_aggregate_in_order() {
        let mut list = ErrorList::new();
        list.push(cpus_error());
        list.push(memory_error());
        let agg = list.to_aggregate().unwrap();
        assert_eq!(
            agg.to_string(),
            "[test-path.cpus: Invalid value: -1: number of CPUs must be positive, \
             test-path.memoryMB: Invalid value: -1: memory size must be positive]"
        );
    }

    #[test]
    fn duplicate_messages_collapse() {
        let mut list = ErrorList::new();
        list.extend([cpus_error(), cpus_error()]);
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.to_aggregate().unwrap().to_string(),
            cpus_error().to_string()
        );

        list.push(memory_error());
        let rendered = list.to_aggregate().unwrap().to_string();
        assert_eq!(rendered.matches("test-path.cpus").count(), 1);
        assert!(rendered.starts_with('[') && rendered.ends_with(']'));
    }

    #[test]
    fn serializes_as_array_of_records() {
        let list: ErrorList = vec![cpus_error()].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            serde_json::json!([{
                "field": "test-path.cpus",
                "badValue": -1,
                "detail": "number of CPUs must be positive"
            }])
        );
    }
}
