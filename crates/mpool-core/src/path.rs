//! # Field Paths
//!
//! A [`FieldPath`] locates a field inside a nested configuration document.
//! Paths are built by appending to a caller-supplied prefix, so a rule set
//! never needs to know where in the larger document its input lives.
//!
//! ## Rendering
//!
//! Named children are joined with `.`, list indices render as `[i]` and map
//! keys as `[key]`:
//!
//! ```
//! use mpool_core::FieldPath;
//!
//! let path = FieldPath::new("compute").index(0).child("platform").child("vsphere");
//! assert_eq!(path.to_string(), "compute[0].platform.vsphere");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::MpoolError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Immutable, hierarchical location of a field.
///
/// Every builder method returns a new path and leaves `self` untouched, so a
/// single prefix can be shared by any number of child paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Start a new path at the named root field.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(root.into())],
        }
    }

    /// Append a named child field.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.with(Segment::Field(name.into()))
    }

    /// Append a list index.
    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// Append a map key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(Segment::Key(key.into()))
    }

    /// Name of the root field.
    pub fn root(&self) -> &str {
        match self.segments.first() {
            Some(Segment::Field(name)) => name,
            _ => "",
        }
    }

    /// Number of segments, including the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Parse a rendered path such as `compute[0].platform.vsphere`.
    ///
    /// Numeric subscripts become indices, anything else inside brackets
    /// becomes a key. Keys containing `.` or `]` cannot be expressed.
    ///
    /// # Errors
    ///
    /// Returns [`MpoolError::InvalidFieldPath`] for an empty input, an empty
    /// field name (`a..b`, `.a`, `[0]`), an empty subscript, or an
    /// unterminated bracket.
    pub fn parse(input: &str) -> Result<Self, MpoolError> {
        let invalid = |reason: &str| MpoolError::InvalidFieldPath {
            path: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        for part in input.split('.') {
            let (name, mut rest) = part.split_at(part.find('[').unwrap_or(part.len()));
            if name.is_empty() {
                return Err(invalid("empty field name"));
            }
            segments.push(Segment::Field(name.to_string()));

            while !rest.is_empty() {
                let inner = rest
                    .strip_prefix('[')
                    .ok_or_else(|| invalid("unexpected characters after subscript"))?;
                let (content, tail) = inner
                    .split_once(']')
                    .ok_or_else(|| invalid("unterminated '['"))?;
                if content.is_empty() {
                    return Err(invalid("empty subscript"));
                }
                segments.push(match content.parse::<usize>() {
                    Ok(index) => Segment::Index(index),
                    Err(_) => Segment::Key(content.to_string()),
                });
                rest = tail;
            }
        }

        Ok(Self { segments })
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = MpoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
