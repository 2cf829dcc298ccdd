//! # mpool-core — Foundational Types for Machine Pool Validation
//!
//! This crate defines the vocabulary every rule set in the workspace speaks:
//! where a field lives, what is wrong with it, and how several problems are
//! presented together. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Errors are data.** Validation returns an [`ErrorList`], never a
//!    `Result` that stops at the first violation. Callers decide whether
//!    the list is fatal by calling [`ErrorList::to_aggregate`].
//!
//! 2. **Structured locations.** Every [`FieldError`] carries the rendered
//!    [`FieldPath`] of the offending field (`compute[0].platform.vsphere.cpus`),
//!    built by appending children to a caller-supplied prefix.
//!
//! 3. **One seam.** Rule sets implement [`Validate`]; the CLI and document
//!    walkers only ever talk to that trait.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mpool-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod path;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use error::MpoolError;
pub use field::{AggregateError, ErrorList, FieldError};
pub use path::FieldPath;
pub use validate::Validate;
