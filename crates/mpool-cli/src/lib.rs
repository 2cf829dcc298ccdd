//! # mpool-cli — Machine Pool Command-Line Interface
//!
//! Provides the `mpool` command-line interface over `mpool-vsphere`.
//!
//! ## Subcommands
//!
//! - `mpool validate` — Validate a machine pool or every pool of an
//!   install-config.
//! - `mpool defaults` — Print the effective pools with platform defaults
//!   applied.
//!
//! ```bash
//! mpool validate pool.yaml --field-path compute[0].platform.vsphere
//! mpool validate install-config.yaml --format json
//! mpool defaults install-config.yaml
//! ```
//!
//! ## Exit Codes
//!
//! `0` valid, `1` validation failed, `2` the input could not be processed.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; rules and defaulting live in
//!   `mpool-vsphere`.
//! - Results go to stdout, logs to stderr.

pub mod defaults;
pub mod validate;

use clap::ValueEnum;

/// Where a bare machine pool is assumed to live when the document does not
/// say.
pub const DEFAULT_POOL_PATH: &str = "platform.vsphere";

/// Output format shared by all subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (YAML for structured output).
    #[default]
    Text,
    /// JSON.
    Json,
}
