//! # Validate Subcommand
//!
//! Validates a bare machine pool, or every vSphere pool in an
//! install-config, and reports all violations at once.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mpool_core::{ErrorList, FieldPath};
use mpool_vsphere::load_document;

use crate::{OutputFormat, DEFAULT_POOL_PATH};

/// Arguments for the `mpool validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Machine pool or install-config file (YAML or JSON).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Location of a bare machine pool, used to label its errors.
    /// Ignored for install-configs.
    #[arg(long, default_value = DEFAULT_POOL_PATH)]
    pub field_path: FieldPath,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 on validation failure.
///
/// # Errors
///
/// Fails if the document cannot be loaded or the report cannot be
/// serialized.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let document = load_document(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let errs = document.validate(&args.field_path);
    tracing::info!(
        file = %args.file.display(),
        errors = errs.len(),
        "validated document"
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&args.file, &errs)),
        OutputFormat::Json => println!("{}", render_json(&args.file, &errs)?),
    }

    Ok(if errs.is_empty() { 0 } else { 1 })
}

/// Render a validation result for humans: `OK: <file>`, or `FAIL: <file>`
/// followed by one indented line per field error.
pub fn render_text(file: &Path, errs: &ErrorList) -> String {
    if errs.is_empty() {
        return format!("OK: {}\n", file.display());
    }

    let header = format!("FAIL: {} ({} error(s))", file.display(), errs.len());
    std::iter::once(header)
        .chain(errs.iter().map(|err| format!("  {err}")))
        .map(|line| line + "\n")
        .collect()
}

/// Render a validation result as a JSON report.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn render_json(file: &Path, errs: &ErrorList) -> Result<String> {
    let report = serde_json::json!({
        "file": file.display().to_string(),
        "valid": errs.is_empty(),
        "errors": errs,
    });
    serde_json::to_string_pretty(&report).context("failed to serialize validation report")
}
