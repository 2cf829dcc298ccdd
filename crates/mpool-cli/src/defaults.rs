//! # Defaults Subcommand
//!
//! Prints the effective machine pools of a document: platform defaults,
//! then the install-config's `defaultMachinePlatform`, then each pool's own
//! settings. The document is validated before merging and each merged pool
//! is validated again; nothing is printed unless both pass.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mpool_core::{ErrorList, FieldPath};
use mpool_vsphere::{load_document, EffectivePool};

use crate::validate::render_text;
use crate::{OutputFormat, DEFAULT_POOL_PATH};

/// Arguments for the `mpool defaults` subcommand.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Machine pool or install-config file (YAML or JSON).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Location of a bare machine pool. Ignored for install-configs.
    #[arg(long, default_value = DEFAULT_POOL_PATH)]
    pub field_path: FieldPath,

    /// Output format (`text` prints YAML).
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the defaults subcommand.
///
/// Returns exit code: 0 after printing the effective pools, 1 if the
/// document or any merged pool failed validation.
///
/// # Errors
///
/// Fails if the document cannot be loaded or the pools cannot be
/// serialized.
pub fn run_defaults(args: &DefaultsArgs) -> Result<u8> {
    let document = load_document(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let errs = document.validate(&args.field_path);
    if !errs.is_empty() {
        tracing::warn!(
            file = %args.file.display(),
            errors = errs.len(),
            "refusing to apply defaults to an invalid document"
        );
        print!("{}", render_text(&args.file, &errs));
        return Ok(1);
    }

    let pools = document.effective_pools(&args.field_path);
    tracing::debug!(pools = pools.len(), "computed effective pools");

    let merged_errs: ErrorList = pools.iter().flat_map(EffectivePool::validate).collect();
    if !merged_errs.is_empty() {
        tracing::warn!(
            file = %args.file.display(),
            errors = merged_errs.len(),
            "defaults produce an invalid pool"
        );
        print!("{}", render_text(&args.file, &merged_errs));
        return Ok(1);
    }

    print!("{}", render_pools(&pools, args.format)?);
    Ok(0)
}

/// Render effective pools as YAML (`text`) or pretty JSON.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn render_pools(pools: &[EffectivePool], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            serde_yaml::to_string(pools).context("failed to serialize effective pools")
        }
        OutputFormat::Json => serde_json::to_string_pretty(pools)
            .map(|s| s + "\n")
            .context("failed to serialize effective pools"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpool_vsphere::MachinePool;

    fn sample() -> Vec<EffectivePool> {
        vec![EffectivePool {
            path: FieldPath::new("compute").index(0),
            name: Some("worker".to_string()),
            pool: MachinePool::platform_default(),
        }]
    }

    #[test]
    fn yaml_output_uses_wire_names() {
        let out = render_pools(&sample(), OutputFormat::Text).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        let first = &value[0];
        assert_eq!(first["path"].as_str(), Some("compute[0]"));
        assert_eq!(first["name"].as_str(), Some("worker"));
        assert_eq!(first["pool"]["cpus"].as_i64(), Some(4));
        assert_eq!(first["pool"]["coresPerSocket"].as_i64(), Some(4));
        assert_eq!(first["pool"]["memoryMB"].as_i64(), Some(16384));
        assert_eq!(first["pool"]["osDisk"]["diskSizeGB"].as_i64(), Some(120));
    }

    #[test]
    fn json_output_parses_back() {
        let out = render_pools(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["pool"]["memoryMB"], 16384);
    }
}
