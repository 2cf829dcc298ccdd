//! # Configuration Documents
//!
//! Loads machine pools from disk. A document is either a bare
//! [`MachinePool`] or an install-config that may carry several pools:
//!
//! ```yaml
//! platform:
//!   vsphere:
//!     defaultMachinePlatform: { cpus: 8, coresPerSocket: 4 }
//! controlPlane:
//!   name: master
//!   platform:
//!     vsphere: { memoryMB: 32768 }
//! compute:
//!   - name: worker
//!     platform:
//!       vsphere: { cpus: 16 }
//! ```
//!
//! A document is treated as an install-config when its top level has any of
//! `platform`, `controlPlane`, or `compute`. Other keys (networking, pull
//! secrets, ...) are ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use mpool_core::{ErrorList, FieldPath};

use crate::machinepool::MachinePool;
use crate::validation::validate_machine_pool;

const INSTALL_CONFIG_KEYS: [&str; 3] = ["platform", "controlPlane", "compute"];

/// Error loading a configuration document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        /// Path of the document.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a valid document.
    #[error("cannot parse '{}': {reason}", .path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Reason parsing failed.
        reason: String,
    },
}

/// Input format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (anything else).
    Json,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// A loaded configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// An install-config carrying zero or more vSphere pools.
    InstallConfig(InstallConfig),
    /// A single vSphere machine pool.
    MachinePool(MachinePool),
}

/// The parts of an install-config that describe vSphere machine pools.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    /// Platform-wide settings.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// The control plane pool.
    #[serde(default)]
    pub control_plane: Option<MachinePoolSpec>,
    /// Compute pools.
    #[serde(default)]
    pub compute: Vec<MachinePoolSpec>,
}

/// Platform section of an install-config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Platform {
    /// vSphere platform settings.
    #[serde(default)]
    pub vsphere: Option<VSpherePlatform>,
}

/// vSphere platform settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VSpherePlatform {
    /// Settings applied to every pool that leaves a field unset.
    #[serde(default)]
    pub default_machine_platform: Option<MachinePool>,
}

/// A named machine pool in an install-config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachinePoolSpec {
    /// Pool name (`master`, `worker`, ...).
    #[serde(default)]
    pub name: Option<String>,
    /// Platform-specific settings.
    #[serde(default)]
    pub platform: Option<MachinePoolPlatform>,
}

/// Platform-specific settings of a machine pool.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachinePoolPlatform {
    /// vSphere settings.
    #[serde(default)]
    pub vsphere: Option<MachinePool>,
}

/// A pool after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectivePool {
    /// Where the pool lives in its document.
    pub path: FieldPath,
    /// Pool name, if the document gives one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Effective resources.
    pub pool: MachinePool,
}

impl EffectivePool {
    /// Validate the merged pool. Errors are located under [`Self::path`].
    ///
    /// A document whose pools are each valid can still merge into an
    /// invalid pool, for example when a pool overrides `cpus` but inherits
    /// an incompatible `coresPerSocket` from `defaultMachinePlatform`.
    pub fn validate(&self) -> ErrorList {
        validate_machine_pool(&self.pool, &self.path)
    }
}

impl MachinePoolSpec {
    fn vsphere(&self) -> Option<&MachinePool> {
        self.platform.as_ref().and_then(|p| p.vsphere.as_ref())
    }
}

impl InstallConfig {
    /// The platform-wide default machine pool, if any.
    pub fn default_machine_platform(&self) -> Option<&MachinePool> {
        self.platform
            .as_ref()
            .and_then(|p| p.vsphere.as_ref())
            .and_then(|v| v.default_machine_platform.as_ref())
    }

    /// Every vSphere pool in the document with its location, in
    /// `defaultMachinePlatform`, `controlPlane`, `compute[i]` order.
    pub fn pools(&self) -> Vec<(FieldPath, &MachinePool)> {
        let mut pools = Vec::new();
        if let Some(pool) = self.default_machine_platform() {
            pools.push((
                FieldPath::new("platform")
                    .child("vsphere")
                    .child("defaultMachinePlatform"),
                pool,
            ));
        }
        if let Some(pool) = self.control_plane.as_ref().and_then(MachinePoolSpec::vsphere) {
            pools.push((
                FieldPath::new("controlPlane").child("platform").child("vsphere"),
                pool,
            ));
        }
        for (i, spec) in self.compute.iter().enumerate() {
            if let Some(pool) = spec.vsphere() {
                pools.push((
                    FieldPath::new("compute").index(i).child("platform").child("vsphere"),
                    pool,
                ));
            }
        }
        pools
    }

    /// Validate every pool, accumulating into one list.
    pub fn validate_pools(&self) -> ErrorList {
        let mut all_errs = ErrorList::new();
        for (path, pool) in self.pools() {
            all_errs.extend(validate_machine_pool(pool, &path));
        }
        all_errs
    }

    /// The control plane and compute pools with defaults applied.
    ///
    /// Pools without vSphere settings still get an entry, built from the
    /// defaults alone.
    pub fn effective_pools(&self) -> Vec<EffectivePool> {
        let platform_default = self.default_machine_platform();
        let effective = |path: FieldPath, spec: &MachinePoolSpec| {
            let mut pool = MachinePool::platform_default();
            pool.set(platform_default);
            pool.set(spec.vsphere());
            EffectivePool {
                path,
                name: spec.name.clone(),
                pool,
            }
        };

        let mut pools = Vec::new();
        if let Some(spec) = &self.control_plane {
            pools.push(effective(FieldPath::new("controlPlane"), spec));
        }
        for (i, spec) in self.compute.iter().enumerate() {
            pools.push(effective(FieldPath::new("compute").index(i), spec));
        }
        pools
    }
}

impl Document {
    /// Validate the document. A bare pool is located at `pool_path`;
    /// install-config pools are located at their own paths.
    pub fn validate(&self, pool_path: &FieldPath) -> ErrorList {
        match self {
            Self::InstallConfig(config) => config.validate_pools(),
            Self::MachinePool(pool) => validate_machine_pool(pool, pool_path),
        }
    }

    /// Effective pools of the document. A bare pool is reported at
    /// `pool_path`.
    pub fn effective_pools(&self, pool_path: &FieldPath) -> Vec<EffectivePool> {
        match self {
            Self::InstallConfig(config) => config.effective_pools(),
            Self::MachinePool(pool) => vec![EffectivePool {
                path: pool_path.clone(),
                name: None,
                pool: pool.with_platform_defaults(),
            }],
        }
    }

    /// Parse a document from a string.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the content is not valid YAML/JSON
    /// or does not have the shape of a pool or install-config.
    pub fn parse(content: &str, format: Format, origin: &Path) -> Result<Self, DocumentError> {
        let parse_err = |reason: String| DocumentError::Parse {
            path: origin.to_path_buf(),
            reason,
        };

        // An empty file is an empty pool.
        if content.trim().is_empty() {
            return Ok(Self::MachinePool(MachinePool::default()));
        }

        let value: Value = match format {
            Format::Yaml => serde_yaml::from_str(content)
                .map_err(|e| parse_err(format!("invalid YAML: {e}")))?,
            Format::Json => serde_json::from_str(content)
                .map_err(|e| parse_err(format!("invalid JSON: {e}")))?,
        };

        let is_install_config = match &value {
            Value::Object(map) => INSTALL_CONFIG_KEYS.iter().any(|k| map.contains_key(*k)),
            _ => return Err(parse_err("top level must be a mapping".to_string())),
        };

        if is_install_config {
            serde_json::from_value(value)
                .map(Self::InstallConfig)
                .map_err(|e| parse_err(format!("invalid install-config: {e}")))
        } else {
            serde_json::from_value(value)
                .map(Self::MachinePool)
                .map_err(|e| parse_err(format!("invalid machine pool: {e}")))
        }
    }
}

/// Load a document, choosing YAML or JSON by file extension.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read and
/// [`DocumentError::Parse`] if its content is not a valid document.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let format = Format::from_path(path);
    let document = Document::parse(&content, format, path)?;

    match &document {
        Document::InstallConfig(config) => tracing::debug!(
            path = %path.display(),
            ?format,
            compute_pools = config.compute.len(),
            has_control_plane = config.control_plane.is_some(),
            "loaded install-config"
        ),
        Document::MachinePool(_) => tracing::debug!(
            path = %path.display(),
            ?format,
            "loaded machine pool"
        ),
    }

    Ok(document)
}
