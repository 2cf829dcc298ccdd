//! # mpool-vsphere — vSphere Machine Pools
//!
//! Compute-resource settings for virtual machines provisioned on vSphere,
//! and the rules that decide whether a requested configuration is usable.
//!
//! ## Modules
//!
//! - [`machinepool`] — the [`MachinePool`] type as it appears in
//!   configuration documents (`cpus`, `coresPerSocket`, `memoryMB`,
//!   `osDisk.diskSizeGB`).
//! - [`validation`] — [`validate_machine_pool`], the accumulating rule set.
//! - [`defaults`] — platform defaults and the merge used to compute the
//!   effective pool a machine is actually created with.
//! - [`document`] — loading bare pools and install-config documents from
//!   YAML or JSON and walking every pool they contain.
//!
//! ## Zero Means Unset
//!
//! Every resource field is optional. An explicit `0` in a document is
//! accepted and treated exactly like an absent field, so "use the platform
//! default" has one meaning regardless of how it was spelled.

pub mod defaults;
pub mod document;
pub mod machinepool;
pub mod validation;

pub use defaults::{
    DEFAULT_CORES_PER_SOCKET, DEFAULT_DISK_SIZE_GB, DEFAULT_MEMORY_MIB, DEFAULT_NUM_CPUS,
};
pub use document::{
    load_document, Document, DocumentError, EffectivePool, Format, InstallConfig,
};
pub use machinepool::{MachinePool, OsDisk};
pub use validation::validate_machine_pool;
