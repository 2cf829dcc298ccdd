//! # Platform Defaults
//!
//! Values a machine is created with when neither the pool nor the
//! platform-wide default machine pool specifies them, and the merge that
//! produces the effective pool.
//!
//! Precedence, lowest to highest: platform defaults, the install-config's
//! `platform.vsphere.defaultMachinePlatform`, the pool's own settings.

use crate::machinepool::{MachinePool, OsDisk};

/// vCPUs per machine when unset.
pub const DEFAULT_NUM_CPUS: i32 = 4;

/// Cores per socket when unset. Also the divisor used when validating a
/// pool that specifies `cpus` without `coresPerSocket`.
pub const DEFAULT_CORES_PER_SOCKET: i32 = 4;

/// Memory per machine in MiB when unset.
pub const DEFAULT_MEMORY_MIB: i64 = 16384;

/// OS disk size in GB when unset.
pub const DEFAULT_DISK_SIZE_GB: i32 = 120;

impl MachinePool {
    /// A pool with every field set to its platform default.
    pub fn platform_default() -> Self {
        Self {
            num_cpus: Some(DEFAULT_NUM_CPUS),
            num_cores_per_socket: Some(DEFAULT_CORES_PER_SOCKET),
            memory_mib: Some(DEFAULT_MEMORY_MIB),
            os_disk: OsDisk {
                disk_size_gb: Some(DEFAULT_DISK_SIZE_GB),
            },
        }
    }

    /// Overwrite every field that `required` specifies.
    ///
    /// Fields that are unset (absent or zero) on `required` leave `self`
    /// untouched. `None` is a no-op.
    pub fn set(&mut self, required: Option<&MachinePool>) {
        let Some(required) = required else {
            return;
        };

        if let Some(cpus) = required.cpus() {
            self.num_cpus = Some(cpus);
        }
        if let Some(cores) = required.cores_per_socket() {
            self.num_cores_per_socket = Some(cores);
        }
        if let Some(memory) = required.memory_mib() {
            self.memory_mib = Some(memory);
        }
        if let Some(size) = required.disk_size_gb() {
            self.os_disk.disk_size_gb = Some(size);
        }
    }

    /// The platform defaults with this pool's specified fields on top.
    pub fn with_platform_defaults(&self) -> Self {
        let mut effective = Self::platform_default();
        effective.set(Some(self));
        effective
    }
}
