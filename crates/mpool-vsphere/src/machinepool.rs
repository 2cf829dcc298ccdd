//! # Machine Pool
//!
//! The vSphere-specific part of a machine pool: how many vCPUs, how they are
//! grouped into sockets, how much memory, and how large the OS disk is.
//!
//! Field names follow the install-config wire format. Note the historical
//! spelling `memoryMB` even though the value is in MiB.

use serde::{Deserialize, Serialize};

/// Compute resources requested for every machine in a pool.
///
/// `None` and `Some(0)` both mean "unset"; use the accessor methods, which
/// fold the two together, rather than reading the fields directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachinePool {
    /// Total number of virtual CPUs.
    #[serde(rename = "cpus", default, skip_serializing_if = "Option::is_none")]
    pub num_cpus: Option<i32>,

    /// Number of cores per virtual socket.
    #[serde(rename = "coresPerSocket", default, skip_serializing_if = "Option::is_none")]
    pub num_cores_per_socket: Option<i32>,

    /// Memory size in MiB.
    #[serde(rename = "memoryMB", default, skip_serializing_if = "Option::is_none")]
    pub memory_mib: Option<i64>,

    /// Primary disk settings.
    #[serde(default, skip_serializing_if = "OsDisk::is_unset")]
    pub os_disk: OsDisk,
}

/// Primary disk settings of a machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsDisk {
    /// Disk size in GB.
    #[serde(rename = "diskSizeGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i32>,
}

impl OsDisk {
    /// Returns true if no disk setting was specified.
    pub fn is_unset(&self) -> bool {
        specified(self.disk_size_gb).is_none()
    }
}

impl MachinePool {
    /// Total vCPUs, if specified.
    pub fn cpus(&self) -> Option<i32> {
        specified(self.num_cpus)
    }

    /// Cores per socket, if specified.
    pub fn cores_per_socket(&self) -> Option<i32> {
        specified(self.num_cores_per_socket)
    }

    /// Memory in MiB, if specified.
    pub fn memory_mib(&self) -> Option<i64> {
        specified(self.memory_mib)
    }

    /// OS disk size in GB, if specified.
    pub fn disk_size_gb(&self) -> Option<i32> {
        specified(self.os_disk.disk_size_gb)
    }

    /// Returns true if none of the resource fields is specified.
    pub fn is_unset(&self) -> bool {
        self.cpus().is_none()
            && self.cores_per_socket().is_none()
            && self.memory_mib().is_none()
            && self.disk_size_gb().is_none()
    }
}

/// Fold the zero sentinel into `None`.
fn specified<T: Copy + Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}
