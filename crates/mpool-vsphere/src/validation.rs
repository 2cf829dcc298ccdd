//! # Machine Pool Validation
//!
//! Checks the four compute-resource fields of a [`MachinePool`] and reports
//! every violation as a [`FieldError`] located under the caller's path.
//!
//! ## Rules, in reporting order
//!
//! 1. `diskSizeGB` must not be negative.
//! 2. `cpus` must not be negative.
//! 3. `coresPerSocket` must not be negative.
//! 4. `memoryMB` must not be negative.
//! 5. A positive `coresPerSocket` must not exceed `cpus`.
//! 6. A positive `cpus` must be a multiple of `coresPerSocket`, or of
//!    [`DEFAULT_CORES_PER_SOCKET`] when cores per socket is unset. Skipped
//!    when rule 5 fired.
//!
//! Rules 1-4 run regardless of the others. A pool can fail rules 3 and 6
//! at once, for example, and both are reported.

use mpool_core::{ErrorList, FieldError, FieldPath, Validate};

use crate::defaults::DEFAULT_CORES_PER_SOCKET;
use crate::machinepool::MachinePool;

/// Validate the compute resources of a vSphere machine pool.
///
/// `path` locates the pool in the enclosing document; each error is
/// reported at a child of it (`cpus`, `coresPerSocket`, `memoryMB`,
/// `diskSizeGB`). An entirely unset pool is valid.
pub fn validate_machine_pool(pool: &MachinePool, path: &FieldPath) -> ErrorList {
    let mut all_errs = ErrorList::new();

    if let Some(size) = pool.disk_size_gb().filter(|v| *v < 0) {
        all_errs.push(FieldError::invalid(
            &path.child("diskSizeGB"),
            size,
            "storage disk size must be positive",
        ));
    }
    if let Some(cpus) = pool.cpus().filter(|v| *v < 0) {
        all_errs.push(FieldError::invalid(
            &path.child("cpus"),
            cpus,
            "number of CPUs must be positive",
        ));
    }
    if let Some(cores) = pool.cores_per_socket().filter(|v| *v < 0) {
        all_errs.push(FieldError::invalid(
            &path.child("coresPerSocket"),
            cores,
            "cores per socket must be positive",
        ));
    }
    if let Some(memory) = pool.memory_mib().filter(|v| *v < 0) {
        all_errs.push(FieldError::invalid(
            &path.child("memoryMB"),
            memory,
            "memory size must be positive",
        ));
    }

    let cpus = pool.cpus().unwrap_or(0);
    let mut cores_exceed_cpus = false;

    if let Some(cores) = pool.cores_per_socket().filter(|v| *v > 0) {
        if cores > cpus {
            cores_exceed_cpus = true;
            all_errs.push(FieldError::invalid(
                &path.child("coresPerSocket"),
                cores,
                "cores per socket must be less than number of CPUs",
            ));
        }
    }

    // Divisibility is meaningless once the cores already exceed the CPUs.
    if cpus > 0 && !cores_exceed_cpus {
        let (cores, detail) = match pool.cores_per_socket() {
            Some(cores) => (
                cores,
                "numCPUs specified should be a multiple of cores per socket",
            ),
            None => (
                DEFAULT_CORES_PER_SOCKET,
                "numCPUs specified should be a multiple of cores per socket which is by default 4",
            ),
        };
        if cpus.checked_rem(cores) != Some(0) {
            all_errs.push(FieldError::invalid(&path.child("cpus"), cpus, detail));
        }
    }

    all_errs
}

impl Validate for MachinePool {
    fn validate_at(&self, path: &FieldPath) -> ErrorList {
        validate_machine_pool(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machinepool::OsDisk;

    fn pool(cpus: i32, cores: i32, memory: i64, disk: i32) -> MachinePool {
        MachinePool {
            num_cpus: Some(cpus),
            num_cores_per_socket: Some(cores),
            memory_mib: Some(memory),
            os_disk: OsDisk {
                disk_size_gb: Some(disk),
            },
        }
    }

    fn aggregate(pool: &MachinePool) -> Option<String> {
        validate_machine_pool(pool, &FieldPath::new("test-path"))
            .to_aggregate()
            .map(|e| e.to_string())
    }

    #[test]
    fn validate_machine_pool_cases() {
        let cases: &[(&str, MachinePool, Option<&str>)] = &[
            ("empty", MachinePool::default(), None),
            ("explicit zeros", pool(0, 0, 0, 0), None),
            (
                "negative disk size",
                pool(0, 0, 0, -1),
                Some("test-path.diskSizeGB: Invalid value: -1: storage disk size must be positive"),
            ),
            (
                "negative CPUs",
                pool(-1, 0, 0, 0),
                Some("test-path.cpus: Invalid value: -1: number of CPUs must be positive"),
            ),
            (
                "negative cores",
                pool(0, -1, 0, 0),
                Some("test-path.coresPerSocket: Invalid value: -1: cores per socket must be positive"),
            ),
            (
                "negative memory",
                pool(0, 0, -1, 0),
                Some("test-path.memoryMB: Invalid value: -1: memory size must be positive"),
            ),
            (
                "less CPUs than cores per socket",
                pool(1, 8, 0, 0),
                Some("test-path.coresPerSocket: Invalid value: 8: cores per socket must be less than number of CPUs"),
            ),
            (
                "numCPUs not a multiple of cores per socket",
                pool(7, 4, 0, 0),
                Some("test-path.cpus: Invalid value: 7: numCPUs specified should be a multiple of cores per socket"),
            ),
            (
                "numCPUs not a multiple of default cores per socket",
                pool(7, 0, 0, 0),
                Some("test-path.cpus: Invalid value: 7: numCPUs specified should be a multiple of cores per socket which is by default 4"),
            ),
            ("valid explicit", pool(8, 2, 16384, 120), None),
            ("valid defaulted cores", pool(12, 0, 0, 0), None),
            ("cores equal to CPUs", pool(6, 6, 0, 0), None),
        ];

        for (name, input, expected) in cases {
            assert_eq!(aggregate(input).as_deref(), *expected, "case {name:?}");
        }
    }

    #[test]
    fn reports_every_violation_in_rule_order() {
        let errs = validate_machine_pool(&pool(-3, -2, -1, -4), &FieldPath::new("p"));
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["p.diskSizeGB", "p.cpus", "p.coresPerSocket", "p.memoryMB"]
        );
    }

    #[test]
    fn cores_exceeding_cpus_skips_divisibility() {
        // 3 % 5 != 0, but only the ordering error is reported.
        let errs = validate_machine_pool(&pool(3, 5, 0, 0), &FieldPath::new("p"));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.errors()[0].field, "p.coresPerSocket");
        assert_eq!(errs.errors()[0].bad_value, serde_json::json!(5));
    }

    #[test]
    fn cores_exceeding_cpus_keeps_sign_errors() {
        let errs = validate_machine_pool(&pool(1, 8, -1, 0), &FieldPath::new("p"));
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["p.memoryMB", "p.coresPerSocket"]);
    }

    #[test]
    fn negative_cores_still_checked_for_divisibility() {
        // -2 does not divide 5, so both the sign and divisibility rules fire.
        let errs = validate_machine_pool(&pool(5, -2, 0, 0), &FieldPath::new("p"));
        let details: Vec<&str> = errs.iter().map(|e| e.detail.as_str()).collect();
        assert_eq!(
            details,
            [
                "cores per socket must be positive",
                "numCPUs specified should be a multiple of cores per socket",
            ]
        );
    }

    #[test]
    fn positive_cores_against_unset_cpus() {
        let errs = validate_machine_pool(
            &MachinePool {
                num_cores_per_socket: Some(2),
                ..Default::default()
            },
            &FieldPath::new("p"),
        );
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.errors()[0].field, "p.coresPerSocket");
    }

    #[test]
    fn errors_are_located_under_nested_prefix() {
        let prefix = FieldPath::new("compute").index(1).child("platform").child("vsphere");
        let errs = validate_machine_pool(&pool(-1, 0, 0, 0), &prefix);
        assert_eq!(errs.errors()[0].field, "compute[1].platform.vsphere.cpus");
    }

    #[test]
    fn validate_trait_delegates() {
        let err = pool(0, 0, -1, 0)
            .validate(&FieldPath::new("test-path"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "test-path.memoryMB: Invalid value: -1: memory size must be positive"
        );
        assert!(MachinePool::default()
            .validate(&FieldPath::new("test-path"))
            .is_ok());
    }
}
