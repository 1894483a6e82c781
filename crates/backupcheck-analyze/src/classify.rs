//! Severity classification.
//!
//! A pure function of the evidence and the thresholds. Rules are checked in
//! a fixed order and the first match wins:
//!
//! 1. no artifacts: `UNKNOWN`, "no files"
//! 2. disk probe failed: `UNKNOWN`, "disk error"
//! 3. newest artifact at least `max_age` seconds old: `CRITICAL`, "backup too old"
//! 4. newest artifact at most `min_size` bytes: `CRITICAL`, "backup too small"
//! 5. disk usage at least the critical percentage: `CRITICAL`, "disk P% full"
//! 6. disk usage at least the warning percentage: `WARNING`, "disk P% full"
//! 7. otherwise `OK`

use backupcheck_core::{Reason, Severity, Thresholds};

/// What the engine learned about a directory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evidence {
    /// The scan matched nothing.
    NoFiles,
    /// Artifacts exist but the disk could not be probed.
    DiskError,
    /// Everything needed for the threshold checks.
    Measured {
        /// Age of the newest artifact in seconds.
        age_seconds: f64,
        /// Size of the newest artifact in bytes.
        latest_size: u64,
        /// Disk usage percentage.
        used_percent: f64,
    },
}

/// Severity plus the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Resulting severity.
    pub severity: Severity,
    /// Rule that fired.
    pub reason: Reason,
}

impl Classification {
    fn new(severity: Severity, reason: Reason) -> Self {
        Self { severity, reason }
    }
}

/// Classify a directory's evidence against the thresholds.
pub fn classify(evidence: &Evidence, thresholds: &Thresholds) -> Classification {
    match *evidence {
        Evidence::NoFiles => Classification::new(Severity::Unknown, Reason::NoFiles),
        Evidence::DiskError => Classification::new(Severity::Unknown, Reason::DiskError),
        Evidence::Measured {
            age_seconds,
            latest_size,
            used_percent,
        } => {
            if age_seconds >= thresholds.max_age as f64 {
                Classification::new(Severity::Critical, Reason::TooOld)
            } else if latest_size <= thresholds.min_size {
                Classification::new(Severity::Critical, Reason::TooSmall)
            } else if used_percent >= thresholds.critical_disk_percent {
                Classification::new(Severity::Critical, Reason::DiskFull { used_percent })
            } else if used_percent >= thresholds.warning_disk_percent {
                Classification::new(Severity::Warning, Reason::DiskFull { used_percent })
            } else {
                Classification::new(Severity::Ok, Reason::Ok)
            }
        }
    }
}
