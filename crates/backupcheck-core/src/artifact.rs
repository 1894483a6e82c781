//! Backup artifact and filesystem capacity types.

use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::DiskProbeError;

/// One backup file matched by the name pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupArtifact {
    /// Full path to the file.
    pub path: PathBuf,
    /// Last modification time.
    pub modified: SystemTime,
    /// Size in bytes.
    pub size: u64,
}

impl BackupArtifact {
    /// Create a new artifact descriptor.
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime, size: u64) -> Self {
        Self {
            path: path.into(),
            modified,
            size,
        }
    }
}

/// Capacity of the filesystem hosting a backup directory.
///
/// `total_bytes` is never zero and `free_bytes` never exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskStat {
    total_bytes: u64,
    free_bytes: u64,
}

impl DiskStat {
    /// Build a disk stat, rejecting numbers no real filesystem reports.
    pub fn new(total_bytes: u64, free_bytes: u64) -> Result<Self, DiskProbeError> {
        if total_bytes == 0 || free_bytes > total_bytes {
            return Err(DiskProbeError::InvalidStat {
                total: total_bytes,
                free: free_bytes,
            });
        }
        Ok(Self {
            total_bytes,
            free_bytes,
        })
    }

    /// Total capacity in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Free capacity in bytes.
    pub fn free_bytes(&self) -> u64 {
        self.free_bytes
    }

    /// Used capacity in bytes.
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes - self.free_bytes
    }

    /// Percentage of capacity in use, `0.0..=100.0`.
    pub fn used_percent(&self) -> f64 {
        100.0 * self.used_bytes() as f64 / self.total_bytes as f64
    }
}
