//! Filesystem capacity probing.
//!
//! The engine only sees the [`DiskSpaceProbe`] trait. Which adapter backs it
//! is decided at build time by [`default_probe`].

use std::path::Path;

use backupcheck_core::{DiskProbeError, DiskStat};

/// Reports total and free capacity of the filesystem holding a path.
pub trait DiskSpaceProbe {
    /// Query capacity for `path`. Never cached by callers.
    fn probe(&self, path: &Path) -> Result<DiskStat, DiskProbeError>;
}

impl<F> DiskSpaceProbe for F
where
    F: Fn(&Path) -> Result<DiskStat, DiskProbeError>,
{
    fn probe(&self, path: &Path) -> Result<DiskStat, DiskProbeError> {
        self(path)
    }
}

/// `statvfs(3)` based probe.
///
/// Free space is the block count available to unprivileged users, so
/// root-reserved blocks count as used.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsProbe;

#[cfg(unix)]
impl DiskSpaceProbe for StatvfsProbe {
    #[allow(clippy::useless_conversion)]
    fn probe(&self, path: &Path) -> Result<DiskStat, DiskProbeError> {
        let stat = nix::sys::statvfs::statvfs(path)
            .map_err(|errno| DiskProbeError::io(path, std::io::Error::from(errno)))?;
        let fragment = u64::from(stat.fragment_size());
        let total = u64::from(stat.blocks()).saturating_mul(fragment);
        let free = u64::from(stat.blocks_available()).saturating_mul(fragment);
        DiskStat::new(total, free)
    }
}

/// Probe for targets without a capacity query; always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProbe;

impl DiskSpaceProbe for UnsupportedProbe {
    fn probe(&self, _path: &Path) -> Result<DiskStat, DiskProbeError> {
        Err(DiskProbeError::Unsupported)
    }
}

/// The capacity probe for the build target.
#[cfg(unix)]
pub fn default_probe() -> StatvfsProbe {
    StatvfsProbe
}

/// The capacity probe for the build target.
#[cfg(not(unix))]
pub fn default_probe() -> UnsupportedProbe {
    UnsupportedProbe
}
