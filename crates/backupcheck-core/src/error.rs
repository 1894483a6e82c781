//! Error types for configuration, disk probing and per-directory analysis.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or incomplete check configuration.
///
/// Always fatal: raised once at the boundary, before any directory is analyzed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was never set.
    #[error("Missing required setting: {field}")]
    MissingField { field: String },

    /// No backup directory was given.
    #[error("At least one backup directory is required")]
    NoDirectories,

    /// Maximum age threshold must be positive.
    #[error("Maximum backup age must be greater than zero seconds")]
    InvalidMaxAge,

    /// Minimum size threshold must be positive.
    #[error("Minimum backup size must be greater than zero bytes")]
    InvalidMinSize,

    /// Sample window must hold at least one artifact.
    #[error("Sample window must be at least 1")]
    InvalidSampleWindow,

    /// Disk percentage outside 0..=100.
    #[error("Invalid {field}: {value} (expected 0..=100)")]
    InvalidPercent { field: &'static str, value: f64 },

    /// Artifact name pattern does not compile.
    #[error("Invalid name pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::MissingField {
            field: err.field_name().to_string(),
        }
    }
}

/// Filesystem capacity query failure.
#[derive(Debug, Error)]
pub enum DiskProbeError {
    /// The underlying stat call failed.
    #[error("Cannot stat filesystem at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No probe exists for this platform.
    #[error("Disk space probing is not supported on this platform")]
    Unsupported,

    /// The filesystem reported impossible capacity numbers.
    #[error("Invalid filesystem stats: total={total} free={free}")]
    InvalidStat { total: u64, free: u64 },
}

impl DiskProbeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Per-directory analysis failure.
///
/// Captured into that directory's result; never aborts the batch.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No artifact matched the name pattern.
    #[error("No files matching pattern in {directory}")]
    EmptyScanResult { directory: PathBuf },

    /// Disk capacity could not be determined.
    #[error(transparent)]
    DiskProbe(#[from] DiskProbeError),
}
