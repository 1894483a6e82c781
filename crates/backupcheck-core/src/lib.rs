//! Core types for backupcheck.
//!
//! This crate holds the data model shared by the scanner, the analysis
//! engine and the command-line front end: backup artifacts, disk capacity,
//! severity levels, per-directory results and the check configuration.

mod artifact;
mod config;
mod error;
mod result;
mod severity;

pub use artifact::{BackupArtifact, DiskStat};
pub use config::{
    CheckConfig, CheckConfigBuilder, Thresholds, DEFAULT_CRITICAL_DISK_PERCENT,
    DEFAULT_NAME_PATTERN, DEFAULT_SAMPLE_WINDOW, DEFAULT_WARNING_DISK_PERCENT,
};
pub use error::{AnalysisError, ConfigError, DiskProbeError};
pub use result::{AnalysisResult, CheckReport, Forecast, Measurements, OverallVerdict};
pub use severity::{Reason, Severity};
