//! Check configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of recent artifacts used for averaging.
pub const DEFAULT_SAMPLE_WINDOW: usize = 10;

/// Default disk usage percentage that raises a warning.
pub const DEFAULT_WARNING_DISK_PERCENT: f64 = 80.0;

/// Default disk usage percentage that raises a critical alert.
pub const DEFAULT_CRITICAL_DISK_PERCENT: f64 = 90.0;

/// Default artifact name pattern (every file).
pub const DEFAULT_NAME_PATTERN: &str = "*";

/// Immutable configuration for one check run.
///
/// Built once at the process boundary and handed to the analysis engine;
/// nothing in the engine mutates it.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "ConfigError")
)]
pub struct CheckConfig {
    /// Backup directories to analyze, in reporting order.
    pub directories: Vec<PathBuf>,

    /// Shell-glob pattern matched against artifact file names.
    ///
    /// A pattern without glob metacharacters is treated as a substring match.
    #[builder(default = "DEFAULT_NAME_PATTERN.to_string()")]
    #[serde(default = "default_name_pattern")]
    pub name_pattern: String,

    /// Newest artifact older than this many seconds is critical.
    pub max_age: u64,

    /// Newest artifact at or below this many bytes is critical.
    pub min_size: u64,

    /// Number of most recent artifacts used for size and interval averages.
    #[builder(default = "DEFAULT_SAMPLE_WINDOW")]
    #[serde(default = "default_sample_window")]
    pub sample_window: usize,

    /// Disk usage percentage (inclusive) that raises a warning.
    #[builder(default = "DEFAULT_WARNING_DISK_PERCENT")]
    #[serde(default = "default_warning_disk_percent")]
    pub warning_disk_percent: f64,

    /// Disk usage percentage (inclusive) that raises a critical alert.
    #[builder(default = "DEFAULT_CRITICAL_DISK_PERCENT")]
    #[serde(default = "default_critical_disk_percent")]
    pub critical_disk_percent: f64,
}

fn default_name_pattern() -> String {
    DEFAULT_NAME_PATTERN.to_string()
}

fn default_sample_window() -> usize {
    DEFAULT_SAMPLE_WINDOW
}

fn default_warning_disk_percent() -> f64 {
    DEFAULT_WARNING_DISK_PERCENT
}

fn default_critical_disk_percent() -> f64 {
    DEFAULT_CRITICAL_DISK_PERCENT
}

impl CheckConfigBuilder {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref directories) = self.directories {
            if directories.is_empty() {
                return Err(ConfigError::NoDirectories);
            }
        }
        if let Some(max_age) = self.max_age {
            check_max_age(max_age)?;
        }
        if let Some(min_size) = self.min_size {
            check_min_size(min_size)?;
        }
        check_sample_window(self.sample_window.unwrap_or(DEFAULT_SAMPLE_WINDOW))?;
        check_percent(
            "warning_disk_percent",
            self.warning_disk_percent
                .unwrap_or(DEFAULT_WARNING_DISK_PERCENT),
        )?;
        check_percent(
            "critical_disk_percent",
            self.critical_disk_percent
                .unwrap_or(DEFAULT_CRITICAL_DISK_PERCENT),
        )
    }
}

impl CheckConfig {
    /// Create a new config builder.
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Re-check every invariant.
    ///
    /// Needed for configs that bypassed the builder (deserialized or
    /// constructed literally).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directories.is_empty() {
            return Err(ConfigError::NoDirectories);
        }
        check_max_age(self.max_age)?;
        check_min_size(self.min_size)?;
        check_sample_window(self.sample_window)?;
        check_percent("warning_disk_percent", self.warning_disk_percent)?;
        check_percent("critical_disk_percent", self.critical_disk_percent)
    }

    /// Thresholds consumed by the classifier.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            max_age: self.max_age,
            min_size: self.min_size,
            warning_disk_percent: self.warning_disk_percent,
            critical_disk_percent: self.critical_disk_percent,
        }
    }
}

/// Classification thresholds, split out of [`CheckConfig`] so the
/// classifier does not depend on scan settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Maximum artifact age in seconds.
    pub max_age: u64,
    /// Minimum artifact size in bytes (exclusive).
    pub min_size: u64,
    /// Warning disk usage percentage.
    pub warning_disk_percent: f64,
    /// Critical disk usage percentage.
    pub critical_disk_percent: f64,
}

fn check_max_age(max_age: u64) -> Result<(), ConfigError> {
    if max_age == 0 {
        return Err(ConfigError::InvalidMaxAge);
    }
    Ok(())
}

fn check_min_size(min_size: u64) -> Result<(), ConfigError> {
    if min_size == 0 {
        return Err(ConfigError::InvalidMinSize);
    }
    Ok(())
}

fn check_sample_window(window: usize) -> Result<(), ConfigError> {
    if window == 0 {
        return Err(ConfigError::InvalidSampleWindow);
    }
    Ok(())
}

fn check_percent(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::InvalidPercent { field, value });
    }
    Ok(())
}
