//! Severity levels and the reasons behind them.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health classification, totally ordered `Ok < Warning < Critical < Unknown`.
///
/// `Unknown` sorts above `Critical`: an unanalyzable directory dominates the
/// aggregate verdict. This follows the monitoring status-code numbering and
/// is kept for compatibility with supervisors that compare codes numerically.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Conventional monitoring-plugin exit status.
    pub fn exit_code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }
}

/// Why a directory received its severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Reason {
    /// Every check passed.
    Ok,
    /// No artifact matched the pattern.
    NoFiles,
    /// Disk capacity could not be determined.
    DiskError,
    /// Newest artifact exceeds the age threshold.
    TooOld,
    /// Newest artifact is at or below the size threshold.
    TooSmall,
    /// Disk usage crossed a threshold.
    DiskFull { used_percent: f64 },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Ok => f.write_str("OK"),
            Reason::NoFiles => f.write_str("no files"),
            Reason::DiskError => f.write_str("disk error"),
            Reason::TooOld => f.write_str("backup too old"),
            Reason::TooSmall => f.write_str("backup too small"),
            Reason::DiskFull { used_percent } => write!(f, "disk {used_percent:.1}% full"),
        }
    }
}
