//! Per-directory analysis results and the aggregate verdict.

use std::path::PathBuf;
use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::artifact::{BackupArtifact, DiskStat};
use crate::severity::{Reason, Severity};

/// Projected runway before free space runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    /// How many more backups of average size fit in free space.
    pub remaining_count: u64,
    /// How long those backups last at the average interval.
    ///
    /// `None` when there is no interval history to extrapolate from.
    pub remaining_duration: Option<Duration>,
}

/// Numbers derived for a directory whose scan and disk probe both succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Seconds since the newest artifact was modified (negative if in the future).
    pub age_seconds: f64,
    /// Mean gap between consecutive sampled artifacts; `0.0` means insufficient data.
    pub mean_interval_seconds: f64,
    /// Mean size of the sampled artifacts.
    pub mean_size_bytes: u64,
    /// Number of artifacts in the sample window.
    pub sample_size: usize,
    /// Capacity of the hosting filesystem.
    pub disk: DiskStat,
    /// Percentage of the filesystem in use.
    pub used_percent: f64,
    /// Runway projection, absent when the mean size is zero.
    pub forecast: Option<Forecast>,
}

impl Measurements {
    /// Whether the sample held enough artifacts to estimate a frequency.
    pub fn has_interval(&self) -> bool {
        self.mean_interval_seconds > 0.0
    }
}

/// Outcome of analyzing a single backup directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Directory that was analyzed.
    pub directory: PathBuf,
    /// Classification.
    pub severity: Severity,
    /// Rule that produced the classification.
    pub reason: Reason,
    /// Total artifacts matched, before sampling.
    pub artifact_count: usize,
    /// Newest artifact, when any matched.
    pub latest: Option<BackupArtifact>,
    /// Derived statistics, when the scan found artifacts and the disk probe succeeded.
    pub measurements: Option<Measurements>,
    /// Description of the failure behind an `Unknown` result.
    pub error: Option<String>,
}

impl AnalysisResult {
    /// One-line `[dir] reason` fragment for summaries.
    pub fn summary(&self) -> String {
        format!("[{}] {}", self.directory.display(), self.reason)
    }
}

/// Most severe result across all directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallVerdict {
    /// Maximum severity over every directory.
    pub severity: Severity,
    /// Per-directory `[dir] reason` fragments joined with `", "`, in input order.
    pub reasons: String,
}

impl OverallVerdict {
    /// Aggregate per-directory results.
    ///
    /// The merge is a plain maximum, so result order only affects `reasons`.
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let severity = results
            .iter()
            .map(|r| r.severity)
            .max()
            .unwrap_or_default();
        let reasons = results.iter().map(AnalysisResult::summary).join(", ");
        Self { severity, reasons }
    }

    /// Monitoring summary line, e.g. `CRITICAL: [/srv/db] backup too old`.
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.severity, self.reasons)
    }
}

/// Everything one check run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Aggregate verdict.
    pub verdict: OverallVerdict,
    /// Per-directory results in configuration order.
    pub results: Vec<AnalysisResult>,
}

impl CheckReport {
    /// Build a report, deriving the verdict from `results`.
    pub fn new(results: Vec<AnalysisResult>) -> Self {
        Self {
            verdict: OverallVerdict::from_results(&results),
            results,
        }
    }

    /// Overall severity.
    pub fn severity(&self) -> Severity {
        self.verdict.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(dir: &str, severity: Severity, reason: Reason) -> AnalysisResult {
        AnalysisResult {
            directory: PathBuf::from(dir),
            severity,
            reason,
            artifact_count: 0,
            latest: None,
            measurements: None,
            error: None,
        }
    }

    #[test]
    fn test_verdict_takes_maximum() {
        let results = vec![
            result("/a", Severity::Ok, Reason::Ok),
            result("/b", Severity::Warning, Reason::DiskFull { used_percent: 85.0 }),
        ];
        let verdict = OverallVerdict::from_results(&results);
        assert_eq!(verdict.severity, Severity::Warning);
        assert_eq!(verdict.reasons, "[/a] OK, [/b] disk 85.0% full");
    }

    #[test]
    fn test_verdict_empty_is_ok() {
        let verdict = OverallVerdict::from_results(&[]);
        assert_eq!(verdict.severity, Severity::Ok);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_summary_line() {
        let verdict =
            OverallVerdict::from_results(&[result("/srv", Severity::Unknown, Reason::NoFiles)]);
        assert_eq!(verdict.summary_line(), "UNKNOWN: [/srv] no files");
    }

    #[test]
    fn test_report_derives_verdict() {
        let report = CheckReport::new(vec![
            result("/a", Severity::Critical, Reason::TooOld),
            result("/b", Severity::Ok, Reason::Ok),
        ]);
        assert_eq!(report.severity(), Severity::Critical);
        assert_eq!(report.results.len(), 2);
    }
}
