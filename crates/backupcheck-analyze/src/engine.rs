//! Per-directory pipeline and multi-directory aggregation.

use std::path::Path;

use tracing::{debug, info, warn};

use backupcheck_core::{
    AnalysisError, AnalysisResult, CheckConfig, CheckReport, ConfigError, Measurements,
};
use backupcheck_scan::ArtifactScanner;

use crate::classify::{classify, Classification, Evidence};
use crate::clock::{Clock, SystemClock};
use crate::forecast::forecast;
use crate::probe::DiskSpaceProbe;
use crate::stats::aggregate;

/// Runs scan, statistics, disk probe, forecast and classification for each
/// configured directory.
///
/// Directories are analyzed one after another and never share state; a
/// failure in one is recorded in its own result.
pub struct AnalysisEngine<P, C = SystemClock> {
    config: CheckConfig,
    scanner: ArtifactScanner,
    probe: P,
    clock: C,
}

impl<P: DiskSpaceProbe> AnalysisEngine<P, SystemClock> {
    /// Create an engine reading the real wall clock.
    pub fn with_probe(config: CheckConfig, probe: P) -> Result<Self, ConfigError> {
        Self::new(config, probe, SystemClock)
    }
}

impl<P: DiskSpaceProbe, C: Clock> AnalysisEngine<P, C> {
    /// Validate the configuration and compile the name pattern.
    ///
    /// This is the only place a [`ConfigError`] can surface; once built,
    /// the engine reports every problem per directory.
    pub fn new(config: CheckConfig, probe: P, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let scanner =
            ArtifactScanner::new(&config.name_pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: e.pattern.clone(),
                message: e.source.to_string(),
            })?;
        debug!(pattern = scanner.pattern().as_str(), "compiled name pattern");

        Ok(Self {
            config,
            scanner,
            probe,
            clock,
        })
    }

    /// Analyze every configured directory and aggregate the verdict.
    ///
    /// Results keep the configured directory order.
    pub fn analyze_all(&self) -> CheckReport {
        let results = self
            .config
            .directories
            .iter()
            .map(|dir| self.analyze_directory(dir))
            .collect();
        let report = CheckReport::new(results);
        info!(severity = %report.severity(), "check complete");
        report
    }

    /// Analyze a single directory.
    pub fn analyze_directory(&self, directory: &Path) -> AnalysisResult {
        let thresholds = self.config.thresholds();
        let outcome = self.scanner.scan(directory);
        let artifact_count = outcome.len();

        let Some(stats) = aggregate(outcome.sample(self.config.sample_window), self.clock.now())
        else {
            let err = AnalysisError::EmptyScanResult {
                directory: directory.to_path_buf(),
            };
            warn!(error = %err, "no artifacts");
            return finish(directory, classify(&Evidence::NoFiles, &thresholds), |result| {
                result.artifact_count = artifact_count;
            });
        };

        let disk = match self.probe.probe(directory) {
            Ok(disk) => disk,
            Err(err) => {
                let err = AnalysisError::from(err);
                warn!(directory = %directory.display(), error = %err, "disk probe failed");
                return finish(directory, classify(&Evidence::DiskError, &thresholds), |result| {
                    result.artifact_count = artifact_count;
                    result.latest = Some(stats.latest);
                    result.error = Some(err.to_string());
                });
            }
        };

        let used_percent = disk.used_percent();
        let evidence = Evidence::Measured {
            age_seconds: stats.age_seconds,
            latest_size: stats.latest.size,
            used_percent,
        };
        let classification = classify(&evidence, &thresholds);

        let measurements = Measurements {
            age_seconds: stats.age_seconds,
            mean_interval_seconds: stats.mean_interval_seconds,
            mean_size_bytes: stats.mean_size_bytes,
            sample_size: stats.sample_size,
            disk,
            used_percent,
            forecast: forecast(
                disk.free_bytes(),
                stats.mean_size_bytes,
                stats.mean_interval_seconds,
            ),
        };

        finish(directory, classification, |result| {
            result.artifact_count = artifact_count;
            result.latest = Some(stats.latest);
            result.measurements = Some(measurements);
        })
    }
}

/// Build a result from a classification and fill in whatever is known.
fn finish(
    directory: &Path,
    classification: Classification,
    fill: impl FnOnce(&mut AnalysisResult),
) -> AnalysisResult {
    let mut result = AnalysisResult {
        directory: directory.to_path_buf(),
        severity: classification.severity,
        reason: classification.reason,
        artifact_count: 0,
        latest: None,
        measurements: None,
        error: None,
    };
    fill(&mut result);
    info!(
        directory = %directory.display(),
        severity = %result.severity,
        reason = %result.reason,
        "directory analyzed"
    );
    result
}
