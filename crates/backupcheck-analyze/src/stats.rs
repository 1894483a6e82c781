//! Recency, size and frequency statistics over a sample window.

use std::time::SystemTime;

use backupcheck_core::BackupArtifact;

/// Statistics derived from the most recent artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStats {
    /// Newest artifact in the sample.
    pub latest: BackupArtifact,
    /// Seconds between `latest.modified` and the evaluation time.
    pub age_seconds: f64,
    /// Integer mean of the sampled sizes.
    pub mean_size_bytes: u64,
    /// Mean gap between consecutive artifacts, `0.0` for a single-artifact sample.
    pub mean_interval_seconds: f64,
    /// Number of artifacts the averages were taken over.
    pub sample_size: usize,
}

/// Aggregate a recency-sorted sample (newest first).
///
/// Returns `None` for an empty sample.
pub fn aggregate(sample: &[BackupArtifact], now: SystemTime) -> Option<SampleStats> {
    let latest = sample.first()?;

    let total_size: u128 = sample.iter().map(|a| u128::from(a.size)).sum();
    let mean_size_bytes = u64::try_from(total_size / sample.len() as u128).unwrap_or(u64::MAX);

    let mean_interval_seconds = if sample.len() > 1 {
        let total_gap: f64 = sample
            .windows(2)
            .map(|pair| signed_seconds(pair[0].modified, pair[1].modified))
            .sum();
        total_gap / (sample.len() - 1) as f64
    } else {
        0.0
    };

    Some(SampleStats {
        latest: latest.clone(),
        age_seconds: signed_seconds(now, latest.modified),
        mean_size_bytes,
        mean_interval_seconds,
        sample_size: sample.len(),
    })
}

/// `later - earlier` in seconds, negative when `later` precedes `earlier`.
fn signed_seconds(later: SystemTime, earlier: SystemTime) -> f64 {
    match later.duration_since(earlier) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(err) => -err.duration().as_secs_f64(),
    }
}
