//! Linear projection of remaining disk runway.

use std::time::Duration;

use backupcheck_core::Forecast;

/// Project how many more backups fit in `free_bytes` and how long they last.
///
/// Returns `None` when `mean_size_bytes` is zero, since no count can be
/// derived. The duration is `None` unless `mean_interval_seconds` is positive.
pub fn forecast(free_bytes: u64, mean_size_bytes: u64, mean_interval_seconds: f64) -> Option<Forecast> {
    if mean_size_bytes == 0 {
        return None;
    }
    let remaining_count = free_bytes / mean_size_bytes;

    let remaining_duration = (mean_interval_seconds > 0.0).then(|| {
        let secs = remaining_count as f64 * mean_interval_seconds;
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    });

    Some(Forecast {
        remaining_count,
        remaining_duration,
    })
}
