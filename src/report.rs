//! Human-readable report rendering.

use std::fmt::Write;
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone, Utc};

use backupcheck_core::{AnalysisResult, Measurements, Reason};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

/// Render the verbose section for every directory, in order.
pub fn render_details(results: &[AnalysisResult]) -> String {
    let mut out = String::new();
    for result in results {
        render_result(&mut out, result, &Local);
    }
    out
}

fn render_result<Tz>(out: &mut String, result: &AnalysisResult, tz: &Tz)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let dir = result.directory.display();

    if result.reason == Reason::NoFiles {
        let _ = writeln!(out, "\nDirectory {dir} - no matching files found\n");
        return;
    }

    let Some(m) = &result.measurements else {
        let cause = result.error.as_deref().unwrap_or("unknown cause");
        let _ = writeln!(out, "\nDirectory {dir} - {}: {cause}\n", result.reason);
        return;
    };

    let _ = writeln!(out, "\nDirectory:      {dir}");
    if let Some(latest) = &result.latest {
        let _ = writeln!(
            out,
            "Last backup:    {}  ({} ago, {:.0} s)",
            format_date(latest.modified, tz),
            age_phrase(m.age_seconds),
            m.age_seconds
        );
    }
    let _ = writeln!(out);
    render_capacity(out, m);
    let _ = writeln!(out);
}

fn render_capacity(out: &mut String, m: &Measurements) {
    let _ = writeln!(
        out,
        "Disk:           {} free / {} total ({:.1} % used)",
        format_size(m.disk.free_bytes()),
        format_size(m.disk.total_bytes()),
        m.used_percent
    );

    match &m.forecast {
        Some(forecast) => {
            let _ = writeln!(
                out,
                "Capacity:       ≈ {} backups ({} each)",
                forecast.remaining_count,
                format_size(m.mean_size_bytes)
            );
        }
        None => {
            let _ = writeln!(out, "Capacity:       unknown (sampled backups are empty)");
        }
    }

    let days = m
        .forecast
        .and_then(|f| f.remaining_duration)
        .map(|d| d.as_secs() / 86_400);

    match days {
        Some(days) if m.has_interval() => {
            let _ = writeln!(out, "Frequency:      {}", frequency_phrase(m.mean_interval_seconds));
            let _ = writeln!(out, "Forecast:       space should last ≈ {days} days");
        }
        _ if m.has_interval() => {
            let _ = writeln!(out, "Frequency:      {}", frequency_phrase(m.mean_interval_seconds));
        }
        _ => {
            let _ = writeln!(out, "Frequency:      not enough data");
        }
    }
}

/// Format size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a timestamp as e.g. `02 January 2006 at 15:04` in `tz`.
pub fn format_date<Tz>(time: SystemTime, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::<Utc>::from(time)
        .with_timezone(tz)
        .format("%d %B %Y at %H:%M")
        .to_string()
}

/// Age as whole days and hours, e.g. `1d 6h`. Future timestamps read as `0d 0h`.
pub fn age_phrase(secs: f64) -> String {
    let hours = (secs.max(0.0) / HOUR) as u64;
    format!("{}d {}h", hours / 24, hours % 24)
}

/// Describe a mean backup interval in words.
pub fn frequency_phrase(secs: f64) -> String {
    if secs < 90.0 {
        format!("about every {secs:.0} s")
    } else if secs < 90.0 * MINUTE {
        format!("about every {:.0} min", secs / MINUTE)
    } else if secs < 3.0 * HOUR {
        "about once an hour".to_string()
    } else if secs < 22.0 * HOUR {
        format!("roughly every {:.0} h", secs / HOUR)
    } else if secs < 36.0 * HOUR {
        "about once a day".to_string()
    } else if secs < 7.0 * DAY {
        format!("every {:.0} days", secs / DAY)
    } else {
        format!("every {:.1} days", secs / DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use backupcheck_core::{BackupArtifact, DiskStat, Forecast, Severity};

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn measured_result(forecast: Option<Forecast>, interval: f64) -> AnalysisResult {
        AnalysisResult {
            directory: PathBuf::from("/srv/backups"),
            severity: Severity::Ok,
            reason: Reason::Ok,
            artifact_count: 2,
            latest: Some(BackupArtifact::new("/srv/backups/db.tar", at(0), 1024)),
            measurements: Some(Measurements {
                age_seconds: 30.0 * HOUR,
                mean_interval_seconds: interval,
                mean_size_bytes: 1024,
                sample_size: 2,
                disk: DiskStat::new(4096, 2048).unwrap(),
                used_percent: 50.0,
                forecast,
            }),
            error: None,
        }
    }

    #[test]
    fn test_frequency_phrases() {
        assert_eq!(frequency_phrase(45.0), "about every 45 s");
        assert_eq!(frequency_phrase(600.0), "about every 10 min");
        assert_eq!(frequency_phrase(2.0 * HOUR), "about once an hour");
        assert_eq!(frequency_phrase(6.0 * HOUR), "roughly every 6 h");
        assert_eq!(frequency_phrase(DAY), "about once a day");
        assert_eq!(frequency_phrase(3.0 * DAY), "every 3 days");
        assert_eq!(frequency_phrase(10.0 * DAY), "every 10.0 days");
    }

    #[test]
    fn test_age_phrase() {
        assert_eq!(age_phrase(30.0 * HOUR), "1d 6h");
        assert_eq!(age_phrase(59.0), "0d 0h");
        assert_eq!(age_phrase(-500.0), "0d 0h");
    }

    #[test]
    fn test_format_date_utc() {
        assert_eq!(format_date(at(0), &Utc), "01 January 1970 at 00:00");
    }

    #[test]
    fn test_no_files_section() {
        let result = AnalysisResult {
            directory: PathBuf::from("/srv/empty"),
            severity: Severity::Unknown,
            reason: Reason::NoFiles,
            artifact_count: 0,
            latest: None,
            measurements: None,
            error: None,
        };

        let out = render_details(&[result]);

        assert!(out.contains("Directory /srv/empty - no matching files found"));
    }

    #[test]
    fn test_disk_error_section() {
        let mut result = measured_result(None, 0.0);
        result.severity = Severity::Unknown;
        result.reason = Reason::DiskError;
        result.measurements = None;
        result.error = Some("permission denied".to_string());

        let mut out = String::new();
        render_result(&mut out, &result, &Utc);

        assert!(out.contains("Directory /srv/backups - disk error: permission denied"));
        assert!(!out.contains("Last backup:"));
    }

    #[test]
    fn test_full_section_with_forecast() {
        let forecast = Forecast {
            remaining_count: 2,
            remaining_duration: Some(Duration::from_secs(2 * 86_400)),
        };
        let mut out = String::new();
        render_result(&mut out, &measured_result(Some(forecast), DAY), &Utc);

        assert!(out.contains("(1d 6h ago, 108000 s)"));
        assert!(out.contains("50.0 % used"));
        assert!(out.contains("≈ 2 backups"));
        assert!(out.contains("Frequency:      about once a day"));
        assert!(out.contains("space should last ≈ 2 days"));
    }

    #[test]
    fn test_single_sample_reports_insufficient_data() {
        let forecast = Forecast {
            remaining_count: 2,
            remaining_duration: None,
        };
        let mut out = String::new();
        render_result(&mut out, &measured_result(Some(forecast), 0.0), &Utc);

        assert!(out.contains("Frequency:      not enough data"));
        assert!(!out.contains("Forecast:"));
    }
}
