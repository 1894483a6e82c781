use backupcheck_core::{
    AnalysisResult, CheckConfig, CheckReport, ConfigError, DiskStat, Reason, Severity,
};
use std::path::PathBuf;

fn result(dir: &str, severity: Severity, reason: Reason) -> AnalysisResult {
    AnalysisResult {
        directory: PathBuf::from(dir),
        severity,
        reason,
        artifact_count: 1,
        latest: None,
        measurements: None,
        error: None,
    }
}

#[test]
fn test_config_deserialize_applies_defaults() {
    let json = r#"{
        "directories": ["/srv/backups"],
        "max_age": 86400,
        "min_size": 1048576
    }"#;

    let config: CheckConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.name_pattern, "*");
    assert_eq!(config.sample_window, 10);
    assert_eq!(config.warning_disk_percent, 80.0);
    assert_eq!(config.critical_disk_percent, 90.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_deserialized_config_still_validated() {
    let json = r#"{ "directories": [], "max_age": 86400, "min_size": 1 }"#;

    let config: CheckConfig = serde_json::from_str(json).unwrap();

    assert!(matches!(config.validate(), Err(ConfigError::NoDirectories)));
}

#[test]
fn test_thresholds_from_config() {
    let config = CheckConfig::builder()
        .directories(vec![PathBuf::from("/srv")])
        .max_age(3600u64)
        .min_size(512u64)
        .warning_disk_percent(70.0f64)
        .build()
        .unwrap();

    let thresholds = config.thresholds();
    assert_eq!(thresholds.max_age, 3600);
    assert_eq!(thresholds.min_size, 512);
    assert_eq!(thresholds.warning_disk_percent, 70.0);
    assert_eq!(thresholds.critical_disk_percent, 90.0);
}

#[test]
fn test_severity_exit_codes_follow_order() {
    let all = [
        Severity::Ok,
        Severity::Warning,
        Severity::Critical,
        Severity::Unknown,
    ];
    for pair in all.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[0].exit_code() < pair[1].exit_code());
    }
    assert_eq!(Severity::Unknown.exit_code(), 3);
}

#[test]
fn test_unknown_dominates_any_order() {
    let a = result("/a", Severity::Critical, Reason::TooOld);
    let b = result("/b", Severity::Unknown, Reason::NoFiles);

    let forward = CheckReport::new(vec![a.clone(), b.clone()]);
    let backward = CheckReport::new(vec![b, a]);

    assert_eq!(forward.severity(), Severity::Unknown);
    assert_eq!(backward.severity(), Severity::Unknown);
}

#[test]
fn test_report_json_shape() {
    let report = CheckReport::new(vec![result(
        "/srv",
        Severity::Warning,
        Reason::DiskFull { used_percent: 85.5 },
    )]);

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["verdict"]["severity"], "WARNING");
    assert_eq!(value["results"][0]["reason"]["code"], "disk_full");
    assert_eq!(value["results"][0]["reason"]["used_percent"], 85.5);
}

#[test]
fn test_disk_stat_accessors() {
    let stat = DiskStat::new(2_000, 500).unwrap();
    assert_eq!(stat.total_bytes(), 2_000);
    assert_eq!(stat.free_bytes(), 500);
    assert_eq!(stat.used_bytes(), 1_500);
    assert_eq!(stat.used_percent(), 75.0);
}
