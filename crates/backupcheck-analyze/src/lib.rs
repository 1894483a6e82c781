//! Backup analysis engine for backupcheck.
//!
//! Given one or more backup directories, decides whether the newest backup
//! is fresh and large enough and whether the hosting filesystem has room
//! left, then aggregates the per-directory severities into one verdict.
//!
//! The pipeline for each directory:
//!
//! 1. Scan for artifacts matching the name pattern (newest first)
//! 2. Aggregate recency, mean size and mean interval over the sample window
//! 3. Probe filesystem capacity
//! 4. Forecast how many backups (and how much time) the free space covers
//! 5. Classify against the configured thresholds
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use backupcheck_analyze::{AnalysisEngine, default_probe};
//! use backupcheck_core::CheckConfig;
//!
//! let config = CheckConfig::builder()
//!     .directories(vec![PathBuf::from("/var/backups")])
//!     .name_pattern("nightly")
//!     .max_age(86_400u64)
//!     .min_size(1_048_576u64)
//!     .build()
//!     .unwrap();
//!
//! let engine = AnalysisEngine::with_probe(config, default_probe()).unwrap();
//! let report = engine.analyze_all();
//!
//! println!("{}", report.verdict.summary_line());
//! ```

mod classify;
mod clock;
mod engine;
mod forecast;
mod probe;
mod stats;

pub use classify::{classify, Classification, Evidence};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::AnalysisEngine;
pub use forecast::forecast;
#[cfg(unix)]
pub use probe::StatvfsProbe;
pub use probe::{default_probe, DiskSpaceProbe, UnsupportedProbe};
pub use stats::{aggregate, SampleStats};

// Re-export core types
pub use backupcheck_core::{
    AnalysisResult, BackupArtifact, CheckConfig, CheckReport, DiskStat, Forecast, Measurements,
    OverallVerdict, Reason, Severity, Thresholds,
};
