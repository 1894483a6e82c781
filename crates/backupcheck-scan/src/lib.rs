//! Backup artifact discovery for backupcheck.
//!
//! Walks a backup directory tree with jwalk and returns every regular file
//! whose base name matches a shell-glob pattern, newest first.
//!
//! - **Glob matching** via globset, against the file name only
//! - **Substring shorthand**: a pattern without `*`, `?` or `[` matches
//!   anywhere in the name (`db` behaves like `*db*`)
//! - **Lenient traversal**: unreadable entries and broken symlinks are
//!   skipped, a missing directory simply yields no artifacts
//!
//! # Example
//!
//! ```rust,no_run
//! use backupcheck_scan::ArtifactScanner;
//!
//! let scanner = ArtifactScanner::new("nightly").unwrap();
//! let outcome = scanner.scan("/var/backups".as_ref());
//!
//! if let Some(latest) = outcome.latest() {
//!     println!("Newest backup: {}", latest.path.display());
//! }
//! ```

mod pattern;
mod scanner;

pub use pattern::{auto_glob, NamePattern, PatternError};
pub use scanner::{ArtifactScanner, ScanOutcome};

// Re-export core types for convenience
pub use backupcheck_core::BackupArtifact;
