//! JWalk-based backup artifact scanner.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use backupcheck_core::BackupArtifact;

use crate::pattern::{NamePattern, PatternError};

/// Artifacts found under one directory, newest first.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Matched artifacts sorted by modification time, descending.
    pub artifacts: Vec<BackupArtifact>,
    /// Entries that could not be read and were skipped.
    pub skipped: usize,
}

impl ScanOutcome {
    /// Newest matched artifact.
    pub fn latest(&self) -> Option<&BackupArtifact> {
        self.artifacts.first()
    }

    /// The `window` most recent artifacts.
    pub fn sample(&self, window: usize) -> &[BackupArtifact] {
        &self.artifacts[..window.min(self.artifacts.len())]
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Number of matched artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }
}

/// Recursive scanner matching file names against a [`NamePattern`].
#[derive(Debug, Clone)]
pub struct ArtifactScanner {
    pattern: NamePattern,
}

impl ArtifactScanner {
    /// Create a scanner from a raw name pattern.
    pub fn new(raw_pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::with_pattern(NamePattern::new(raw_pattern)?))
    }

    /// Create a scanner from an already compiled pattern.
    pub fn with_pattern(pattern: NamePattern) -> Self {
        Self { pattern }
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    /// Walk `root` and collect matching artifacts.
    ///
    /// Never fails: unreadable entries are counted in
    /// [`ScanOutcome::skipped`] and a missing root yields an empty outcome.
    pub fn scan(&self, root: &Path) -> ScanOutcome {
        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(0);

        let mut outcome = ScanOutcome::default();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    outcome.skipped += 1;
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !self.pattern.is_match(entry.file_name()) {
                continue;
            }

            let path = entry.path();
            let metadata = if file_type.is_symlink() {
                // Describe a link by its target; broken links fall through to skipped.
                std::fs::metadata(&path)
            } else {
                std::fs::symlink_metadata(&path)
            };

            match metadata.and_then(|m| describe(path.clone(), &m)) {
                Ok(Some(artifact)) => outcome.artifacts.push(artifact),
                Ok(None) => {}
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping entry");
                    outcome.skipped += 1;
                }
            }
        }

        outcome.artifacts.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.path.cmp(&b.path))
        });

        debug!(
            root = %root.display(),
            matched = outcome.artifacts.len(),
            skipped = outcome.skipped,
            "scan complete"
        );

        outcome
    }
}

/// Turn a regular file into an artifact; anything else yields `None`.
fn describe(path: PathBuf, metadata: &Metadata) -> std::io::Result<Option<BackupArtifact>> {
    if !metadata.is_file() {
        return Ok(None);
    }
    let modified = metadata.modified()?;
    Ok(Some(BackupArtifact::new(path, modified, metadata.len())))
}
