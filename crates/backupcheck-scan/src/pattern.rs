//! Artifact name patterns.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;

/// Characters that make a pattern a glob rather than a plain substring.
const GLOB_METACHARS: &[char] = &['*', '?', '['];

/// A pattern that failed to compile.
#[derive(Debug, Error)]
#[error("Invalid glob pattern {pattern:?}: {source}")]
pub struct PatternError {
    /// The pattern after substring expansion.
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

/// Expand a plain string into a substring glob.
///
/// Patterns that already contain `*`, `?` or `[` are kept as globs, with
/// braces made literal. Anything else is matched as a literal substring.
pub fn auto_glob(raw: &str) -> String {
    if raw.contains(GLOB_METACHARS) {
        literal_braces(raw)
    } else {
        format!("*{}*", escape_literal(raw))
    }
}

/// Escape every character globset would treat specially.
fn escape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '{' | '}' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape `{` and `}` outside character classes; only `*`, `?` and `[...]`
/// carry meaning in a name pattern.
fn literal_braces(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());
    let mut chars = glob.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                if let Some(neg) = chars.next_if(|n| matches!(*n, '!' | '^')) {
                    out.push(neg);
                }
                // A leading `]` is a class member, not the terminator.
                if let Some(close) = chars.next_if_eq(&']') {
                    out.push(close);
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Compiled matcher for artifact base names.
#[derive(Debug, Clone)]
pub struct NamePattern {
    glob: String,
    matcher: GlobMatcher,
}

impl NamePattern {
    /// Compile a raw pattern, applying substring expansion first.
    pub fn new(raw: &str) -> Result<Self, PatternError> {
        let glob = auto_glob(raw);
        let matcher = GlobBuilder::new(&glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|source| PatternError {
                pattern: glob.clone(),
                source,
            })?
            .compile_matcher();
        Ok(Self { glob, matcher })
    }

    /// The glob actually used for matching.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Check a file name (not a full path) against the pattern.
    pub fn is_match(&self, name: impl AsRef<Path>) -> bool {
        self.matcher.is_match(name)
    }
}
