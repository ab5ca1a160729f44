// src/config/ignore.rs

//! The ignore set: fixed defaults merged with `.raptorignore`.

use std::path::Path;

use tracing::debug;

use crate::fs::FileSystem;

/// Patterns that are always ignored.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["bin", ".git", "tmp", "vendor"];

/// Optional ignore file in the project root.
pub const IGNORE_FILE: &str = ".raptorignore";

/// Ordered, de-duplicated list of ignore patterns.
///
/// Defaults come first, then user patterns in file order. A pattern that
/// contains a path separator is a literal relative path; anything else is a
/// glob matched against a path's final segment (see
/// [`crate::watch::filter`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: Vec<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IgnoreSet {
    /// Defaults extended with the patterns found in `contents`.
    pub fn from_ignore_file(contents: &str) -> Self {
        let mut set = Self::default();
        set.extend_from_ignore_file(contents);
        set
    }

    /// Append one pattern unless it is already present.
    pub fn push(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if self.patterns.contains(&pattern) {
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    /// Parse ignore-file text: one pattern per line, surrounding whitespace
    /// trimmed, blank lines and `#` comments skipped.
    pub fn extend_from_ignore_file(&mut self, contents: &str) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.push(line);
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Build the ignore set for `root`, reading `.raptorignore` when present.
///
/// An unreadable or missing ignore file leaves just the defaults.
pub fn load_ignore_set(fs: &dyn FileSystem, root: &Path) -> IgnoreSet {
    let path = root.join(IGNORE_FILE);
    let mut set = IgnoreSet::default();

    match fs.read_to_string(&path) {
        Ok(contents) => {
            set.extend_from_ignore_file(&contents);
            debug!(file = ?path, patterns = ?set.patterns(), "loaded ignore file");
        }
        Err(err) => {
            debug!(file = ?path, error = %err, "no ignore file; using defaults");
        }
    }

    set
}
