// src/watch/filter.rs

//! Ignore-pattern matching.
//!
//! Two kinds of pattern:
//! - one containing a path separator is a literal relative path and only
//!   matches that exact path (`internal/gen` ignores `internal/gen`, nothing
//!   else);
//! - anything else is a glob tested against the final path segment only
//!   (`*.log` ignores `a/b/c.log`, `bin` ignores `bin` and `x/bin`).
//!
//! A glob that fails to compile never matches. A typo in `.raptorignore`
//! must not stop the dev server.

use std::path::MAIN_SEPARATOR;

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

use crate::config::IgnoreSet;

/// Decide whether `rel_path` is ignored by any of `patterns`.
///
/// `rel_path` is relative to the project root and uses `/` separators, as
/// produced by [`crate::watch::path_utils::relative_str`]. Pure: compiles the
/// patterns on every call; use [`PathFilter`] on hot paths.
pub fn should_ignore(rel_path: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| Rule::compile(pattern).matches(rel_path))
}

/// Final segment of a `/`-separated relative path.
pub fn base_name(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}

#[derive(Debug, Clone)]
enum Rule {
    Literal(String),
    Glob(GlobMatcher),
    Invalid,
}

impl Rule {
    fn compile(pattern: &str) -> Self {
        if is_path_literal(pattern) {
            return Rule::Literal(normalize_separators(pattern));
        }

        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => Rule::Glob(glob.compile_matcher()),
            Err(_) => Rule::Invalid,
        }
    }

    fn matches(&self, rel_path: &str) -> bool {
        match self {
            Rule::Literal(literal) => literal == rel_path,
            Rule::Glob(matcher) => matcher.is_match(base_name(rel_path)),
            Rule::Invalid => false,
        }
    }
}

fn is_path_literal(pattern: &str) -> bool {
    pattern.contains('/') || pattern.contains(MAIN_SEPARATOR)
}

fn normalize_separators(pattern: &str) -> String {
    pattern.replace(MAIN_SEPARATOR, "/")
}

/// Precompiled form of an [`IgnoreSet`], immutable for one watch session.
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: Vec<Rule>,
}

impl PathFilter {
    pub fn new(ignore: &IgnoreSet) -> Self {
        Self::from_patterns(ignore.patterns())
    }

    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Self {
        let rules = patterns
            .iter()
            .map(|p| {
                let rule = Rule::compile(p.as_ref());
                if matches!(rule, Rule::Invalid) {
                    warn!(pattern = %p.as_ref(), "invalid ignore pattern; it will never match");
                }
                rule
            })
            .collect();
        Self { rules }
    }

    /// A filter that ignores nothing.
    pub fn allow_all() -> Self {
        Self { rules: Vec::new() }
    }

    /// Whether this exact path is ignored.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(rel_path))
    }

    /// Whether the path or any directory above it (below the root) is
    /// ignored.
    pub fn is_ignored_or_within(&self, rel_path: &str) -> bool {
        let mut end = 0;
        for segment in rel_path.split('/') {
            end += segment.len();
            if !segment.is_empty() && self.is_ignored(&rel_path[..end]) {
                return true;
            }
            end += 1;
        }
        false
    }
}
