//! Exclusion patterns for the source copy.
//!
//! Matching is plain substring containment on the full source path, not
//! path-segment or glob matching: `Ad` excludes `x/AdView.smali` as well as
//! `x/ListAdapter.smali`.

use std::path::Path;

use itertools::Itertools;

/// Ordered, de-duplicated set of substring patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: Vec<String>,
}

impl ExclusionSet {
    /// Parse a comma separated list: `"Ad, Tracker,,Ad"` -> `["Ad", "Tracker"]`.
    pub fn parse(raw: &str) -> Self {
        Self::from_patterns(raw.split(','))
    }

    /// Trim each pattern, drop empty ones, keep first occurrence of duplicates.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .unique()
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if any pattern is a substring of `path`.
    pub fn matches(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.patterns.iter().any(|p| path.contains(p.as_str()))
    }
}
