//! Missing-Kind Tracker
//!
//! Records every node kind that went through the fallback converter. The set
//! is ordered, so the report is deterministic and free of duplicates no matter
//! how often or in which order a kind was hit.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingKinds {
    kinds: BTreeSet<&'static str>,
}

impl MissingKinds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a kind; returns `true` the first time it is seen
    pub fn record(&mut self, kind: &'static str) -> bool {
        self.kinds.insert(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kinds in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.iter().copied()
    }

    /// One kind per line, sorted, each line newline-terminated
    pub fn report(&self) -> String {
        self.iter().map(|kind| format!("{kind}\n")).collect()
    }
}

impl<'a> IntoIterator for &'a MissingKinds {
    type Item = &'static str;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, &'static str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let mut missing = MissingKinds::new();
        assert!(missing.record("Match"));
        assert!(!missing.record("Match"));
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn test_report_is_sorted() {
        let mut missing = MissingKinds::new();
        for kind in ["While", "Lambda", "Match", "AugAssign"] {
            missing.record(kind);
        }
        assert_eq!(missing.report(), "AugAssign\nLambda\nMatch\nWhile\n");
        assert!(missing.contains("Lambda"));
        assert!(!missing.contains("Call"));
    }

    #[test]
    fn test_empty_report() {
        let missing = MissingKinds::new();
        assert!(missing.is_empty());
        assert_eq!(missing.report(), "");
    }
}
