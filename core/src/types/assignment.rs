use super::{Split, StudyKey};
use std::collections::{BTreeMap, BTreeSet};

/// Partition assignment read from an official split file
///
/// Maps split names to the identifier pairs of that split, in file order.
/// Split names are kept verbatim, so names other than train/dev/test are
/// preserved and counted in [`SplitAssignment::total`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitAssignment {
    splits: BTreeMap<String, Vec<StudyKey>>,
    total: usize,
}

impl SplitAssignment {
    /// Creates an empty assignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an identifier pair to the named split
    ///
    /// Duplicates are kept.
    pub fn push(&mut self, split: impl Into<String>, key: StudyKey) {
        self.splits.entry(split.into()).or_default().push(key);
        self.total += 1;
    }

    /// Returns the pairs assigned to a split name, empty if the name is absent
    pub fn ids(&self, split: &str) -> &[StudyKey] {
        self.splits.get(split).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the pairs assigned to a requestable split
    pub fn split_ids(&self, split: Split) -> &[StudyKey] {
        self.ids(split.simple_name())
    }

    /// Total number of rows read from the split file
    pub fn total(&self) -> usize {
        self.total
    }

    /// Iterates over split names and their pairs, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[StudyKey])> {
        self.splits.iter().map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    /// Distinct identifier pairs of the given splits
    pub fn unique_keys(&self, splits: &[Split]) -> BTreeSet<StudyKey> {
        splits
            .iter()
            .flat_map(|split| self.split_ids(*split).iter().cloned())
            .collect()
    }
}
