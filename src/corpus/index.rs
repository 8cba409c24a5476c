//! Age-grouped index over the loaded corpus
//!
//! Built once at startup and read-only afterwards, so sampling during
//! generation never touches a lock.

use ahash::AHashMap;

use super::entry::{CorpusEntry, SourceKind};

/// Read-only view of the corpus, grouped by age label
pub struct CorpusIndex {
    by_age: AHashMap<u8, Vec<CorpusEntry>>,
    total: usize,
}

impl CorpusIndex {
    pub fn from_entries(entries: Vec<CorpusEntry>) -> Self {
        let total = entries.len();
        let mut by_age: AHashMap<u8, Vec<CorpusEntry>> = AHashMap::new();
        for entry in entries {
            by_age.entry(entry.age).or_default().push(entry);
        }
        Self { by_age, total }
    }

    /// All entries for an age, empty when the age is unknown
    pub fn entries_for_age(&self, age: u8) -> &[CorpusEntry] {
        self.by_age.get(&age).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Summary-tagged entries for an age (the generation fallback tier)
    pub fn summaries_for_age(&self, age: u8) -> Vec<&CorpusEntry> {
        self.entries_for_age(age)
            .iter()
            .filter(|entry| entry.kind == SourceKind::Summary)
            .collect()
    }

    /// Age labels present in the corpus, ascending
    pub fn ages(&self) -> Vec<u8> {
        let mut ages: Vec<u8> = self.by_age.keys().copied().collect();
        ages.sort_unstable();
        ages
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
