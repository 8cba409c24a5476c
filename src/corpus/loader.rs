//! Startup corpus loading
//!
//! The one place the engine reads the filesystem. Everything downstream
//! works against the in-memory [`CorpusIndex`].

use std::path::Path;

use crate::core::error::Result;

use super::entry::CorpusEntry;
use super::index::CorpusIndex;

/// Load a corpus from a JSON array file and build the age index
pub fn load_corpus(path: &Path) -> Result<CorpusIndex> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<CorpusEntry> = serde_json::from_str(&content)?;
    let index = CorpusIndex::from_entries(entries);
    tracing::info!(total = index.len(), "corpus loaded");
    for age in index.ages() {
        tracing::info!(age, count = index.entries_for_age(age).len(), "corpus age group");
    }
    Ok(index)
}
