//! Sentence corpus: entries, startup loading, and the age-grouped index

pub mod entry;
pub mod index;
pub mod loader;
pub mod split;

pub use entry::{CorpusEntry, SourceKind};
pub use index::CorpusIndex;
