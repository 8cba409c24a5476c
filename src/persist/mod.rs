//! Persistence boundary for completed sessions
//!
//! The engine hands a [`CompletedSession`] record to the sink at most
//! once per session. Sink failures are logged by the caller and never
//! roll back in-memory state, so implementations are free to be simple
//! append-only writers.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::core::error::Result;
use crate::session::state::CompletedSession;

/// Sink for completed-session records
pub trait PersistenceSink: Send + Sync {
    fn persist(&self, record: &CompletedSession) -> Result<()>;
}

/// Appends one JSON object per completed session to a file
pub struct JsonlSink {
    file: Mutex<File>,
}

impl JsonlSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl PersistenceSink for JsonlSink {
    fn persist(&self, record: &CompletedSession) -> Result<()> {
        let line = serde_json::to_string(record)?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Keeps records in memory; used by tests and the console driver
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<CompletedSession>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CompletedSession> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl PersistenceSink for MemorySink {
    fn persist(&self, record: &CompletedSession) -> Result<()> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;

    fn record() -> CompletedSession {
        CompletedSession {
            player: PlayerId::from("p1"),
            initial_age: 7,
            final_age: 8,
            puzzles_solved: 6,
            normalized_score: 58,
        }
    }

    #[test]
    fn test_memory_sink_collects_records() {
        let sink = MemorySink::new();
        sink.persist(&record()).unwrap();
        sink.persist(&record()).unwrap();
        assert_eq!(sink.records().len(), 2);
    }

    #[test]
    fn test_jsonl_sink_appends_lines() {
        let path = std::env::temp_dir().join("sentence_forge_sink_test.jsonl");
        std::fs::remove_file(&path).ok();

        let sink = JsonlSink::create(&path).unwrap();
        sink.persist(&record()).unwrap();
        sink.persist(&record()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"normalized_score\":58"));

        std::fs::remove_file(&path).ok();
    }
}
