use thiserror::Error;

use crate::core::types::{PuzzleId, SessionId};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Puzzle not found: {0:?}")]
    PuzzleNotFound(PuzzleId),

    #[error("Session not found: {0:?}")]
    SessionNotFound(SessionId),

    #[error("No corpus entries for age {0}")]
    AgeNotAvailable(u8),

    #[error("No usable sentence for age {0} after exhausting every fallback tier")]
    GenerationExhausted(u8),

    #[error("Puzzle already processed: {0:?}")]
    AlreadyProcessed(PuzzleId),

    #[error("Answer text is empty")]
    EmptyAnswer,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
