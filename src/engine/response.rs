//! Wire-shaped results for the engine's operations
//!
//! Transport-agnostic: these serialize to the JSON the surrounding API
//! layer hands to clients, but nothing here knows about HTTP.

use serde::Serialize;

use crate::core::types::PuzzleId;
use crate::puzzle::generator::Piece;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub puzzle_id: PuzzleId,
    pub age: u8,
    pub title: String,
    pub pieces: Vec<Piece>,
    pub word_count: usize,
    /// "attempted/length", e.g. "3/10"
    pub session_progress: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub passed: bool,
    pub exact_match: bool,
    /// Position similarity of the submission (1.0 for exact matches)
    pub similarity: f64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    /// Revealed only once the puzzle is terminal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_sentence: Option<String>,
    pub session_progress: String,
    /// Present on terminal outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    FirstWord,
    LastWord,
    MiddleWord,
    MaxReached,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hint {
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HintResponse {
    pub hints: Vec<Hint>,
    pub hints_used: u8,
    pub max_hints: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkipResponse {
    pub message: String,
    pub original_sentence: String,
    pub session_progress: String,
    pub session_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
}

/// Open-session snapshot for the status operation
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub in_progress: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puzzles_attempted: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puzzles_solved: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_age: Option<u8>,
}

/// Operational counters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngineStats {
    pub live_puzzles: usize,
    pub open_sessions: usize,
}
