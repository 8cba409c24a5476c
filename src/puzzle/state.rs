//! Puzzle record and its lifecycle state machine

use std::time::Instant;

use crate::core::error::{GameError, Result};
use crate::core::types::{PuzzleId, SessionId};

use super::generator::{GeneratedPuzzle, Piece};

/// Lifecycle state of a puzzle
///
/// The three terminal variants are entered exactly once, through
/// [`Puzzle::complete`]; a terminal puzzle accepts no further mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleState {
    Active,
    Solved { score: u8 },
    Failed,
    Skipped,
}

impl PuzzleState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PuzzleState::Active)
    }

    /// Score carried by the state; failed and skipped puzzles score 0
    pub fn score(&self) -> u8 {
        match self {
            PuzzleState::Solved { score } => *score,
            _ => 0,
        }
    }
}

/// One in-progress or completed challenge
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub id: PuzzleId,
    pub session_id: SessionId,
    /// The target sentence exactly as sampled from the corpus
    pub sentence: String,
    /// The sentence split into ordered words; verification runs on this
    pub canonical_words: Vec<String>,
    /// Shuffled word pieces handed to the client for rendering
    pub pieces: Vec<Piece>,
    pub age: u8,
    pub title: String,
    pub attempts: u8,
    pub hints_used: u8,
    pub state: PuzzleState,
    pub created_at: Instant,
}

impl Puzzle {
    pub fn new(session_id: SessionId, generated: GeneratedPuzzle) -> Self {
        Self {
            id: PuzzleId::new(),
            session_id,
            sentence: generated.sentence,
            canonical_words: generated.words,
            pieces: generated.pieces,
            age: generated.age,
            title: generated.title,
            attempts: 0,
            hints_used: 0,
            state: PuzzleState::Active,
            created_at: Instant::now(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn word_count(&self) -> usize {
        self.canonical_words.len()
    }

    /// Transition from `Active` into a terminal state
    ///
    /// Rejects a second transition, which is what keeps concurrent
    /// submissions from double-counting: the caller holds the puzzle
    /// lock, so exactly one of them sees `Active` here.
    pub fn complete(&mut self, outcome: PuzzleState) -> Result<()> {
        if self.is_terminal() {
            return Err(GameError::AlreadyProcessed(self.id));
        }
        debug_assert!(outcome.is_terminal());
        self.state = outcome;
        Ok(())
    }
}
