//! Puzzle records, generation, verification, and scoring

pub mod generator;
pub mod scoring;
pub mod state;
pub mod verify;

pub use generator::{GeneratedPuzzle, Piece};
pub use state::{Puzzle, PuzzleState};
