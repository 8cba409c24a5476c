//! Score computation for solved puzzles

use crate::core::config::GameConfig;

/// Penalty-based score for a passing attempt
///
/// Failed and skipped puzzles score 0 without going through here.
pub fn score(config: &GameConfig, attempts: u8, hints_used: u8, position_similarity: f64) -> u8 {
    let hint_penalty = i64::from(hints_used) * i64::from(config.hint_penalty);
    let attempt_penalty =
        i64::from(attempts.saturating_sub(1)) * i64::from(config.attempt_penalty);
    let position_penalty =
        ((1.0 - position_similarity) * config.position_penalty_scale).floor() as i64;
    (i64::from(config.base_score) - hint_penalty - attempt_penalty - position_penalty)
        .clamp(0, 100) as u8
}
