//! The game engine: the four player-facing operations plus session
//! status, operational stats, and the retention sweep entry point
//!
//! All methods take `&self`; mutable state lives in the [`GameStore`]
//! behind per-entity locks, so the engine can sit in an `Arc` and serve
//! concurrent callers.

pub mod response;

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::{PlayerId, PuzzleId};
use crate::corpus::index::CorpusIndex;
use crate::persist::PersistenceSink;
use crate::puzzle::generator;
use crate::puzzle::scoring;
use crate::puzzle::state::{Puzzle, PuzzleState};
use crate::puzzle::verify::{self, Feedback, Verdict};
use crate::session::state::CompletedSession;
use crate::session::store::{lock, GameStore, SessionProgress, SweepStats};

use response::{
    EngineStats, GenerateResponse, Hint, HintKind, HintResponse, SessionStatus, SkipResponse,
    SubmitResponse,
};

pub struct GameEngine {
    corpus: CorpusIndex,
    config: GameConfig,
    store: GameStore,
    sink: Arc<dyn PersistenceSink>,
    rng: Mutex<ChaCha8Rng>,
}

impl GameEngine {
    /// Build an engine over a loaded corpus; validates the config
    pub fn new(
        corpus: CorpusIndex,
        config: GameConfig,
        sink: Arc<dyn PersistenceSink>,
    ) -> Result<Self> {
        Self::with_rng(corpus, config, sink, ChaCha8Rng::from_entropy())
    }

    /// Seeded variant for reproducible puzzle sampling
    pub fn seeded(
        corpus: CorpusIndex,
        config: GameConfig,
        sink: Arc<dyn PersistenceSink>,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(corpus, config, sink, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(
        corpus: CorpusIndex,
        config: GameConfig,
        sink: Arc<dyn PersistenceSink>,
        rng: ChaCha8Rng,
    ) -> Result<Self> {
        config.validate().map_err(GameError::Config)?;
        Ok(Self { corpus, config, store: GameStore::new(), sink, rng: Mutex::new(rng) })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generate a new puzzle for the player, attaching it to their open
    /// session or starting one
    pub fn generate(&self, age: u8, player: &PlayerId) -> Result<GenerateResponse> {
        let (session_id, attempted) =
            self.store.get_or_create_session(player, age, self.config.session_length);

        let generated = {
            let mut rng = lock(&self.rng);
            generator::generate(&self.corpus, &self.config, &mut *rng, age)?
        };

        let puzzle = Puzzle::new(session_id, generated);
        let response = GenerateResponse {
            puzzle_id: puzzle.id,
            age: puzzle.age,
            title: puzzle.title.clone(),
            pieces: puzzle.pieces.clone(),
            word_count: puzzle.word_count(),
            session_progress: self.progress_label(attempted),
        };
        tracing::debug!(puzzle = ?puzzle.id, age, words = response.word_count, "puzzle generated");
        self.store.insert_puzzle(puzzle);
        Ok(response)
    }

    /// Submit an answer for verification
    ///
    /// A pass solves the puzzle; a failing final attempt forces it to
    /// `Failed`; anything earlier returns feedback and leaves the puzzle
    /// active. Terminal on a processed puzzle is an `AlreadyProcessed`
    /// error, never a second commit.
    pub fn submit(&self, puzzle_id: PuzzleId, answer: &str) -> Result<SubmitResponse> {
        let entry = self.store.puzzle(puzzle_id)?;
        let mut puzzle = lock(&entry);
        if puzzle.is_terminal() {
            return Err(GameError::AlreadyProcessed(puzzle_id));
        }
        if answer.trim().is_empty() {
            return Err(GameError::EmptyAnswer);
        }

        puzzle.attempts += 1;
        let verdict =
            verify::verify(&puzzle.sentence, &puzzle.canonical_words, answer, &self.config);

        if verdict.passed {
            let score = scoring::score(
                &self.config,
                puzzle.attempts,
                puzzle.hints_used,
                verdict.position_similarity,
            );
            let (progress, record) = self.store.commit_terminal(
                &mut puzzle,
                PuzzleState::Solved { score },
                self.config.session_length,
            )?;
            let response = SubmitResponse {
                passed: true,
                exact_match: verdict.exact,
                similarity: verdict.position_similarity,
                message: verdict_message(&verdict, puzzle.attempts, self.config.max_attempts),
                score: Some(score),
                original_sentence: Some(puzzle.sentence.clone()),
                session_progress: self.progress_label(progress.attempted),
                session_complete: Some(progress.completed),
                final_score: progress.completed.then_some(progress.total_score),
                final_message: progress.completed.then(|| self.completion_message(&progress)),
            };
            drop(puzzle);
            if let Some(record) = record {
                self.persist(record);
            }
            return Ok(response);
        }

        if puzzle.attempts >= self.config.max_attempts {
            let (progress, record) = self.store.commit_terminal(
                &mut puzzle,
                PuzzleState::Failed,
                self.config.session_length,
            )?;
            let response = SubmitResponse {
                passed: false,
                exact_match: false,
                similarity: verdict.position_similarity,
                message: format!(
                    "Out of attempts ({}). The answer was: {}",
                    self.config.max_attempts, puzzle.sentence
                ),
                score: Some(0),
                original_sentence: Some(puzzle.sentence.clone()),
                session_progress: self.progress_label(progress.attempted),
                session_complete: Some(progress.completed),
                final_score: progress.completed.then_some(progress.total_score),
                final_message: progress.completed.then(|| self.completion_message(&progress)),
            };
            drop(puzzle);
            if let Some(record) = record {
                self.persist(record);
            }
            return Ok(response);
        }

        let progress = self.store.session_progress(puzzle.session_id)?;
        Ok(SubmitResponse {
            passed: false,
            exact_match: false,
            similarity: verdict.position_similarity,
            message: verdict_message(&verdict, puzzle.attempts, self.config.max_attempts),
            score: None,
            original_sentence: None,
            session_progress: self.progress_label(progress.attempted),
            session_complete: None,
            final_score: None,
            final_message: None,
        })
    }

    /// Reveal the next hint: first word, then last, then middle
    ///
    /// At the budget this returns a `MaxReached` hint without side
    /// effects.
    pub fn hint(&self, puzzle_id: PuzzleId) -> Result<HintResponse> {
        let entry = self.store.puzzle(puzzle_id)?;
        let mut puzzle = lock(&entry);
        if puzzle.is_terminal() {
            return Err(GameError::AlreadyProcessed(puzzle_id));
        }

        let max_hints = self.config.max_hints;
        if puzzle.hints_used >= max_hints {
            return Ok(HintResponse {
                hints: vec![Hint {
                    kind: HintKind::MaxReached,
                    message: "No hints left.".to_string(),
                }],
                hints_used: puzzle.hints_used,
                max_hints,
            });
        }

        let words = &puzzle.canonical_words;
        let hint = match puzzle.hints_used {
            0 => Hint {
                kind: HintKind::FirstWord,
                message: format!("The first word is '{}'.", words[0]),
            },
            1 => Hint {
                kind: HintKind::LastWord,
                message: format!("The last word is '{}'.", words[words.len() - 1]),
            },
            _ => {
                let middle = words.len() / 2;
                Hint {
                    kind: HintKind::MiddleWord,
                    message: format!("Word {} is '{}'.", middle + 1, words[middle]),
                }
            }
        };
        puzzle.hints_used += 1;
        Ok(HintResponse { hints: vec![hint], hints_used: puzzle.hints_used, max_hints })
    }

    /// Skip the puzzle: terminal at score 0, counted against the session
    pub fn skip(&self, puzzle_id: PuzzleId) -> Result<SkipResponse> {
        let entry = self.store.puzzle(puzzle_id)?;
        let mut puzzle = lock(&entry);
        if puzzle.is_terminal() {
            return Err(GameError::AlreadyProcessed(puzzle_id));
        }

        let (progress, record) = self.store.commit_terminal(
            &mut puzzle,
            PuzzleState::Skipped,
            self.config.session_length,
        )?;
        let response = SkipResponse {
            message: "Puzzle skipped.".to_string(),
            original_sentence: puzzle.sentence.clone(),
            session_progress: self.progress_label(progress.attempted),
            session_complete: progress.completed,
            final_score: progress.completed.then_some(progress.total_score),
            final_message: progress.completed.then(|| self.completion_message(&progress)),
        };
        drop(puzzle);
        if let Some(record) = record {
            self.persist(record);
        }
        Ok(response)
    }

    /// Snapshot of the player's open session, if any
    pub fn session_status(&self, player: &PlayerId) -> SessionStatus {
        match self.store.open_session_view(player, self.config.session_length) {
            Some(view) => SessionStatus {
                in_progress: true,
                puzzles_attempted: Some(view.attempted),
                puzzles_solved: Some(view.solved),
                current_score: Some(view.total_score),
                initial_age: Some(view.initial_age),
                current_age: Some(view.current_age),
            },
            None => SessionStatus {
                in_progress: false,
                puzzles_attempted: None,
                puzzles_solved: None,
                current_score: None,
                initial_age: None,
                current_age: None,
            },
        }
    }

    pub fn stats(&self) -> EngineStats {
        let stats = self.store.stats();
        EngineStats { live_puzzles: stats.live_puzzles, open_sessions: stats.open_sessions }
    }

    /// Evict puzzles and sessions idle past the retention TTL
    ///
    /// Called by the periodic sweep task; safe to call directly.
    pub fn sweep_once(&self) -> SweepStats {
        let stats = self.store.sweep(self.config.ttl());
        if stats.puzzles_removed > 0 || stats.sessions_removed > 0 {
            tracing::info!(
                puzzles = stats.puzzles_removed,
                sessions = stats.sessions_removed,
                "retention sweep evicted stale entries"
            );
        }
        stats
    }

    fn progress_label(&self, attempted: u8) -> String {
        format!("{}/{}", attempted, self.config.session_length)
    }

    fn completion_message(&self, progress: &SessionProgress) -> String {
        format!(
            "Session complete! Total score: {} ({} of {} solved)",
            progress.total_score, progress.solved, self.config.session_length
        )
    }

    fn persist(&self, record: CompletedSession) {
        tracing::info!(
            player = %record.player,
            solved = record.puzzles_solved,
            score = record.normalized_score,
            "session completed"
        );
        if let Err(err) = self.sink.persist(&record) {
            tracing::warn!(
                player = %record.player,
                %err,
                "failed to persist completed session; keeping in-memory state"
            );
        }
    }
}

fn verdict_message(verdict: &Verdict, attempts: u8, max_attempts: u8) -> String {
    match &verdict.feedback {
        Feedback::Exact => "Perfect! That's exactly right.".to_string(),
        Feedback::Ordered => format!(
            "Correct! (position {:.0}%, order {:.0}%)",
            verdict.position_similarity * 100.0,
            verdict.sequence_similarity * 100.0
        ),
        Feedback::WordMismatch { missing, extra } => {
            let mut message = String::from("Some words don't match.");
            if !missing.is_empty() {
                message.push_str(&format!(" Missing: {}.", missing.join(", ")));
            }
            if !extra.is_empty() {
                message.push_str(&format!(" Extra: {}.", extra.join(", ")));
            }
            message.push_str(&format!(" (attempt {attempts}/{max_attempts})"));
            message
        }
        Feedback::EndingMismatch => format!(
            "The sentence ending is off. Check the order of the last words. (attempt {attempts}/{max_attempts})"
        ),
        Feedback::PositionTooLow => format!(
            "Too many words are out of place. (position match {:.0}%, attempt {attempts}/{max_attempts})",
            verdict.position_similarity * 100.0
        ),
        Feedback::SequenceTooLow => format!(
            "The word order needs another look. (order match {:.0}%, attempt {attempts}/{max_attempts})",
            verdict.sequence_similarity * 100.0
        ),
    }
}
