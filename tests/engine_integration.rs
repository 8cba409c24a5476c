//! Integration tests for the engine's four player-facing operations

use std::sync::Arc;

use sentence_forge::core::config::GameConfig;
use sentence_forge::core::error::GameError;
use sentence_forge::core::types::{PlayerId, PuzzleId};
use sentence_forge::corpus::{CorpusEntry, CorpusIndex, SourceKind};
use sentence_forge::engine::response::HintKind;
use sentence_forge::engine::GameEngine;
use sentence_forge::persist::MemorySink;

const SENTENCE: &str = "나는 학교에 간다.";

/// Engine over a one-sentence corpus, so every generated puzzle is the
/// known sentence and tests can submit deterministic answers.
fn single_sentence_engine() -> (Arc<GameEngine>, Arc<MemorySink>) {
    let corpus = CorpusIndex::from_entries(vec![CorpusEntry {
        text: SENTENCE.to_string(),
        age: 7,
        title: "등굣길".to_string(),
        kind: SourceKind::Summary,
    }]);
    let sink = Arc::new(MemorySink::new());
    let engine = GameEngine::seeded(corpus, GameConfig::default(), sink.clone(), 7).unwrap();
    (Arc::new(engine), sink)
}

fn player() -> PlayerId {
    PlayerId::from("tester")
}

#[test]
fn test_generate_returns_scrambled_known_sentence() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    assert_eq!(puzzle.word_count, 3);
    assert_eq!(puzzle.title, "등굣길");
    assert_eq!(puzzle.session_progress, "0/10");

    let mut pieces = puzzle.pieces.clone();
    pieces.sort_by_key(|piece| piece.position);
    let restored: Vec<&str> = pieces.iter().map(|piece| piece.word.as_str()).collect();
    assert_eq!(restored, vec!["나는", "학교에", "간다."]);
}

#[test]
fn test_exact_match_scores_full_marks() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    let result = engine.submit(puzzle.puzzle_id, SENTENCE).unwrap();
    assert!(result.passed);
    assert!(result.exact_match);
    assert_eq!(result.similarity, 1.0);
    assert_eq!(result.score, Some(100));
    assert_eq!(result.original_sentence.as_deref(), Some(SENTENCE));
    assert_eq!(result.session_progress, "1/10");
    assert_eq!(result.session_complete, Some(false));
    assert_eq!(result.final_score, None);
}

#[test]
fn test_wrong_ending_fails_then_correct_answer_scores_95() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    // Word multiset matches but the second-to-last word is wrong.
    let miss = engine.submit(puzzle.puzzle_id, "학교에 나는 간다.").unwrap();
    assert!(!miss.passed);
    assert!(!miss.exact_match);
    assert_eq!(miss.original_sentence, None);
    assert_eq!(miss.session_progress, "0/10");
    assert_eq!(miss.session_complete, None);
    assert!(miss.message.contains("attempt 1/2"));

    // Second attempt solves, at a 5-point attempt penalty.
    let solved = engine.submit(puzzle.puzzle_id, SENTENCE).unwrap();
    assert!(solved.passed);
    assert_eq!(solved.score, Some(95));
    assert_eq!(solved.session_progress, "1/10");
}

#[test]
fn test_word_mismatch_feedback_lists_missing_and_extra() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    let result = engine.submit(puzzle.puzzle_id, "나는 도서관에 간다.").unwrap();
    assert!(!result.passed);
    assert_eq!(result.similarity, 0.0);
    assert!(result.message.contains("Missing: 학교에"));
    assert!(result.message.contains("Extra: 도서관에"));
}

#[test]
fn test_hints_reveal_in_fixed_order_and_cost_points() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    let first = engine.hint(puzzle.puzzle_id).unwrap();
    assert_eq!(first.hints[0].kind, HintKind::FirstWord);
    assert!(first.hints[0].message.contains("나는"));
    assert_eq!(first.hints_used, 1);

    let second = engine.hint(puzzle.puzzle_id).unwrap();
    assert_eq!(second.hints[0].kind, HintKind::LastWord);
    assert!(second.hints[0].message.contains("간다."));

    let third = engine.hint(puzzle.puzzle_id).unwrap();
    assert_eq!(third.hints[0].kind, HintKind::MiddleWord);
    assert!(third.hints[0].message.contains("학교에"));
    assert_eq!(third.hints_used, 3);

    // Budget exhausted: no side effects, hints_used stays at 3.
    let fourth = engine.hint(puzzle.puzzle_id).unwrap();
    assert_eq!(fourth.hints[0].kind, HintKind::MaxReached);
    assert_eq!(fourth.hints_used, 3);
    assert_eq!(fourth.max_hints, 3);

    // Three hints cost 30 points.
    let solved = engine.submit(puzzle.puzzle_id, SENTENCE).unwrap();
    assert_eq!(solved.score, Some(70));
}

#[test]
fn test_two_failures_force_failed_state() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    let first = engine.submit(puzzle.puzzle_id, "간다. 나는 학교에").unwrap();
    assert!(!first.passed);
    assert_eq!(first.original_sentence, None);

    let second = engine.submit(puzzle.puzzle_id, "간다. 학교에 나는").unwrap();
    assert!(!second.passed);
    assert_eq!(second.score, Some(0));
    assert_eq!(second.original_sentence.as_deref(), Some(SENTENCE));
    assert!(second.message.contains("Out of attempts"));
    assert_eq!(second.session_progress, "1/10");
    assert_eq!(second.session_complete, Some(false));

    // The third submission hits a terminal puzzle.
    let third = engine.submit(puzzle.puzzle_id, SENTENCE);
    assert!(matches!(third, Err(GameError::AlreadyProcessed(_))));

    // So do hints and skips.
    assert!(matches!(engine.hint(puzzle.puzzle_id), Err(GameError::AlreadyProcessed(_))));
    assert!(matches!(engine.skip(puzzle.puzzle_id), Err(GameError::AlreadyProcessed(_))));
}

#[test]
fn test_skip_counts_toward_session() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    let skipped = engine.skip(puzzle.puzzle_id).unwrap();
    assert_eq!(skipped.original_sentence, SENTENCE);
    assert_eq!(skipped.session_progress, "1/10");
    assert!(!skipped.session_complete);

    assert!(matches!(engine.skip(puzzle.puzzle_id), Err(GameError::AlreadyProcessed(_))));
}

#[test]
fn test_empty_answer_rejected_without_consuming_attempt() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();

    let empty = engine.submit(puzzle.puzzle_id, "   ");
    assert!(matches!(empty, Err(GameError::EmptyAnswer)));

    // The attempt was not consumed: a correct answer still scores 100.
    let solved = engine.submit(puzzle.puzzle_id, SENTENCE).unwrap();
    assert_eq!(solved.score, Some(100));
}

#[test]
fn test_unknown_puzzle_and_age() {
    let (engine, _) = single_sentence_engine();

    let unknown = engine.submit(PuzzleId::new(), SENTENCE);
    assert!(matches!(unknown, Err(GameError::PuzzleNotFound(_))));

    let no_corpus = engine.generate(99, &player());
    assert!(matches!(no_corpus, Err(GameError::AgeNotAvailable(99))));
}

#[test]
fn test_concurrent_submissions_commit_exactly_once() {
    let (engine, _) = single_sentence_engine();
    let puzzle = engine.generate(7, &player()).unwrap();
    let id = puzzle.puzzle_id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.submit(id, SENTENCE))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

    let passed = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(passed, 1);
    let rejected = results
        .iter()
        .filter(|result| matches!(result, Err(GameError::AlreadyProcessed(_))))
        .count();
    assert_eq!(rejected, 7);

    // The session counted the puzzle once.
    let status = engine.session_status(&player());
    assert_eq!(status.puzzles_attempted, Some(1));
    assert_eq!(status.puzzles_solved, Some(1));
}
