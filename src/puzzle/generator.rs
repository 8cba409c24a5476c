//! Puzzle generation: age-banded sentence sampling and piece shuffling

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::corpus::index::CorpusIndex;
use crate::corpus::split::{normalize_sentence, split_sentences};

/// One shuffled word unit shown to the player
///
/// `position` is the word's index in the canonical sentence. Rendering
/// metadata only; verification never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub id: usize,
    pub word: String,
    pub position: usize,
}

/// A sampled sentence ready to become a `Puzzle`
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub sentence: String,
    pub words: Vec<String>,
    pub pieces: Vec<Piece>,
    pub age: u8,
    pub title: String,
}

/// Target word-count band for an age label
///
/// Short sentences for young readers, widening with age.
pub fn word_band(age: u8) -> std::ops::RangeInclusive<usize> {
    match age {
        0..=6 => 3..=6,
        7..=10 => 6..=12,
        _ => 10..=18,
    }
}

/// Sample an age-appropriate sentence and scramble it
///
/// Bounded retries over random corpus entries for the age, then two
/// fallback tiers: a random summary entry (shorter by construction),
/// then the shortest sentence available for the age.
pub fn generate<R: Rng + ?Sized>(
    index: &CorpusIndex,
    config: &GameConfig,
    rng: &mut R,
    age: u8,
) -> Result<GeneratedPuzzle> {
    let entries = index.entries_for_age(age);
    if entries.is_empty() {
        return Err(GameError::AgeNotAvailable(age));
    }

    let band = word_band(age);
    for _ in 0..config.generation_retries {
        let entry = &entries[rng.gen_range(0..entries.len())];
        for sentence in split_sentences(&entry.text) {
            if band.contains(&sentence.split_whitespace().count()) {
                return Ok(assemble(sentence, age, entry.title.clone(), rng));
            }
        }
    }

    let summaries = index.summaries_for_age(age);
    if !summaries.is_empty() {
        let entry = summaries[rng.gen_range(0..summaries.len())];
        if let Some(sentence) = normalize_sentence(&entry.text) {
            tracing::debug!(age, "generation fell back to a summary sentence");
            return Ok(assemble(sentence, age, entry.title.clone(), rng));
        }
    }

    let shortest = entries
        .iter()
        .flat_map(|entry| {
            split_sentences(&entry.text)
                .into_iter()
                .map(move |sentence| (sentence, &entry.title))
        })
        .min_by_key(|(sentence, _)| sentence.split_whitespace().count());
    if let Some((sentence, title)) = shortest {
        tracing::debug!(age, "generation fell back to the shortest sentence");
        return Ok(assemble(sentence, age, title.clone(), rng));
    }

    Err(GameError::GenerationExhausted(age))
}

fn assemble<R: Rng + ?Sized>(
    sentence: String,
    age: u8,
    title: String,
    rng: &mut R,
) -> GeneratedPuzzle {
    let words: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();
    let mut pieces: Vec<Piece> = words
        .iter()
        .enumerate()
        .map(|(position, word)| Piece { id: position, word: word.clone(), position })
        .collect();
    pieces.shuffle(rng);
    GeneratedPuzzle { sentence, words, pieces, age, title }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::entry::{CorpusEntry, SourceKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn entry(text: &str, age: u8, kind: SourceKind) -> CorpusEntry {
        CorpusEntry { text: text.to_string(), age, title: "시험 동화".to_string(), kind }
    }

    #[test]
    fn test_picks_sentence_in_band() {
        let index = CorpusIndex::from_entries(vec![entry(
            "나는 학교에 간다. 오늘은 날씨가 정말 맑고 바람도 시원하게 분다.",
            5,
            SourceKind::Story,
        )]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let puzzle = generate(&index, &GameConfig::default(), &mut rng, 5).unwrap();
        // Age 5 band is 3..=6 words; only the first sentence fits.
        assert_eq!(puzzle.sentence, "나는 학교에 간다.");
        assert_eq!(puzzle.words, vec!["나는", "학교에", "간다."]);
    }

    #[test]
    fn test_pieces_are_a_tagged_permutation() {
        let index = CorpusIndex::from_entries(vec![entry(
            "아기 곰은 달콤한 꿀을 좋아한다.",
            5,
            SourceKind::Story,
        )]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let puzzle = generate(&index, &GameConfig::default(), &mut rng, 5).unwrap();

        let mut sorted = puzzle.pieces.clone();
        sorted.sort_by_key(|piece| piece.position);
        let restored: Vec<&str> = sorted.iter().map(|piece| piece.word.as_str()).collect();
        assert_eq!(restored, puzzle.words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_age_is_rejected() {
        let index = CorpusIndex::from_entries(vec![entry("하늘이 맑다.", 5, SourceKind::Story)]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = generate(&index, &GameConfig::default(), &mut rng, 12);
        assert!(matches!(result, Err(GameError::AgeNotAvailable(12))));
    }

    #[test]
    fn test_falls_back_to_summary() {
        // Age 7 band is 6..=12 words; the story sentence is too short, so
        // after the retry budget the summary entry is used whole.
        let index = CorpusIndex::from_entries(vec![
            entry("고양이가 잔다.", 7, SourceKind::Story),
            entry("부지런한 거북이가 경주에서 이겼다", 7, SourceKind::Summary),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let puzzle = generate(&index, &GameConfig::default(), &mut rng, 7).unwrap();
        assert_eq!(puzzle.sentence, "부지런한 거북이가 경주에서 이겼다.");
    }

    #[test]
    fn test_falls_back_to_shortest_without_summaries() {
        let index = CorpusIndex::from_entries(vec![
            entry("고양이가 오래 잔다. 강아지는 아주 짧게 잔다.", 7, SourceKind::Story),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let puzzle = generate(&index, &GameConfig::default(), &mut rng, 7).unwrap();
        assert_eq!(puzzle.sentence, "고양이가 오래 잔다.");
    }

    #[test]
    fn test_word_bands() {
        assert_eq!(word_band(4), 3..=6);
        assert_eq!(word_band(6), 3..=6);
        assert_eq!(word_band(7), 6..=12);
        assert_eq!(word_band(10), 6..=12);
        assert_eq!(word_band(11), 10..=18);
    }
}
