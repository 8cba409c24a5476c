//! Property tests for the similarity measures and the score formula

use proptest::prelude::*;

use sentence_forge::core::config::GameConfig;
use sentence_forge::puzzle::scoring;
use sentence_forge::puzzle::verify::{position_similarity, sequence_similarity};

/// A word list and a permutation of it, as the verifier sees them after
/// the multiset stage.
fn word_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    proptest::collection::vec("[a-f]{1,3}", 1..12).prop_flat_map(|words| {
        let original = words.clone();
        Just(words)
            .prop_shuffle()
            .prop_map(move |shuffled| (original.clone(), shuffled))
    })
}

proptest! {
    /// Every positionally-matching index is itself a common subsequence
    /// element, so the LCS fraction can never drop below the position
    /// fraction.
    #[test]
    fn sequence_similarity_never_below_position((canonical, shuffled) in word_permutation()) {
        let position = position_similarity(&canonical, &shuffled);
        let sequence = sequence_similarity(&canonical, &shuffled);
        prop_assert!(sequence >= position - 1e-9, "sequence {sequence} < position {position}");
    }

    #[test]
    fn similarities_stay_in_unit_range((canonical, shuffled) in word_permutation()) {
        let position = position_similarity(&canonical, &shuffled);
        let sequence = sequence_similarity(&canonical, &shuffled);
        prop_assert!((0.0..=1.0).contains(&position));
        prop_assert!((0.0..=1.0).contains(&sequence));
    }

    #[test]
    fn identity_permutation_is_perfect(words in proptest::collection::vec("[a-f]{1,3}", 1..12)) {
        prop_assert_eq!(position_similarity(&words, &words), 1.0);
        prop_assert_eq!(sequence_similarity(&words, &words), 1.0);
    }

    /// The score is clamped to 0..=100 for every reachable input.
    #[test]
    fn score_stays_in_bounds(attempts in 1u8..=2, hints in 0u8..=3, position in 0.0f64..=1.0) {
        let score = scoring::score(&GameConfig::default(), attempts, hints, position);
        prop_assert!(score <= 100);
    }
}
