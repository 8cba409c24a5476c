//! Multi-stage answer verification
//!
//! Stages run in order: exact text match, word multiset equality,
//! sentence-ending check, then the two similarity measures. A later
//! stage only runs once every earlier one holds, which keeps the
//! feedback specific to the first thing that went wrong.

use std::collections::HashMap;

use crate::core::config::GameConfig;

/// Why a verification attempt passed or failed
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// Submission equals the canonical sentence verbatim
    Exact,
    /// Passed on the similarity thresholds
    Ordered,
    /// Word multisets differ
    WordMismatch { missing: Vec<String>, extra: Vec<String> },
    /// Final word(s) out of place
    EndingMismatch,
    PositionTooLow,
    SequenceTooLow,
}

/// Outcome of one verification run
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    pub exact: bool,
    pub position_similarity: f64,
    pub sequence_similarity: f64,
    pub feedback: Feedback,
}

/// Verify a submitted answer against the canonical sentence
pub fn verify(sentence: &str, canonical: &[String], answer: &str, config: &GameConfig) -> Verdict {
    if sentence.trim() == answer.trim() {
        return Verdict {
            passed: true,
            exact: true,
            position_similarity: 1.0,
            sequence_similarity: 1.0,
            feedback: Feedback::Exact,
        };
    }

    let submitted: Vec<String> = answer.split_whitespace().map(str::to_string).collect();

    let (missing, extra) = multiset_diff(canonical, &submitted);
    if !missing.is_empty() || !extra.is_empty() {
        return Verdict {
            passed: false,
            exact: false,
            position_similarity: 0.0,
            sequence_similarity: 0.0,
            feedback: Feedback::WordMismatch { missing, extra },
        };
    }

    if !ending_matches(canonical, &submitted) {
        return Verdict {
            passed: false,
            exact: false,
            position_similarity: 0.0,
            sequence_similarity: 0.0,
            feedback: Feedback::EndingMismatch,
        };
    }

    let position = position_similarity(canonical, &submitted);
    let sequence = sequence_similarity(canonical, &submitted);
    let passed = position >= config.position_threshold && sequence >= config.sequence_threshold;
    let feedback = if passed {
        Feedback::Ordered
    } else if position < config.position_threshold {
        Feedback::PositionTooLow
    } else {
        Feedback::SequenceTooLow
    };
    Verdict { passed, exact: false, position_similarity: position, sequence_similarity: sequence, feedback }
}

/// Words in `canonical` but not the submission, and vice versa, with
/// multiplicity. Both lists come back sorted for stable feedback.
fn multiset_diff(canonical: &[String], submitted: &[String]) -> (Vec<String>, Vec<String>) {
    let mut counts: HashMap<&str, i32> = HashMap::new();
    for word in canonical {
        *counts.entry(word.as_str()).or_default() += 1;
    }
    for word in submitted {
        *counts.entry(word.as_str()).or_default() -= 1;
    }

    let mut missing = Vec::new();
    let mut extra = Vec::new();
    for (word, count) in counts {
        for _ in 0..count.max(0) {
            missing.push(word.to_string());
        }
        for _ in 0..(-count).max(0) {
            extra.push(word.to_string());
        }
    }
    missing.sort_unstable();
    extra.sort_unstable();
    (missing, extra)
}

/// The last word must match; when both lists have at least two words the
/// second-to-last must match as well
fn ending_matches(canonical: &[String], submitted: &[String]) -> bool {
    let (Some(c_last), Some(s_last)) = (canonical.last(), submitted.last()) else {
        return false;
    };
    if c_last != s_last {
        return false;
    }
    if canonical.len() >= 2
        && submitted.len() >= 2
        && canonical[canonical.len() - 2] != submitted[submitted.len() - 2]
    {
        return false;
    }
    true
}

/// Fraction of indices holding the same word in both lists
pub fn position_similarity(canonical: &[String], submitted: &[String]) -> f64 {
    if canonical.is_empty() || canonical.len() != submitted.len() {
        return 0.0;
    }
    let matching = canonical.iter().zip(submitted).filter(|(c, s)| c == s).count();
    matching as f64 / canonical.len() as f64
}

/// Longest-common-subsequence length as a fraction of the canonical
/// length
///
/// Never below the position similarity: every position match is itself a
/// common subsequence element.
pub fn sequence_similarity(canonical: &[String], submitted: &[String]) -> f64 {
    if canonical.is_empty() || canonical.len() != submitted.len() {
        return 0.0;
    }
    lcs_length(canonical, submitted) as f64 / canonical.len() as f64
}

fn lcs_length(a: &[String], b: &[String]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table[a.len()][b.len()]
}
