//! Difficulty features: per-word scores fed to the external win-probability
//! classifier. All scores derive from [`WordStatistics`] tables and are pure
//! functions of the answer.

use crate::stats::{WordStatistics, BOUNDARY};

/// Compensation added to transition scores before division, so that unseen
/// transitions (score 0) do not blow up the ratios.
pub const DEFAULT_COMPENSATION: f64 = 0.5;

/// Sum of the reference-corpus occurrence counts of every adjacent bigram in
/// the word. Higher means the word reads more like the corpus.
pub fn easiness_score(stats: &WordStatistics, word: &str) -> f64 {
    let chars: Vec<char> = word.chars().collect();
    chars
        .windows(2)
        .map(|pair| stats.reference_count(pair[0], pair[1]) as f64)
        .sum()
}

/// Score every transition of the circular word, including the one wrapping
/// from the last letter back to the first.
fn circular_transition_scores(stats: &WordStatistics, word: &str) -> Vec<f64> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    (0..n)
        .map(|i| stats.reference_count(chars[i], chars[(i + 1) % n]) as f64)
        .collect()
}

/// The second-lowest circular transition score. The lowest transition is
/// usually the word boundary; the second-lowest tells how smoothly the rest
/// of the circle reads in this direction.
pub fn single_direction_logicality(stats: &WordStatistics, word: &str) -> f64 {
    let mut scores = circular_transition_scores(stats, word);
    scores.sort_by(|a, b| a.total_cmp(b));
    scores[1]
}

/// How much more logical the actual reading direction is than its reverse.
/// Above 1 means the true direction reads more smoothly.
pub fn direction_correctness(stats: &WordStatistics, word: &str, compensation: f64) -> f64 {
    let reversed: String = word.chars().rev().collect();
    (single_direction_logicality(stats, word) + compensation)
        / (single_direction_logicality(stats, &reversed) + compensation)
}

/// Assuming the correct direction, how obviously the wrap transition marks
/// the start of the word: the wrap's inverse score as a share of the summed
/// inverse scores. Close to 1 means the boundary stands out.
pub fn word_boundary_obviousness(stats: &WordStatistics, word: &str, compensation: f64) -> f64 {
    let inverse: Vec<f64> = circular_transition_scores(stats, word)
        .into_iter()
        .map(|s| 1.0 / (s + compensation))
        .collect();
    let total: f64 = inverse.iter().sum();
    inverse[inverse.len() - 1] / total
}

/// The highest conditional probability of the hidden letter given either
/// neighbor. When neither transition occurs in the conditional corpus the
/// lookup falls back to 1.0.
pub fn max_missing_letter_probability(
    stats: &WordStatistics,
    before: char,
    missing: char,
    after: char,
) -> f64 {
    let given_before = stats.p_second_given_first(before, missing);
    let given_after = stats.p_first_given_second(missing, after);
    match (given_before, given_after) {
        (Some(a), Some(b)) => a.max(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => 1.0,
    }
}

/// One classifier input row for a played or candidate game.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub answer: String,
    pub direction_logicality: f64,
    pub boundary_obviousness: f64,
    pub frequency: f64,
    pub is_taartpuzzel: bool,
    /// Only set for taartpuzzel rows.
    pub max_probable_letter: Option<f64>,
    pub times_seen_before: u32,
}

impl FeatureRow {
    /// Assemble the row for an answer. `missing_letter_index` is set for
    /// taartpuzzel games; neighbors beyond the word edges read as the
    /// boundary placeholder.
    pub fn for_answer(
        stats: &WordStatistics,
        answer: &str,
        missing_letter_index: Option<usize>,
        times_seen_before: u32,
    ) -> Self {
        let chars: Vec<char> = answer.chars().collect();
        let max_probable_letter = missing_letter_index.map(|index| {
            let before = if index > 0 { chars[index - 1] } else { BOUNDARY };
            let after = if index + 1 < chars.len() {
                chars[index + 1]
            } else {
                BOUNDARY
            };
            max_missing_letter_probability(stats, before, chars[index], after)
        });
        Self {
            answer: answer.to_string(),
            direction_logicality: direction_correctness(stats, answer, DEFAULT_COMPENSATION),
            boundary_obviousness: word_boundary_obviousness(stats, answer, DEFAULT_COMPENSATION),
            frequency: stats.usage_frequency(answer),
            is_taartpuzzel: missing_letter_index.is_some(),
            max_probable_letter,
            times_seen_before,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::WordList;

    fn list(length: usize, words: &[&str]) -> WordList {
        WordList::new(length, words.iter().map(|w| w.to_string())).unwrap()
    }

    /// Reference corpus where "ab" is the dominant transition.
    fn fixture() -> WordStatistics {
        let reference = list(4, &["abab", "abba", "abcd"]);
        let conditional = list(4, &["abab", "abba"]);
        WordStatistics::build(&reference, &conditional, &[])
    }

    #[test]
    fn test_easiness_sums_reference_counts() {
        let stats = fixture();
        // corpus bigram counts: ab=4, ba=2, bb=1, bc=1, cd=1
        assert_eq!(easiness_score(&stats, "ab"), 4.0);
        assert_eq!(easiness_score(&stats, "abab"), 4.0 + 2.0 + 4.0);
        assert_eq!(easiness_score(&stats, "xy"), 0.0);
    }

    #[test]
    fn test_single_direction_logicality_is_second_lowest() {
        let stats = fixture();
        // circular "abcd": ab=4, bc=1, cd=1, da=0 -> second lowest is 1
        assert_eq!(single_direction_logicality(&stats, "abcd"), 1.0);
    }

    #[test]
    fn test_direction_correctness_favors_corpus_direction() {
        let stats = fixture();
        // "abcd" reads forward through seen transitions; "dcba" does not
        let forward = direction_correctness(&stats, "abcd", DEFAULT_COMPENSATION);
        let backward = direction_correctness(&stats, "dcba", DEFAULT_COMPENSATION);
        assert!(forward > 1.0);
        assert!(backward < 1.0);
        // the two ratios are each other's inverse
        assert!((forward * backward - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_obviousness_ordering() {
        let stats = fixture();
        // "abcd" wraps on da (unseen, score 0): the boundary stands out.
        // "abab" wraps on ba (score 2): the boundary blends in.
        let irregular = word_boundary_obviousness(&stats, "abcd", DEFAULT_COMPENSATION);
        let regular = word_boundary_obviousness(&stats, "abab", DEFAULT_COMPENSATION);
        assert!(irregular > regular);
    }

    #[test]
    fn test_boundary_obviousness_is_a_share() {
        let stats = fixture();
        for word in ["abab", "abcd", "dcba"] {
            let share = word_boundary_obviousness(&stats, word, DEFAULT_COMPENSATION);
            assert!(share > 0.0 && share < 1.0);
        }
    }

    #[test]
    fn test_max_missing_letter_probability_takes_max() {
        let stats = fixture();
        let p_forward = stats.p_second_given_first('a', 'b').unwrap();
        let p_backward = stats.p_first_given_second('b', 'a').unwrap();
        assert_eq!(
            max_missing_letter_probability(&stats, 'a', 'b', 'a'),
            p_forward.max(p_backward)
        );
    }

    #[test]
    fn test_max_missing_letter_probability_unseen_defaults_to_one() {
        let stats = fixture();
        assert_eq!(max_missing_letter_probability(&stats, 'x', 'y', 'z'), 1.0);
    }

    #[test]
    fn test_feature_row_for_paardensprong() {
        let stats = fixture();
        let row = FeatureRow::for_answer(&stats, "abab", None, 2);
        assert!(!row.is_taartpuzzel);
        assert_eq!(row.max_probable_letter, None);
        assert_eq!(row.times_seen_before, 2);
        assert_eq!(row.frequency, 0.0);
    }

    #[test]
    fn test_feature_row_edge_index_uses_boundary_neighbor() {
        let stats = fixture();
        // index 0: neighbor before is the boundary placeholder, which the
        // conditional corpus does contain (every word starts with 'a')
        let row = FeatureRow::for_answer(&stats, "abab", Some(0), 0);
        assert!(row.is_taartpuzzel);
        let expected = max_missing_letter_probability(&stats, BOUNDARY, 'a', 'b');
        assert_eq!(row.max_probable_letter, Some(expected));
    }
}
