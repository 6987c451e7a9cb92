//! Corpus statistics: bigram transition tables and frequency-of-use counts.
//!
//! Everything here is computed once from static corpora and read-only
//! afterwards; callers receive it by shared reference and never mutate it.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::wordlist::{embedded_master_list, MasterEntry, WordList};

/// The placeholder neighbor used when a letter has no letter before or after
/// it (a word boundary).
pub const BOUNDARY: char = '_';

/// One bigram's occurrence count plus both conditional probabilities derived
/// from the boundary-padded corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BigramEntry {
    pub occurrences: u32,
    pub p_second_given_first: f64,
    pub p_first_given_second: f64,
}

/// Precomputed statistics over the reference corpora.
#[derive(Debug, Clone)]
pub struct WordStatistics {
    /// Plain 2-gram counts over the reference wordlist; no boundary padding.
    reference_bigrams: HashMap<(char, char), u32>,
    /// Boundary-padded 2-gram table with conditional probabilities, built
    /// from the conditional-probability corpus.
    boundary_bigrams: HashMap<(char, char), BigramEntry>,
    /// Historical frequency-of-use per word, max over duplicate rows.
    frequency: HashMap<String, f64>,
}

impl WordStatistics {
    /// Build all three tables. The reference corpus feeds the transition
    /// easiness scores; the conditional corpus feeds the letter-probability
    /// table; the master list feeds the frequency-of-use counts (length-8
    /// rows, max frequency per word, rows without a frequency skipped).
    pub fn build(
        reference_words: &WordList,
        conditional_words: &WordList,
        master: &[MasterEntry],
    ) -> Self {
        let mut reference_bigrams: HashMap<(char, char), u32> = HashMap::new();
        for word in reference_words.words() {
            let chars: Vec<char> = word.chars().collect();
            for pair in chars.windows(2) {
                *reference_bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
            }
        }

        let mut counts: HashMap<(char, char), u32> = HashMap::new();
        for word in conditional_words.words() {
            let padded: Vec<char> = std::iter::once(BOUNDARY)
                .chain(word.chars())
                .chain(std::iter::once(BOUNDARY))
                .collect();
            for pair in padded.windows(2) {
                *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
            }
        }
        let mut first_totals: HashMap<char, u32> = HashMap::new();
        let mut second_totals: HashMap<char, u32> = HashMap::new();
        for (&(first, second), &count) in &counts {
            *first_totals.entry(first).or_insert(0) += count;
            *second_totals.entry(second).or_insert(0) += count;
        }
        let boundary_bigrams: HashMap<(char, char), BigramEntry> = counts
            .iter()
            .map(|(&(first, second), &count)| {
                let entry = BigramEntry {
                    occurrences: count,
                    p_second_given_first: count as f64 / first_totals[&first] as f64,
                    p_first_given_second: count as f64 / second_totals[&second] as f64,
                };
                ((first, second), entry)
            })
            .collect();

        let mut frequency: HashMap<String, f64> = HashMap::new();
        for entry in master {
            if entry.length != 8 {
                continue;
            }
            if let Some(freq) = entry.frequency {
                let current = frequency.entry(entry.word.clone()).or_insert(freq);
                if freq > *current {
                    *current = freq;
                }
            }
        }

        log::debug!(
            "built word statistics: {} reference bigrams, {} boundary bigrams, {} frequency rows",
            reference_bigrams.len(),
            boundary_bigrams.len(),
            frequency.len()
        );

        Self {
            reference_bigrams,
            boundary_bigrams,
            frequency,
        }
    }

    /// The statistics over the embedded corpora: 8-letter reference list,
    /// 9-letter conditional list, embedded master wordlist. Built on first
    /// use and shared for the life of the process.
    pub fn shared() -> &'static WordStatistics {
        static SHARED: Lazy<WordStatistics> = Lazy::new(|| {
            let reference = WordList::embedded(8).expect("embedded 8-letter wordlist");
            let conditional = WordList::embedded(9).expect("embedded 9-letter wordlist");
            WordStatistics::build(reference, conditional, embedded_master_list())
        });
        &SHARED
    }

    /// How often this bigram occurs in the reference corpus; 0 when unseen.
    pub fn reference_count(&self, first: char, second: char) -> u32 {
        self.reference_bigrams
            .get(&(first, second))
            .copied()
            .unwrap_or(0)
    }

    /// P(second | first) from the boundary-padded table, `None` when the
    /// transition never occurs.
    pub fn p_second_given_first(&self, first: char, second: char) -> Option<f64> {
        self.boundary_bigrams
            .get(&(first, second))
            .map(|e| e.p_second_given_first)
    }

    /// P(first | second) from the boundary-padded table, `None` when the
    /// transition never occurs.
    pub fn p_first_given_second(&self, first: char, second: char) -> Option<f64> {
        self.boundary_bigrams
            .get(&(first, second))
            .map(|e| e.p_first_given_second)
    }

    /// Historical frequency-of-use; unseen words are a legitimate 0, not an
    /// error.
    pub fn usage_frequency(&self, word: &str) -> f64 {
        self.frequency.get(word).copied().unwrap_or(0.0)
    }
}
