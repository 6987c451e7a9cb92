//! The taartpuzzel: a 9-letter word around a pie, with one letter hidden.

use std::collections::HashSet;

use rand::prelude::*;

use super::{
    circular_walk, grade, validate_answer, validate_start_offset, Direction, GuessRecord,
    PuzzleError, RotationPuzzle,
};
use crate::wordlist::WordList;

/// The glyph shown at the hidden position.
pub const PLACEHOLDER: &str = "?";

/// One taartpuzzel round.
#[derive(Debug, Clone)]
pub struct Taartpuzzel {
    answer: String,
    direction: Direction,
    start_offset: usize,
    missing_letter_index: usize,
    guess: Option<GuessRecord>,
}

impl Taartpuzzel {
    pub const N_LETTERS: usize = 9;

    /// Construct with every parameter explicit.
    pub fn new(
        answer: impl Into<String>,
        direction: Direction,
        start_offset: usize,
        missing_letter_index: usize,
    ) -> Result<Self, PuzzleError> {
        if missing_letter_index >= Self::N_LETTERS {
            return Err(PuzzleError::MissingLetterIndexOutOfRange {
                index: missing_letter_index,
                n_letters: Self::N_LETTERS,
            });
        }
        Ok(Self {
            answer: validate_answer(answer.into(), Self::N_LETTERS)?,
            direction,
            start_offset: validate_start_offset(start_offset, Self::N_LETTERS)?,
            missing_letter_index,
            guess: None,
        })
    }

    /// Construct with an explicit answer and placement but a random hidden
    /// position. Hard-mode selection supplies exactly these parts.
    pub fn with_placement<R: Rng>(
        answer: impl Into<String>,
        direction: Direction,
        start_offset: usize,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        Self::new(
            answer,
            direction,
            start_offset,
            rng.random_range(0..Self::N_LETTERS),
        )
    }

    /// Construct with an explicit answer and a fully random placement.
    pub fn with_answer<R: Rng>(answer: impl Into<String>, rng: &mut R) -> Result<Self, PuzzleError> {
        let direction = Direction::random(rng);
        let start_offset = rng.random_range(0..Self::N_LETTERS);
        Self::with_placement(answer, direction, start_offset, rng)
    }

    /// Construct with an answer drawn uniformly from the corpus.
    pub fn random<R: Rng>(words: &WordList, rng: &mut R) -> Result<Self, PuzzleError> {
        let answer = words.choose(rng).ok_or(PuzzleError::CorpusExhausted)?;
        Self::with_answer(answer.to_string(), rng)
    }

    /// Draw fresh answers until one admits a unique puzzle. Uniqueness here
    /// depends on the hidden position, so for each candidate answer every
    /// hidden position is tried (starting from a random one) before the
    /// answer is given up on.
    pub fn generate_unique<R: Rng>(words: &WordList, rng: &mut R) -> Result<Self, PuzzleError> {
        let mut tried: HashSet<&str> = HashSet::new();
        while tried.len() < words.len() {
            let answer = words.choose(rng).ok_or(PuzzleError::CorpusExhausted)?;
            if !tried.insert(answer) {
                continue;
            }
            let mut puzzle = Self::with_answer(answer.to_string(), rng)?;
            let first = puzzle.missing_letter_index;
            for step in 0..Self::N_LETTERS {
                puzzle.missing_letter_index = (first + step) % Self::N_LETTERS;
                if puzzle.has_unique_solution(words) {
                    return Ok(puzzle);
                }
            }
        }
        Err(PuzzleError::CorpusExhausted)
    }

    /// Re-roll direction, start offset and hidden position, keeping the
    /// answer. Clears any recorded guess.
    pub fn reroll<R: Rng>(&mut self, rng: &mut R) {
        self.direction = Direction::random(rng);
        self.start_offset = rng.random_range(0..Self::N_LETTERS);
        self.missing_letter_index = rng.random_range(0..Self::N_LETTERS);
        self.guess = None;
    }

    pub fn missing_letter_index(&self) -> usize {
        self.missing_letter_index
    }

    /// The nine display positions: the circular walk from the start offset,
    /// with the hidden position replaced by the placeholder glyph.
    pub fn layout(&self) -> Vec<String> {
        let mut positions: Vec<String> =
            circular_walk(&self.answer, self.start_offset, self.direction)
                .into_iter()
                .map(|c| c.to_string())
                .collect();
        positions[self.missing_letter_index] = PLACEHOLDER.to_string();
        positions
    }

    /// The answer with the hidden letter masked out: `None` is a wildcard.
    fn masked_pattern(&self) -> Vec<Option<char>> {
        self.answer
            .chars()
            .enumerate()
            .map(|(i, c)| (i != self.missing_letter_index).then_some(c))
            .collect()
    }
}

/// Whether a word matches a masked pattern, anchored at both ends.
fn matches_pattern(word: &str, pattern: &[Option<char>]) -> bool {
    word.chars().count() == pattern.len()
        && word
            .chars()
            .zip(pattern)
            .all(|(c, p)| p.map_or(true, |expected| expected == c))
}

impl RotationPuzzle for Taartpuzzel {
    fn n_letters(&self) -> usize {
        Self::N_LETTERS
    }

    fn answer(&self) -> &str {
        &self.answer
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Count corpus words matching any rotation of the masked pattern. The
    /// puzzle is unique iff the total is exactly 1: the only match in the
    /// whole corpus is the answer itself, under exactly one rotation. The
    /// hidden letter can make a single rotation match several words, so this
    /// is stricter than the rotation check of the paardensprong.
    fn has_unique_solution(&self, words: &WordList) -> bool {
        let pattern = self.masked_pattern();
        let mut matches = 0usize;
        for i in 0..Self::N_LETTERS {
            let mut rotated = pattern.clone();
            rotated.rotate_left(i);
            matches += words
                .words()
                .iter()
                .filter(|w| matches_pattern(w, &rotated))
                .count();
        }
        matches == 1
    }

    fn grade_guess(&mut self, raw_guess: &str) -> bool {
        let record = grade(&self.answer, raw_guess);
        let correct = record.correct;
        self.guess = Some(record);
        correct
    }

    fn guess(&self) -> Option<&GuessRecord> {
        self.guess.as_ref()
    }
}
