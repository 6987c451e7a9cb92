//! Rotation puzzles: a word written into a fixed cyclic layout, starting at a
//! random offset and read in a random direction.
//!
//! Two variants exist: the paardensprong (8 letters on a 3x3 grid, visited in
//! knight's moves) and the taartpuzzel (9 letters around a pie, one hidden).
//! Both share the same lifecycle: pick an answer, pick a placement, verify the
//! placement admits exactly one valid reading, lay the word out, grade the
//! player's guess.

pub mod paardensprong;
pub mod taartpuzzel;

use std::time::SystemTime;

use rand::prelude::*;
use thiserror::Error;

use crate::wordlist::WordList;

/// Errors raised eagerly at puzzle construction. These indicate caller bugs
/// and are never retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuzzleError {
    #[error("direction must be either -1 or 1, not {0}")]
    InvalidDirection(i8),
    #[error("start offset must lie in 0..{n_letters}, not {offset}")]
    StartOffsetOutOfRange { offset: usize, n_letters: usize },
    #[error("answer must have length {expected}, untrue for {answer:?}")]
    WrongAnswerLength { expected: usize, answer: String },
    #[error("missing letter index must lie in 0..{n_letters}, not {index}")]
    MissingLetterIndexOutOfRange { index: usize, n_letters: usize },
    #[error("probability must be between 0 and 1, not {0}")]
    InvalidProbability(f64),
    #[error("p_wrong and p_unknown must add up to 1 at most: {p_wrong} + {p_unknown}")]
    ProbabilitySum { p_wrong: f64, p_unknown: f64 },
    #[error("no word in the corpus yields a puzzle with a unique solution")]
    CorpusExhausted,
}

/// Reading direction through the answer: forward (+1) or reverse (-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// The index step this direction takes through the answer.
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// The wire/database representation: +1 or -1.
    pub fn as_i8(self) -> i8 {
        self.step() as i8
    }

    /// Draw a direction uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = PuzzleError;

    fn try_from(value: i8) -> Result<Self, PuzzleError> {
        match value {
            1 => Ok(Direction::Forward),
            -1 => Ok(Direction::Reverse),
            other => Err(PuzzleError::InvalidDirection(other)),
        }
    }
}

/// The outcome of a submitted guess. Written last-write-wins: grading twice
/// overwrites the previous record.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessRecord {
    pub guess: String,
    pub correct: bool,
    pub guess_time: SystemTime,
}

/// The shared contract of the two rotation-puzzle variants.
pub trait RotationPuzzle {
    fn n_letters(&self) -> usize;
    fn answer(&self) -> &str;
    fn direction(&self) -> Direction;
    fn start_offset(&self) -> usize;

    /// Whether no other (direction, offset, hidden-letter) interpretation of
    /// the displayed puzzle also spells a corpus word.
    fn has_unique_solution(&self, words: &WordList) -> bool;

    /// Normalize both guess and answer, compare, and record the result.
    fn grade_guess(&mut self, raw_guess: &str) -> bool;

    /// The recorded guess, if one has been submitted.
    fn guess(&self) -> Option<&GuessRecord>;
}

/// Make strings comparable: lowercase, trim, and collapse the "ij" digraph
/// into the single code point `ĳ` (U+0133).
pub fn normalize(s: &str) -> String {
    s.to_lowercase().trim().replace("ij", "\u{0133}")
}

/// Cyclically shift a word's characters left by `n` positions.
pub fn rotate(word: &str, n: usize) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let n = n % chars.len();
    chars[n..].iter().chain(chars[..n].iter()).collect()
}

/// Grade a raw guess against an answer, recording the normalized comparison.
pub(crate) fn grade(answer: &str, raw_guess: &str) -> GuessRecord {
    let correct = normalize(raw_guess) == normalize(answer);
    GuessRecord {
        guess: raw_guess.to_string(),
        correct,
        guess_time: SystemTime::now(),
    }
}

/// Read the answer circularly: `n_letters` characters starting at
/// `start_offset`, stepping by the direction, indices taken modulo the length.
pub(crate) fn circular_walk(answer: &str, start_offset: usize, direction: Direction) -> Vec<char> {
    let letters: Vec<char> = answer.chars().collect();
    let n = letters.len() as isize;
    (0..n)
        .map(|i| {
            let idx = (start_offset as isize + i * direction.step()).rem_euclid(n);
            letters[idx as usize]
        })
        .collect()
}

pub(crate) fn validate_answer(answer: String, expected: usize) -> Result<String, PuzzleError> {
    if answer.chars().count() != expected {
        return Err(PuzzleError::WrongAnswerLength { expected, answer });
    }
    Ok(answer)
}

pub(crate) fn validate_start_offset(offset: usize, n_letters: usize) -> Result<usize, PuzzleError> {
    if offset >= n_letters {
        return Err(PuzzleError::StartOffsetOutOfRange { offset, n_letters });
    }
    Ok(offset)
}
