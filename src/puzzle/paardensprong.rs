//! The paardensprong: an 8-letter word on a 3x3 grid, read in knight's moves.

use std::collections::HashSet;

use rand::prelude::*;

use super::{
    circular_walk, grade, rotate, validate_answer, validate_start_offset, Direction, GuessRecord,
    PuzzleError, RotationPuzzle,
};
use crate::wordlist::WordList;

/// The fixed visiting order of the eight outer grid cells. Following this
/// sequence from any cell traces the knight's jump pattern around the board;
/// the center cell (1, 1) is never used.
pub const CLOCKWISE_ORDER: [(usize, usize); 8] = [
    (0, 0),
    (1, 2),
    (2, 0),
    (0, 1),
    (2, 2),
    (1, 0),
    (0, 2),
    (2, 1),
];

/// A 3x3 grid of display cells; the center cell is always empty.
pub type Grid = [[String; 3]; 3];

/// One paardensprong round.
#[derive(Debug, Clone)]
pub struct Paardensprong {
    answer: String,
    direction: Direction,
    start_offset: usize,
    guess: Option<GuessRecord>,
}

impl Paardensprong {
    pub const N_LETTERS: usize = 8;

    /// Construct with every parameter explicit. Validates the answer length
    /// and the start offset; an invalid value aborts construction.
    pub fn new(
        answer: impl Into<String>,
        direction: Direction,
        start_offset: usize,
    ) -> Result<Self, PuzzleError> {
        Ok(Self {
            answer: validate_answer(answer.into(), Self::N_LETTERS)?,
            direction,
            start_offset: validate_start_offset(start_offset, Self::N_LETTERS)?,
            guess: None,
        })
    }

    /// Construct with an explicit answer and a random placement.
    pub fn with_answer<R: Rng>(answer: impl Into<String>, rng: &mut R) -> Result<Self, PuzzleError> {
        Self::new(
            answer,
            Direction::random(rng),
            rng.random_range(0..Self::N_LETTERS),
        )
    }

    /// Construct with an answer drawn uniformly from the corpus.
    pub fn random<R: Rng>(words: &WordList, rng: &mut R) -> Result<Self, PuzzleError> {
        let answer = words.choose(rng).ok_or(PuzzleError::CorpusExhausted)?;
        Self::with_answer(answer.to_string(), rng)
    }

    /// Draw fresh answers until one yields a unique puzzle. Fails with
    /// `CorpusExhausted` only once every corpus word has been tried.
    pub fn generate_unique<R: Rng>(words: &WordList, rng: &mut R) -> Result<Self, PuzzleError> {
        let mut tried: HashSet<&str> = HashSet::new();
        while tried.len() < words.len() {
            let answer = words.choose(rng).ok_or(PuzzleError::CorpusExhausted)?;
            if !tried.insert(answer) {
                continue;
            }
            let puzzle = Self::with_answer(answer.to_string(), rng)?;
            if puzzle.has_unique_solution(words) {
                return Ok(puzzle);
            }
        }
        Err(PuzzleError::CorpusExhausted)
    }

    /// Re-roll direction and start offset, keeping the answer. Clears any
    /// recorded guess.
    pub fn reroll<R: Rng>(&mut self, rng: &mut R) {
        self.direction = Direction::random(rng);
        self.start_offset = rng.random_range(0..Self::N_LETTERS);
        self.guess = None;
    }

    /// Lay the answer out on the grid: walk the circular sequence from the
    /// start offset and assign each letter to the next cell in
    /// `CLOCKWISE_ORDER`. Pure and deterministic.
    pub fn layout(&self) -> Grid {
        let mut grid: Grid = Default::default();
        let walked = circular_walk(&self.answer, self.start_offset, self.direction);
        for (&(row, col), letter) in CLOCKWISE_ORDER.iter().zip(walked) {
            grid[row][col] = letter.to_string();
        }
        grid
    }
}

impl RotationPuzzle for Paardensprong {
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

    /// Rotations may not lead to an alternative solution: if any nontrivial
    /// rotation of the answer is itself a corpus word, some other (offset,
    /// direction) pair would land on it and the grid would be ambiguous.
    /// Only rotations are checked; the grid does not expose reading
    /// direction to the solver.
    fn has_unique_solution(&self, words: &WordList) -> bool {
        (1..Self::N_LETTERS).all(|i| !words.contains(&rotate(&self.answer, i)))
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
