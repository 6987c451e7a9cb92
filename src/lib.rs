//! Tweevoortwaalf - Dutch word puzzles from the television quiz
//!
//! Three games: the paardensprong (an 8-letter word on a 3x3 grid, read in
//! knight's moves), the taartpuzzel (a 9-letter word around a pie with one
//! letter hidden) and the woordrader (a 12-letter anagram with buyable,
//! possibly lying letters). Alongside the games sit the corpus statistics
//! and difficulty features that feed an external win-probability classifier,
//! plus SQLite persistence of games, guesses and hard-mode candidates.

pub mod features;
pub mod puzzle;
pub mod selection;
pub mod stats;
pub mod storage;
pub mod woordrader;
pub mod wordlist;
