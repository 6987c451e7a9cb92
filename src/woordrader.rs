//! The woordrader: a 12-letter anagram game where letters are bought one by
//! one. Each shown letter may be a lie or unknown; buying it reveals the
//! truth in the bottom row.

use once_cell::sync::Lazy;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use thiserror::Error;

use crate::puzzle::{grade, GuessRecord, PuzzleError};
use crate::wordlist::WordList;

/// How often each letter opens a Dutch word, over words of all lengths.
/// Wrong letters are drawn from this distribution so lies look plausible.
pub const LETTER_OCCURRENCE_FIRST_POSITION: [(&str, f64); 27] = [
    ("b", 0.09775666589860389),
    ("s", 0.08800817691439645),
    ("k", 0.0707917545507719),
    ("v", 0.06328837212050314),
    ("a", 0.05666530778638402),
    ("g", 0.05500511057149778),
    ("m", 0.05450291568443255),
    ("p", 0.051217970305511736),
    ("d", 0.04955186491548356),
    ("o", 0.04610149063258831),
    ("h", 0.044588997796250675),
    ("t", 0.04389183312950129),
    ("l", 0.040642336801432144),
    ("r", 0.03712106441683357),
    ("c", 0.03528953012283096),
    ("w", 0.03527771377254707),
    ("i", 0.024229426257111965),
    ("z", 0.024229426257111965),
    ("e", 0.023768588596040342),
    ("f", 0.023124597505568455),
    ("n", 0.015668480476435244),
    ("j", 0.008690925633799489),
    ("u", 0.007751525786230407),
    ("ij", 0.0017724525425831723),
    ("q", 0.0005730929887685591),
    ("y", 0.0002895005819552515),
    ("x", 0.00020087795482609286),
];

static WRONG_LETTER_WEIGHTS: Lazy<WeightedIndex<f64>> = Lazy::new(|| {
    WeightedIndex::new(LETTER_OCCURRENCE_FIRST_POSITION.iter().map(|(_, w)| *w))
        .expect("letter occurrence table has positive weights")
});

/// The placeholder shown when a slot's letter is unknown.
pub const UNKNOWN: &str = "-";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuyError {
    #[error("position must lie in 0..{n_letters}, not {position}")]
    OutOfRange { position: usize, n_letters: usize },
    #[error("position {0} already bought")]
    AlreadyBought(usize),
}

/// One of the twelve quiz positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterSlot {
    /// What the top row shows: the true letter, a lie, or [`UNKNOWN`].
    pub shown: String,
    /// Where this slot's letter sits in the answer.
    pub answer_position: usize,
    pub bought: bool,
    /// Whether the shown letter is the true letter.
    pub correct: bool,
    pub true_letter: char,
}

/// One woordrader round.
#[derive(Debug, Clone)]
pub struct WoordRader {
    answer: String,
    /// Indexed by quiz position.
    slots: Vec<LetterSlot>,
    guess: Option<GuessRecord>,
}

impl WoordRader {
    pub const N_LETTERS: usize = 12;

    /// Set up a round. Each answer letter lands on a random quiz position;
    /// with probability `p_wrong` its slot shows a plausible wrong letter,
    /// with probability `p_unknown` it shows the unknown placeholder.
    pub fn new<R: Rng>(
        answer: impl Into<String>,
        p_wrong: f64,
        p_unknown: f64,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let answer = answer.into();
        if answer.chars().count() != Self::N_LETTERS {
            return Err(PuzzleError::WrongAnswerLength {
                expected: Self::N_LETTERS,
                answer,
            });
        }
        for p in [p_wrong, p_unknown] {
            if !(0.0..=1.0).contains(&p) {
                return Err(PuzzleError::InvalidProbability(p));
            }
        }
        if p_wrong + p_unknown > 1.0 {
            return Err(PuzzleError::ProbabilitySum { p_wrong, p_unknown });
        }

        let mut quiz_positions: Vec<usize> = (0..Self::N_LETTERS).collect();
        quiz_positions.shuffle(rng);

        let mut slots = vec![None; Self::N_LETTERS];
        for (answer_position, (letter, &quiz_position)) in
            answer.chars().zip(&quiz_positions).enumerate()
        {
            let draw: f64 = rng.random();
            let (shown, correct) = if draw < p_wrong {
                let index = WRONG_LETTER_WEIGHTS.sample(rng);
                (LETTER_OCCURRENCE_FIRST_POSITION[index].0.to_string(), false)
            } else if draw < p_wrong + p_unknown {
                (UNKNOWN.to_string(), false)
            } else {
                (letter.to_string(), true)
            };
            slots[quiz_position] = Some(LetterSlot {
                shown,
                answer_position,
                bought: false,
                correct,
                true_letter: letter,
            });
        }
        Ok(Self {
            answer,
            // the shuffle is a permutation, every slot is filled
            slots: slots.into_iter().flatten().collect(),
            guess: None,
        })
    }

    /// Set up a round with an answer drawn uniformly from the corpus.
    /// Anagram uniqueness is guaranteed by corpus curation, not checked here.
    pub fn random<R: Rng>(
        words: &WordList,
        p_wrong: f64,
        p_unknown: f64,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let answer = words.choose(rng).ok_or(PuzzleError::CorpusExhausted)?;
        Self::new(answer.to_string(), p_wrong, p_unknown, rng)
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn slots(&self) -> &[LetterSlot] {
        &self.slots
    }

    /// Buy the letter at a quiz position. Returns where the letter lands in
    /// the bottom row and what to show there: the true letter, or `"?"` when
    /// the slot had been lying.
    pub fn buy_letter(&mut self, quiz_position: usize) -> Result<(usize, String), BuyError> {
        let slot = self
            .slots
            .get_mut(quiz_position)
            .ok_or(BuyError::OutOfRange {
                position: quiz_position,
                n_letters: Self::N_LETTERS,
            })?;
        if slot.bought {
            return Err(BuyError::AlreadyBought(quiz_position));
        }
        slot.bought = true;
        let revealed = if slot.correct {
            slot.true_letter.to_string()
        } else {
            "?".to_string()
        };
        Ok((slot.answer_position, revealed))
    }

    /// The top row by quiz position: the shown letter, blank once bought.
    pub fn top_row(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| {
                if slot.bought {
                    String::new()
                } else {
                    slot.shown.clone()
                }
            })
            .collect()
    }

    /// The bottom row by answer position: bought letters in place (a lie
    /// shows `"?"`), blanks elsewhere.
    pub fn bottom_row(&self) -> Vec<String> {
        let mut row = vec![String::new(); Self::N_LETTERS];
        for slot in &self.slots {
            if slot.bought {
                row[slot.answer_position] = if slot.correct {
                    slot.true_letter.to_string()
                } else {
                    "?".to_string()
                };
            }
        }
        row
    }

    /// Normalize both guess and answer, compare, and record the result.
    pub fn grade_guess(&mut self, raw_guess: &str) -> bool {
        let record = grade(&self.answer, raw_guess);
        let correct = record.correct;
        self.guess = Some(record);
        correct
    }

    pub fn guess(&self) -> Option<&GuessRecord> {
        self.guess.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    const ANSWER: &str = "schoolgebouw";

    fn honest(rng: &mut StdRng) -> WoordRader {
        WoordRader::new(ANSWER, 0.0, 0.0, rng).unwrap()
    }

    #[test]
    fn test_rejects_wrong_answer_length() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = WoordRader::new("kat", 0.05, 0.05, &mut rng).unwrap_err();
        assert!(matches!(err, PuzzleError::WrongAnswerLength { .. }));
    }

    #[test]
    fn test_rejects_invalid_probabilities() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = WoordRader::new(ANSWER, 1.5, 0.0, &mut rng).unwrap_err();
        assert_eq!(err, PuzzleError::InvalidProbability(1.5));

        let err = WoordRader::new(ANSWER, 0.0, -0.1, &mut rng).unwrap_err();
        assert_eq!(err, PuzzleError::InvalidProbability(-0.1));

        let err = WoordRader::new(ANSWER, 0.6, 0.6, &mut rng).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::ProbabilitySum {
                p_wrong: 0.6,
                p_unknown: 0.6
            }
        );
    }

    #[test]
    fn test_honest_round_permutes_answer_letters() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = honest(&mut rng);

        let mut shown: Vec<String> = game.top_row();
        shown.sort();
        let mut letters: Vec<String> = ANSWER.chars().map(|c| c.to_string()).collect();
        letters.sort();
        assert_eq!(shown, letters);

        // every slot honest, every answer position covered exactly once
        let mut positions: Vec<usize> = game.slots().iter().map(|s| s.answer_position).collect();
        positions.sort_unstable();
        assert_eq!(positions, (0..12).collect::<Vec<_>>());
        assert!(game.slots().iter().all(|s| s.correct));
    }

    #[test]
    fn test_all_wrong_round_shows_only_lies() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = WoordRader::new(ANSWER, 1.0, 0.0, &mut rng).unwrap();
        assert!(game.slots().iter().all(|s| !s.correct));
        assert!(game.slots().iter().all(|s| s.shown != UNKNOWN));
    }

    #[test]
    fn test_all_unknown_round_shows_placeholders() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = WoordRader::new(ANSWER, 0.0, 1.0, &mut rng).unwrap();
        assert!(game.top_row().iter().all(|s| s == UNKNOWN));
        assert!(game.slots().iter().all(|s| !s.correct));
    }

    #[test]
    fn test_buying_reveals_true_letter_in_place() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = honest(&mut rng);

        let (answer_position, revealed) = game.buy_letter(0).unwrap();
        let expected = ANSWER.chars().nth(answer_position).unwrap().to_string();
        assert_eq!(revealed, expected);

        assert_eq!(game.top_row()[0], "");
        assert_eq!(game.bottom_row()[answer_position], expected);
    }

    #[test]
    fn test_buying_a_lie_reveals_question_mark() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = WoordRader::new(ANSWER, 1.0, 0.0, &mut rng).unwrap();

        let (answer_position, revealed) = game.buy_letter(3).unwrap();
        assert_eq!(revealed, "?");
        assert_eq!(game.bottom_row()[answer_position], "?");
    }

    #[test]
    fn test_buying_twice_fails() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = honest(&mut rng);

        game.buy_letter(4).unwrap();
        assert_eq!(game.buy_letter(4), Err(BuyError::AlreadyBought(4)));
    }

    #[test]
    fn test_buying_out_of_range_fails() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = honest(&mut rng);

        assert_eq!(
            game.buy_letter(12),
            Err(BuyError::OutOfRange {
                position: 12,
                n_letters: 12
            })
        );
    }

    #[test]
    fn test_buying_everything_spells_the_answer() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = honest(&mut rng);

        for position in 0..12 {
            game.buy_letter(position).unwrap();
        }
        assert_eq!(game.bottom_row().concat(), ANSWER);
        assert!(game.top_row().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_grading_normalizes() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = honest(&mut rng);

        assert!(!game.grade_guess("fout"));
        assert!(game.grade_guess("SCHOOLGEBOUW "));
        assert!(game.guess().unwrap().correct);
    }
}
