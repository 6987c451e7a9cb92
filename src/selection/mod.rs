//! Hard-mode puzzle selection: a weighted draw over stored candidates,
//! favoring the ones whose predicted success probability sits closest to
//! a coin flip.

use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use thiserror::Error;

use crate::storage::{PuzzleKind, PuzzleOption, Storage, StorageError};

/// The weighting power used in production. Higher values concentrate the
/// draw on probabilities near 0.5.
pub const HARD_MODE_POWER: f64 = 10.0;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("no stored puzzle options carry a predicted probability")]
    NoCandidates,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The selection weight of one candidate: `(p - p^2)^n`. Maximal at
/// p = 0.5, zero at p = 0 and p = 1.
pub fn probability_option(p: f64, n: f64) -> f64 {
    (p - p * p).powf(n)
}

/// Draw one candidate of the given kind, weighted by `probability_option`.
/// The chosen row is marked used immediately: its replay counter is bumped
/// and its probability cleared, so it cannot be drawn again before the next
/// prediction run refreshes it.
pub fn select_hard_puzzle<R: Rng>(
    storage: &Storage,
    kind: PuzzleKind,
    rng: &mut R,
) -> Result<PuzzleOption, SelectionError> {
    let candidates: Vec<PuzzleOption> = storage
        .puzzle_options(kind)?
        .into_iter()
        .filter(|option| option.probability.is_some())
        .collect();
    if candidates.is_empty() {
        return Err(SelectionError::NoCandidates);
    }

    let weights: Vec<f64> = candidates
        .iter()
        .filter_map(|option| option.probability)
        .map(|p| probability_option(p, HARD_MODE_POWER))
        .collect();
    // all-zero weights happen when every candidate sits at p = 0 or p = 1
    let distribution = WeightedIndex::new(&weights).map_err(|_| SelectionError::NoCandidates)?;
    let chosen = candidates[distribution.sample(rng)].clone();
    log::info!(
        "hard mode selected {:?} {:?} (p = {:?})",
        kind,
        chosen.answer,
        chosen.probability
    );

    storage.mark_option_used(kind, &chosen.answer)?;
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Direction;
    use rand::rngs::StdRng;

    fn option(answer: &str, probability: Option<f64>) -> PuzzleOption {
        PuzzleOption {
            kind: PuzzleKind::Paardensprong,
            answer: answer.to_string(),
            direction: Direction::Forward,
            start_offset: 0,
            probability,
            times_seen: 0,
        }
    }

    #[test]
    fn test_probability_option_peaks_at_half() {
        assert!(probability_option(0.5, 10.0) > probability_option(0.4, 10.0));
        assert!(probability_option(0.4, 10.0) > probability_option(0.1, 10.0));
        assert_eq!(probability_option(0.0, 10.0), 0.0);
        assert_eq!(probability_option(1.0, 10.0), 0.0);
    }

    #[test]
    fn test_selection_favors_probabilities_near_half() {
        let storage = Storage::open_in_memory().unwrap();
        storage.insert_puzzle_option(&option("autolamp", Some(0.5))).unwrap();
        storage.insert_puzzle_option(&option("krokodil", Some(0.95))).unwrap();

        // with n = 10 the 0.5 candidate outweighs the 0.95 one by orders of
        // magnitude, so a handful of draws should never pick the latter
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5 {
            storage.insert_puzzle_option(&option("autolamp", Some(0.5))).unwrap();
            storage.insert_puzzle_option(&option("krokodil", Some(0.95))).unwrap();
            let chosen = select_hard_puzzle(&storage, PuzzleKind::Paardensprong, &mut rng).unwrap();
            assert_eq!(chosen.answer, "autolamp");
        }
    }

    #[test]
    fn test_selection_marks_chosen_row_used() {
        let storage = Storage::open_in_memory().unwrap();
        storage.insert_puzzle_option(&option("autolamp", Some(0.5))).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let chosen = select_hard_puzzle(&storage, PuzzleKind::Paardensprong, &mut rng).unwrap();
        assert_eq!(chosen.answer, "autolamp");

        let rows = storage.puzzle_options(PuzzleKind::Paardensprong).unwrap();
        assert_eq!(rows[0].times_seen, 1);
        assert_eq!(rows[0].probability, None);

        // the cleared probability removes it from the candidate pool
        let err = select_hard_puzzle(&storage, PuzzleKind::Paardensprong, &mut rng).unwrap_err();
        assert!(matches!(err, SelectionError::NoCandidates));
    }

    #[test]
    fn test_selection_errors_without_candidates() {
        let storage = Storage::open_in_memory().unwrap();
        storage.insert_puzzle_option(&option("autolamp", None)).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let err = select_hard_puzzle(&storage, PuzzleKind::Paardensprong, &mut rng).unwrap_err();
        assert!(matches!(err, SelectionError::NoCandidates));
    }
}
