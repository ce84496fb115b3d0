//! Steepest-descent local search on [`Goal::distance`].

use super::budget::Budget;
use super::{HillClimbOptions, SearchError};
use crate::board::Board;
use crate::goal::Goal;
use crate::moves::{successors, Step};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Climbs from `start`, restarting from a random walk whenever no successor
/// strictly improves the distance.
///
/// Every climb strictly decreases the distance, so each one ends. The seed
/// fixes the walks, which makes the result reproducible.
pub(crate) fn climb<G: Goal + ?Sized>(
    start: &Board,
    goal: &G,
    options: &HillClimbOptions,
    budget: &mut Budget,
) -> Result<Option<Vec<Step>>, SearchError> {
    let mut rng = StdRng::seed_from_u64(options.seed);

    for attempt in 0..=options.restarts {
        let (mut board, mut path) = if attempt == 0 {
            (start.clone(), Vec::new())
        } else {
            random_walk(start, options.walk_length, &mut rng)
        };

        loop {
            if goal.is_satisfied(&board) {
                return Ok(Some(path));
            }
            budget.expand(0)?;

            let current = goal.distance(&board);
            let mut best: Option<(usize, Step, Board)> = None;
            for (step, next) in successors(&board) {
                budget.generated();
                let distance = goal.distance(&next);
                let improves = match &best {
                    Some((best_distance, _, _)) => distance < *best_distance,
                    None => distance < current,
                };
                if improves {
                    best = Some((distance, step, next));
                }
            }

            match best {
                Some((_, step, next)) => {
                    path.push(step);
                    board = next;
                }
                None => {
                    debug!(
                        "Local optimum at distance {} after {} steps (attempt {})",
                        current,
                        path.len(),
                        attempt
                    );
                    break;
                }
            }
        }
    }

    Ok(None)
}

fn random_walk(start: &Board, length: usize, rng: &mut StdRng) -> (Board, Vec<Step>) {
    let mut board = start.clone();
    let mut path = Vec::with_capacity(length);
    for _ in 0..length {
        let options: Vec<(Step, Board)> = successors(&board).collect();
        let Some((step, next)) = options.choose(rng).cloned() else {
            break;
        };
        path.push(step);
        board = next;
    }
    (board, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::goal::CoverTargets;
    use crate::moves::replay;
    use crate::search::SearchLimits;

    #[test]
    fn walks_straight_to_a_target() {
        let board: Board = "PEEE".parse().unwrap();
        let goal = CoverTargets::new(&board, [Coord::new(0, 3)]).unwrap();
        let mut budget = Budget::new(SearchLimits::default());
        let path = climb(&board, &goal, &HillClimbOptions::default(), &mut budget)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 3);
        assert!(goal.is_satisfied(&replay(&board, &path).unwrap()));
    }

    #[test]
    fn gives_up_without_improvement() {
        // The piece must leave the target row before it can reach it.
        let board: Board = "PGE\nEEE".parse().unwrap();
        let goal = CoverTargets::new(&board, [Coord::new(0, 2)]).unwrap();
        let options = HillClimbOptions {
            seed: 3,
            restarts: 0,
            walk_length: 0,
        };
        let mut budget = Budget::new(SearchLimits::default());
        assert_eq!(climb(&board, &goal, &options, &mut budget), Ok(None));
        assert_eq!(budget.stats().expanded, 1);
    }

    #[test]
    fn same_seed_same_answer() {
        let board: Board = "PEGE\nEEGE\nEEEE".parse().unwrap();
        let goal = CoverTargets::new(&board, [Coord::new(0, 3)]).unwrap();
        let options = HillClimbOptions {
            seed: 42,
            restarts: 32,
            walk_length: 6,
        };
        let run = || {
            let mut budget = Budget::new(SearchLimits::default());
            climb(&board, &goal, &options, &mut budget).unwrap()
        };
        let first = run();
        assert_eq!(first, run());
        if let Some(path) = first {
            assert!(goal.is_satisfied(&replay(&board, &path).unwrap()));
        }
    }
}
