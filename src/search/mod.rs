//! Search drivers.
//!
//! Breadth-first, depth-first and uniform-cost search share one expansion
//! loop and differ only in their [`frontier::Frontier`]. Hill climbing is a
//! separate local search with random restarts.

mod budget;
mod frontier;
mod hill_climb;

use crate::board::{Board, Coord};
use crate::goal::{FillAll, Goal};
use crate::key::StateKey;
use crate::moves::{successors, Step};
use budget::Budget;
use frontier::{CostQueue, Fifo, Frontier, Lifo, Node};
use fxhash::FxHashSet;
use log::{debug, info, trace};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    HillClimbing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::HillClimbing,
    ];
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "ucs" => Ok(Algorithm::Ucs),
            "hill-climbing" | "hill climbing" | "hillclimbing" => Ok(Algorithm::HillClimbing),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SearchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Ucs => "UCS",
            Algorithm::HillClimbing => "Hill Climbing",
        };
        write!(f, "{}", s)
    }
}

/// Budgets for one search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Nodes expanded (or climbing steps taken).
    pub max_expansions: Option<u64>,
    /// Size of the visited set.
    pub max_visited: Option<usize>,
    /// Wall-clock time, checked before every expansion.
    pub time_budget: Option<Duration>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: u64,
    pub generated: u64,
    pub duplicates: u64,
    pub visited: usize,
    pub max_frontier: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded={} generated={} duplicates={} visited={} max_frontier={}",
            self.expanded, self.generated, self.duplicates, self.visited, self.max_frontier
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("unknown algorithm {0:?}, expected one of BFS, DFS, UCS, Hill Climbing")]
    UnknownAlgorithm(String),
    #[error("resource exhausted: {metric} reached {observed} (limit {limit}); {stats}")]
    ResourceExhausted {
        metric: &'static str,
        limit: u64,
        observed: u64,
        stats: SearchStats,
    },
}

/// Result of a finished search.
///
/// An empty path means the initial board already satisfied the goal or that
/// no path exists. Check the goal on the initial board to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub steps: Vec<Step>,
    pub stats: SearchStats,
}

impl Solution {
    /// Destination of every step, in order.
    pub fn destinations(&self) -> Vec<Coord> {
        self.steps.iter().map(|step| step.to).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HillClimbOptions {
    pub seed: u64,
    /// Restarts allowed after the first climb gets stuck.
    pub restarts: u32,
    /// Random moves made from the initial board before each restart.
    pub walk_length: usize,
}

impl Default for HillClimbOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            restarts: 16,
            walk_length: 8,
        }
    }
}

/// Configurable entry point for all strategies.
///
/// ```
/// use logic_magnets::{Algorithm, Board, Solver};
///
/// let board: Board = "PR\nGE".parse().unwrap();
/// let solution = Solver::new(Algorithm::Bfs).run(&board).unwrap();
/// assert!(solution.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Solver<G = FillAll> {
    algorithm: Algorithm,
    goal: G,
    limits: SearchLimits,
    prune_unreachable: bool,
    hill_climb: HillClimbOptions,
}

impl Solver<FillAll> {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            goal: FillAll,
            limits: SearchLimits::default(),
            prune_unreachable: true,
            hill_climb: HillClimbOptions::default(),
        }
    }
}

impl<G: Goal> Solver<G> {
    pub fn with_goal<H: Goal>(self, goal: H) -> Solver<H> {
        Solver {
            algorithm: self.algorithm,
            goal,
            limits: self.limits,
            prune_unreachable: self.prune_unreachable,
            hill_climb: self.hill_climb,
        }
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Skip the search when the goal's structural check already rules out
    /// a solution. On by default.
    pub fn prune_unreachable(mut self, prune: bool) -> Self {
        self.prune_unreachable = prune;
        self
    }

    pub fn hill_climb(mut self, options: HillClimbOptions) -> Self {
        self.hill_climb = options;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn goal(&self) -> &G {
        &self.goal
    }

    pub fn run(&self, board: &Board) -> Result<Solution, SearchError> {
        let mut budget = Budget::new(self.limits);
        debug!(
            "{} search on a {}x{} board with {} pieces",
            self.algorithm,
            board.rows(),
            board.cols(),
            board.piece_count()
        );

        let found = if self.prune_unreachable
            && !self.goal.is_satisfied(board)
            && !self.goal.is_reachable(board)
        {
            debug!("Goal is structurally unreachable, skipping search");
            None
        } else {
            match self.algorithm {
                Algorithm::Bfs => explore(board, &self.goal, Fifo::default(), &mut budget)?,
                Algorithm::Dfs => explore(board, &self.goal, Lifo::default(), &mut budget)?,
                Algorithm::Ucs => explore(board, &self.goal, CostQueue::default(), &mut budget)?,
                Algorithm::HillClimbing => {
                    hill_climb::climb(board, &self.goal, &self.hill_climb, &mut budget)?
                }
            }
        };

        let stats = budget.stats();
        match &found {
            Some(steps) => info!(
                "{} found a {}-move solution ({})",
                self.algorithm,
                steps.len(),
                stats
            ),
            None => info!("{} found no solution ({})", self.algorithm, stats),
        }

        Ok(Solution {
            steps: found.unwrap_or_default(),
            stats,
        })
    }
}

/// Destinations of the first path found from `board` to a board without
/// empty cells.
pub fn solve(board: &Board, algorithm: Algorithm) -> Result<Vec<Coord>, SearchError> {
    Ok(Solver::new(algorithm).run(board)?.destinations())
}

/// Like [`solve`], with the algorithm given by name.
pub fn solve_named(board: &Board, algorithm: &str) -> Result<Vec<Coord>, SearchError> {
    solve(board, algorithm.parse()?)
}

/// Expands nodes in frontier order until one satisfies `goal`.
///
/// Boards are marked visited when generated, so each state enters the
/// frontier at most once. This keeps uniform-cost search exact only because
/// every step costs the same.
fn explore<G, F>(
    start: &Board,
    goal: &G,
    mut frontier: F,
    budget: &mut Budget,
) -> Result<Option<Vec<Step>>, SearchError>
where
    G: Goal + ?Sized,
    F: Frontier,
{
    let mut visited: FxHashSet<StateKey> = FxHashSet::default();
    visited.insert(StateKey::of(start));
    budget.visited(visited.len())?;
    frontier.push(Node::root(start.clone()));

    while let Some(node) = frontier.pop() {
        if goal.is_satisfied(&node.board) {
            return Ok(Some(node.path));
        }

        budget.expand(frontier.len())?;
        if budget.stats().expanded % 100_000 == 0 {
            trace!("{}", budget.stats());
        }

        for (step, next) in successors(&node.board) {
            budget.generated();
            if visited.insert(StateKey::of(&next)) {
                budget.visited(visited.len())?;
                frontier.push(node.child(step, next));
            } else {
                budget.duplicate();
            }
        }
    }

    Ok(None)
}
