//! Solver for the Logic Magnets sliding-piece puzzle.
//!
//! A [`Board`] is an immutable grid of cells. Pieces move one step at a time
//! into an adjacent empty cell, and the search drivers in [`search`] look for
//! a move sequence that reaches a [`Goal`].

pub mod board;
pub mod config;
pub mod goal;
pub mod key;
pub mod moves;
pub mod search;

pub use board::{Board, BoardError, Cell, Coord};
pub use config::{ConfigError, SolverConfig};
pub use goal::{is_goal, CoverTargets, FillAll, Goal};
pub use key::StateKey;
pub use moves::{apply_move, legal_destinations, replay, Direction, InvalidMove, Step};
pub use search::{
    solve, solve_named, Algorithm, HillClimbOptions, SearchError, SearchLimits, SearchStats,
    Solution, Solver,
};
