use clap::{ArgAction, Parser};
use logic_magnets::{Algorithm, Coord, SolverConfig};
use std::path::PathBuf;

/// Solve a Logic Magnets board and print the moves.
#[derive(Debug, Parser)]
#[command(name = "logic-magnets", version)]
pub struct Cli {
    /// Board file: one row per line, cells E (empty), P (purple), R (red),
    /// G (wall), * (marker). Defaults to the starter board.
    pub board: Option<PathBuf>,

    /// BFS, DFS, UCS or "hill climbing".
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Cell that must be covered, as ROW,COL. Repeatable. Without targets
    /// every cell must be filled.
    #[arg(short, long = "target", value_parser = parse_coord)]
    pub targets: Vec<Coord>,

    #[arg(long)]
    pub max_expansions: Option<u64>,

    #[arg(long)]
    pub max_visited: Option<usize>,

    #[arg(long)]
    pub time_budget_ms: Option<u64>,

    /// Search even when the board is structurally unsolvable.
    #[arg(long)]
    pub no_prune: bool,

    /// Seed for hill-climbing restarts.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub restarts: Option<u32>,

    #[arg(long)]
    pub walk_length: Option<usize>,

    /// Scatter the pieces randomly before solving.
    #[arg(long)]
    pub shuffle: bool,

    /// TOML file with solver settings. Flags take precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// More output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The settings given as flags, to be merged over the config file.
    pub fn overrides(&self) -> SolverConfig {
        SolverConfig {
            algorithm: self.algorithm,
            targets: (!self.targets.is_empty()).then(|| self.targets.clone()),
            max_expansions: self.max_expansions,
            max_visited: self.max_visited,
            time_budget_ms: self.time_budget_ms,
            prune: self.no_prune.then_some(false),
            seed: self.seed,
            restarts: self.restarts,
            walk_length: self.walk_length,
        }
    }
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("bad coordinate {part:?}: {e}"))
    };
    Ok(Coord::new(parse(row)?, parse(col)?))
}
