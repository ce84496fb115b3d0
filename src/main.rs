mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use logic_magnets::{replay, Board, CoverTargets, FillAll, Goal, Solver, SolverConfig};
use render::paint;
use std::fs;
use std::io::IsTerminal;
use std::path::Path;

/// Starter board of the original game.
const STARTER_BOARD: &str = "
* G * G *
E E P E E
E E E E E
E E E E E
E E E E E
";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    }
    .merge(cli.overrides());

    let mut board = load_board(cli.board.as_deref())?;
    if cli.shuffle {
        board = board.shuffled(&mut rand::thread_rng());
    }

    match &config.targets {
        Some(targets) => {
            let goal = CoverTargets::new(&board, targets.iter().copied())?;
            solve_and_show(&board, &config, goal)
        }
        None => solve_and_show(&board, &config, FillAll),
    }
}

fn solve_and_show<G: Goal>(board: &Board, config: &SolverConfig, goal: G) -> Result<()> {
    let color = std::io::stdout().is_terminal();
    let show = |board: &Board, highlight| {
        if color {
            paint(board, highlight)
        } else {
            board.to_string()
        }
    };

    println!("Initial board:\n{}", show(board, None));

    if goal.is_satisfied(board) {
        println!("The board is already solved.");
        return Ok(());
    }

    let solver = Solver::new(config.algorithm())
        .with_goal(goal)
        .limits(config.limits())
        .prune_unreachable(config.prune())
        .hill_climb(config.hill_climb());
    let solution = solver.run(board)?;

    if solution.is_empty() {
        println!("No solution found. ({})", solution.stats);
        return Ok(());
    }

    println!(
        "{} found a solution with {} moves. ({})",
        solver.algorithm(),
        solution.len(),
        solution.stats
    );

    let mut current = board.clone();
    for step in &solution.steps {
        current = replay(&current, [step]).context("solver returned an illegal step")?;
        println!("{}\n{}", step, show(&current, Some(step.to)));
    }
    Ok(())
}

fn load_board(path: Option<&Path>) -> Result<Board> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read board file {}", path.display()))?,
        None => STARTER_BOARD.to_string(),
    };
    text.parse::<Board>().context("could not parse board")
}

fn init_logger(verbose: u8) -> Result<()> {
    use simplelog::*;

    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("could not initialise logging")
}
