//! Aargon Puzzle Solver
//!
//! Propagates laser beams through the built-in Aargon levels and searches
//! for reflector placements that light every coin. Progress is logged
//! through `env_logger`; set `RUST_LOG=debug` to also dump boards while
//! searching.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use thiserror::Error;

use aargon::error::BoardError;
use aargon::puzzles::{builtin_puzzles, find_puzzle};
use aargon::solver::{CancelToken, Placement, SearchConfig, SearchStatus};
use aargon::PuzzleOps;

/// Solves Aargon laser puzzles by searching reflector placements.
#[derive(Parser)]
#[command(name = "aargon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in puzzles.
    List,
    /// Print a puzzle's starting board with its beams.
    Show {
        /// Puzzle name, see `list`.
        #[arg(default_value = "aargon")]
        puzzle: String,
    },
    /// Search for placements that light every coin.
    Solve(SolveArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Puzzle name, see `list`.
    #[arg(default_value = "aargon")]
    puzzle: String,
    /// Give up after this many candidate boards.
    #[arg(long)]
    max_evaluations: Option<u64>,
    /// Explore branches even when their beams lack the coin colors.
    #[arg(long)]
    no_prune: bool,
    /// Log progress every N evaluations (0 disables).
    #[arg(long, default_value_t = 10_000)]
    progress_interval: u64,
}

impl SolveArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            prune: !self.no_prune,
            max_evaluations: self.max_evaluations,
            progress_interval: self.progress_interval,
        }
    }
}

impl Default for SolveArgs {
    fn default() -> Self {
        Self {
            puzzle: "aargon".to_string(),
            max_evaluations: None,
            no_prune: false,
            progress_interval: SearchConfig::default().progress_interval,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("unknown puzzle '{0}', run 'aargon list' to see the built-in puzzles")]
    UnknownPuzzle(String),
    #[error(transparent)]
    Board(#[from] BoardError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::List) => {
            print!("{}", format_puzzle_list(&builtin_puzzles()));
            Ok(())
        }
        Some(Command::Show { puzzle }) => run_show(&puzzle),
        Some(Command::Solve(args)) => run_solve(&args),
        // default: solve the full level
        None => run_solve(&SolveArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn lookup(name: &str) -> Result<&'static dyn PuzzleOps, CliError> {
    find_puzzle(name).ok_or_else(|| CliError::UnknownPuzzle(name.to_string()))
}

/// Prints the starting board and its inventory.
fn run_show(name: &str) -> Result<(), CliError> {
    let puzzle = lookup(name)?;
    let view = puzzle.view()?;

    print!("{}", view.rendered);
    println!("{}/{} coins lit", view.lit_coins, view.coins);

    let inventory = puzzle.inventory();
    if inventory.entries().is_empty() {
        println!("No reflectors to place");
    } else {
        for entry in inventory.entries() {
            println!("{} x{}", entry.template.reflector, entry.remaining);
        }
    }
    Ok(())
}

/// Runs the search and prints the solved board, or why it stopped.
fn run_solve(args: &SolveArgs) -> Result<(), CliError> {
    let puzzle = lookup(&args.puzzle)?;
    let (cols, rows) = puzzle.dimensions();
    log::info!(
        "solving {} ({}x{}, {} reflectors to place)",
        puzzle.name(),
        cols,
        rows,
        puzzle.inventory().total_remaining()
    );

    let report = puzzle.solve(args.config(), CancelToken::new())?;

    match report.status {
        SearchStatus::Solved => {
            print!("{}", report.board.rendered);
            print!("{}", format_placements(&report.placements));
        }
        status => {
            println!("No solution ({status})");
            println!(
                "Best board lit {}/{} coins",
                report.stats.max_lit_coins, report.board.coins
            );
        }
    }
    println!(
        "{} boards evaluated, {} frames expanded, {} pruned",
        report.stats.evaluations, report.stats.frames_expanded, report.stats.frames_pruned
    );
    Ok(())
}

/// One line per puzzle: name, size and description.
fn format_puzzle_list(puzzles: &[&dyn PuzzleOps]) -> String {
    let mut output = String::new();
    for puzzle in puzzles {
        let (cols, rows) = puzzle.dimensions();
        output.push_str(&format!(
            "{:<16}{}x{}  {}\n",
            puzzle.name(),
            cols,
            rows,
            puzzle.description()
        ));
    }
    output
}

fn format_placements(placements: &[Placement]) -> String {
    if placements.is_empty() {
        return "Already solved, nothing to place\n".to_string();
    }
    let mut output = format!("Placed {} reflectors:\n", placements.len());
    for (i, placement) in placements.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {} at {} facing {}\n",
            i + 1,
            placement.reflector,
            placement.position,
            placement.rotation
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use aargon::geometry::{Direction, Position};
    use aargon::reflector::Reflector;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solve_flags_build_config() {
        let cli = Cli::try_parse_from([
            "aargon",
            "solve",
            "splitter",
            "--max-evaluations",
            "500",
            "--no-prune",
            "--progress-interval",
            "0",
        ])
        .unwrap();
        let Some(Command::Solve(args)) = cli.command else {
            panic!("expected the solve subcommand");
        };
        assert_eq!(args.puzzle, "splitter");
        assert_eq!(
            args.config(),
            SearchConfig {
                prune: false,
                max_evaluations: Some(500),
                progress_interval: 0,
            }
        );
    }

    #[test]
    fn test_default_solve_args_match_default_config() {
        let cli = Cli::try_parse_from(["aargon", "solve"]).unwrap();
        let Some(Command::Solve(args)) = cli.command else {
            panic!("expected the solve subcommand");
        };
        assert_eq!(args.puzzle, SolveArgs::default().puzzle);
        assert_eq!(args.config(), SearchConfig::default());
        assert_eq!(SolveArgs::default().config(), SearchConfig::default());
    }

    #[test]
    fn test_unknown_puzzle_is_reported() {
        let err = lookup("marble-run").err().unwrap();
        assert_eq!(
            err.to_string(),
            "unknown puzzle 'marble-run', run 'aargon list' to see the built-in puzzles"
        );
    }

    #[test]
    fn test_puzzle_list_snapshot() {
        insta::assert_snapshot!(format_puzzle_list(&builtin_puzzles()), @r"
        aargon          15x11  prism ring with one-way gates, lit by a single white laser
        one-way         18x11  a one-way gate blocks a blue beam and lets a red one through
        prism           18x11  white and green beams hitting a prism from three sides
        splitter        18x11  a green beam split sideways into red and blue beams
        converter-loop  18x11  a reflective cycle through a converter that settles and lights a white coin
        double          18x11  two lasers absorbed by the faces of a double mirror
        ");
    }

    #[test]
    fn test_format_placements() {
        let placements = [
            Placement {
                position: Position::new(2, 2),
                rotation: Direction::SouthWest,
                reflector: Reflector::Mirror,
            },
            Placement {
                position: Position::new(10, 4),
                rotation: Direction::East,
                reflector: Reflector::Convert,
            },
        ];
        assert_eq!(
            format_placements(&placements),
            "Placed 2 reflectors:\n  1. mirror at (2, 2) facing SW\n  2. convert at (10, 4) facing E\n"
        );
        assert_eq!(format_placements(&[]), "Already solved, nothing to place\n");
    }
}
