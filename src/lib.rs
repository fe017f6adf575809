//! Aargon Puzzle Solver Library
//!
//! Simulates colored laser beams on a grid of lasers, coins and reflectors,
//! and searches for reflector placements that light every coin.

pub mod beam;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pieces;
mod propagation;
pub mod puzzles;
pub mod reflector;
pub mod solver;

use error::BoardError;
use puzzles::Puzzle;
use solver::{CancelToken, Inventory, Placement, SearchConfig, SearchStats, SearchStatus, Solver};

/// Coin tally and text rendering of a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub rendered: String,
    pub lit_coins: usize,
    pub coins: usize,
}

impl BoardView {
    fn of<const COLS: usize, const ROWS: usize>(board: &grid::Board<COLS, ROWS>) -> Self {
        Self {
            rendered: grid::format_board(board),
            lit_coins: board.lit_coins(),
            coins: board.coin_count(),
        }
    }
}

/// Result of searching a built-in puzzle.
#[derive(Clone, Debug)]
pub struct PuzzleReport {
    pub status: SearchStatus,
    /// The solved board, or the starting board if no solution was found.
    pub board: BoardView,
    pub placements: Vec<Placement>,
    pub stats: SearchStats,
}

/// Trait that erases compile-time board dimensions for dynamic dispatch.
///
/// `COLS` and `ROWS` are hidden behind the vtable, so callers can work with
/// any puzzle without turbofish.
pub trait PuzzleOps {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Board size as (columns, rows).
    fn dimensions(&self) -> (usize, usize);
    fn inventory(&self) -> Inventory;
    /// The starting board after propagation.
    fn view(&self) -> Result<BoardView, BoardError>;
    fn solve(&self, config: SearchConfig, cancel: CancelToken) -> Result<PuzzleReport, BoardError>;
}

impl<const COLS: usize, const ROWS: usize> PuzzleOps for Puzzle<COLS, ROWS> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn dimensions(&self) -> (usize, usize) {
        (COLS, ROWS)
    }

    fn inventory(&self) -> Inventory {
        Puzzle::inventory(self)
    }

    fn view(&self) -> Result<BoardView, BoardError> {
        Ok(BoardView::of(&self.board()?))
    }

    fn solve(&self, config: SearchConfig, cancel: CancelToken) -> Result<PuzzleReport, BoardError> {
        let board = self.board()?;
        let report = Solver::new(config)
            .with_cancel_token(cancel)
            .run(&board, &Puzzle::inventory(self))?;

        let status = report.outcome.status();
        let (view, placements) = match report.outcome.into_solution() {
            Some(solution) => (BoardView::of(&solution.board), solution.placements),
            None => (BoardView::of(&board), Vec::new()),
        };
        Ok(PuzzleReport {
            status,
            board: view,
            placements,
            stats: report.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles::{find_puzzle, SPLITTER_DEMO};

    #[test]
    fn test_view_reports_coin_tally() {
        let view = SPLITTER_DEMO.view().unwrap();
        assert_eq!((view.lit_coins, view.coins), (1, 1));
        assert_eq!(view.rendered.lines().count(), 2 * 11 + 1);
        assert!(view.rendered.contains(" CY"));
    }

    #[test]
    fn test_solved_demo_reports_no_placements() {
        let puzzle = find_puzzle("converter-loop").unwrap();
        let report = puzzle.solve(SearchConfig::default(), CancelToken::new()).unwrap();
        assert_eq!(report.status, SearchStatus::Solved);
        assert!(report.placements.is_empty());
        assert_eq!(report.stats.evaluations, 0);
    }

    #[test]
    fn test_coinless_demo_is_already_solved() {
        let puzzle = find_puzzle("double").unwrap();
        let report = puzzle.solve(SearchConfig::default(), CancelToken::new()).unwrap();
        assert_eq!(report.status, SearchStatus::Solved);
        assert_eq!(report.board.coins, 0);
    }

    #[test]
    fn test_limited_search_keeps_starting_board() {
        let puzzle = find_puzzle("aargon").unwrap();
        let limited = SearchConfig {
            max_evaluations: Some(0),
            ..SearchConfig::default()
        };
        let report = puzzle.solve(limited, CancelToken::new()).unwrap();
        assert_eq!(report.status, SearchStatus::LimitReached);
        assert!(report.placements.is_empty());
        assert_eq!(report.board, puzzle.view().unwrap());
    }
}
