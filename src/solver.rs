//! Depth-first placement search.
//!
//! Tries inventory reflectors, in every rotation, on the empty cells that
//! beams already cross. Every candidate board is re-propagated from scratch
//! and the search stops at the first one whose coins are all lit.
//!
//! Key points:
//! - Explicit frame stack instead of recursion
//! - Each frame owns its board, candidates, inventory and excluded cells, so
//!   branches never share mutable state
//! - Cells already offered to an ancestor frame are never offered again
//! - A color-feasibility check drops branches that cannot light every coin
//! - FxHashSet for the excluded-cell set

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::error::BoardError;
use crate::geometry::{Direction, Position};
use crate::grid::Board;
use crate::pieces::PieceTemplate;
use crate::reflector::Reflector;

/// One inventory slot: a reflector template and how many copies are left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InventoryEntry {
    pub template: PieceTemplate,
    pub remaining: u32,
}

/// The pieces a search may still place, in the order they are tried.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` copies of `template`, merging with an existing slot for
    /// the same template.
    pub fn add(&mut self, template: PieceTemplate, count: u32) {
        match self.entries.iter_mut().find(|entry| entry.template == template) {
            Some(entry) => entry.remaining += count,
            None => self.entries.push(InventoryEntry {
                template,
                remaining: count,
            }),
        }
    }

    /// Builder form of [`Inventory::add`].
    pub fn with(mut self, template: PieceTemplate, count: u32) -> Self {
        self.add(template, count);
        self
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Copies left across all slots.
    pub fn total_remaining(&self) -> u32 {
        self.entries.iter().map(|entry| entry.remaining).sum()
    }

    /// True if any converter is still available. Converters are the only
    /// pieces that can produce a color no beam carries yet.
    pub fn has_converter(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.template.reflector == Reflector::Convert && entry.remaining > 0)
    }

    fn take(&mut self, slot: usize) {
        let entry = &mut self.entries[slot];
        entry.remaining = entry.remaining.saturating_sub(1);
    }
}

/// A reflector the search put on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub position: Position,
    pub rotation: Direction,
    pub reflector: Reflector,
}

/// A board with every coin lit, and the placements that led to it.
#[derive(Clone, Debug)]
pub struct Solution<const COLS: usize, const ROWS: usize> {
    pub board: Board<COLS, ROWS>,
    pub placements: Vec<Placement>,
}

/// How a search ended.
#[derive(Clone, Debug)]
pub enum SearchOutcome<const COLS: usize, const ROWS: usize> {
    Solved(Solution<COLS, ROWS>),
    /// Every branch was explored without lighting all coins.
    Exhausted,
    /// The cancel token was tripped.
    Cancelled,
    /// `max_evaluations` boards were evaluated without a solution.
    LimitReached,
}

impl<const COLS: usize, const ROWS: usize> SearchOutcome<COLS, ROWS> {
    pub fn solution(&self) -> Option<&Solution<COLS, ROWS>> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution<COLS, ROWS>> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn status(&self) -> SearchStatus {
        match self {
            SearchOutcome::Solved(_) => SearchStatus::Solved,
            SearchOutcome::Exhausted => SearchStatus::Exhausted,
            SearchOutcome::Cancelled => SearchStatus::Cancelled,
            SearchOutcome::LimitReached => SearchStatus::LimitReached,
        }
    }
}

/// [`SearchOutcome`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    Solved,
    Exhausted,
    Cancelled,
    LimitReached,
}

impl SearchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SearchStatus::Solved => "solved",
            SearchStatus::Exhausted => "exhausted",
            SearchStatus::Cancelled => "cancelled",
            SearchStatus::LimitReached => "evaluation limit reached",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counters collected while searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate boards built and propagated.
    pub evaluations: u64,
    /// Frames popped from the stack and expanded.
    pub frames_expanded: u64,
    pub frames_pushed: u64,
    pub frames_pruned: u64,
    /// Most coins lit on any evaluated board.
    pub max_lit_coins: usize,
}

#[derive(Clone, Debug)]
pub struct SearchReport<const COLS: usize, const ROWS: usize> {
    pub outcome: SearchOutcome<COLS, ROWS>,
    pub stats: SearchStats,
}

/// Search tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Drop branches whose candidate beams cannot supply the coin colors.
    pub prune: bool,
    /// Stop after this many candidate boards.
    pub max_evaluations: Option<u64>,
    /// Log progress every this many evaluations; 0 disables progress logs.
    pub progress_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prune: true,
            max_evaluations: None,
            progress_interval: 10_000,
        }
    }
}

/// Shared flag for stopping a running search from elsewhere.
///
/// The search checks it each time it pops a frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A node of the search frontier.
#[derive(Clone)]
struct Frame<const COLS: usize, const ROWS: usize> {
    board: Board<COLS, ROWS>,
    /// Cells this frame will try, in row-major order.
    candidates: Vec<Position>,
    inventory: Inventory,
    /// Cells an ancestor already tried; never candidates again.
    excluded: FxHashSet<Position>,
    placements: Vec<Placement>,
}

/// Necessary condition for a branch to still be solvable.
///
/// Unlit coins can only be lit by colors that a later placement can route
/// to them, which are the beams crossing the candidate cells, or by
/// changing what already reaches a coin cell. If those do not cover the
/// unlit coins' colors, only a converter can make up the difference.
fn frame_can_be_solved<const COLS: usize, const ROWS: usize>(
    board: &Board<COLS, ROWS>,
    candidates: &[Position],
    inventory: &Inventory,
) -> bool {
    let available = board.beam_colors_at(candidates) | board.coin_beam_colors();
    available.contains(board.missing_colors()) || inventory.has_converter()
}

/// Runs placement searches with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SearchConfig,
    cancel: CancelToken,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Uses `token` to stop the search from outside.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Searches for placements from `inventory` that light every coin on
    /// `board`.
    ///
    /// The board is propagated before searching, so a board that is already
    /// solved comes back as a solution with no placements.
    pub fn run<const COLS: usize, const ROWS: usize>(
        &self,
        board: &Board<COLS, ROWS>,
        inventory: &Inventory,
    ) -> Result<SearchReport<COLS, ROWS>, BoardError> {
        let mut stats = SearchStats::default();

        let mut root = board.clone();
        root.update();
        stats.max_lit_coins = root.lit_coins();
        if root.is_solved() {
            let solution = Solution {
                board: root,
                placements: Vec::new(),
            };
            return Ok(self.finish(SearchOutcome::Solved(solution), stats));
        }

        let candidates = root.available_beam_positions();
        let mut search_stack = vec![Frame {
            board: root,
            candidates,
            inventory: inventory.clone(),
            excluded: FxHashSet::default(),
            placements: Vec::new(),
        }];

        while let Some(frame) = search_stack.pop() {
            if self.cancel.is_cancelled() {
                return Ok(self.finish(SearchOutcome::Cancelled, stats));
            }
            stats.frames_expanded += 1;

            // children never revisit a cell this frame or its ancestors offered
            let mut child_excluded = frame.excluded.clone();
            child_excluded.extend(frame.candidates.iter().copied());

            for &position in &frame.candidates {
                for (slot, entry) in frame.inventory.entries().iter().enumerate() {
                    if entry.remaining == 0 {
                        continue;
                    }

                    for rotation in Direction::ALL {
                        if self
                            .config
                            .max_evaluations
                            .is_some_and(|limit| stats.evaluations >= limit)
                        {
                            return Ok(self.finish(SearchOutcome::LimitReached, stats));
                        }

                        let mut candidate = frame.board.clone();
                        candidate.add(entry.template.place(position, rotation))?;
                        candidate.update();
                        stats.evaluations += 1;

                        let mut placements = frame.placements.clone();
                        placements.push(Placement {
                            position,
                            rotation,
                            reflector: entry.template.reflector,
                        });

                        if candidate.is_solved() {
                            let solution = Solution {
                                board: candidate,
                                placements,
                            };
                            return Ok(self.finish(SearchOutcome::Solved(solution), stats));
                        }

                        stats.max_lit_coins = stats.max_lit_coins.max(candidate.lit_coins());
                        self.report_progress(&stats, search_stack.len(), &candidate);

                        let mut inventory = frame.inventory.clone();
                        inventory.take(slot);

                        let candidates: Vec<Position> = candidate
                            .available_beam_positions()
                            .into_iter()
                            .filter(|cell| !child_excluded.contains(cell))
                            .collect();

                        if self.config.prune
                            && !frame_can_be_solved(&candidate, &candidates, &inventory)
                        {
                            stats.frames_pruned += 1;
                            continue;
                        }

                        stats.frames_pushed += 1;
                        search_stack.push(Frame {
                            board: candidate,
                            candidates,
                            inventory,
                            excluded: child_excluded.clone(),
                            placements,
                        });
                    }
                }
            }
        }

        Ok(self.finish(SearchOutcome::Exhausted, stats))
    }

    fn report_progress<const COLS: usize, const ROWS: usize>(
        &self,
        stats: &SearchStats,
        stack_depth: usize,
        board: &Board<COLS, ROWS>,
    ) {
        let interval = self.config.progress_interval;
        if interval == 0 || stats.evaluations % interval != 0 {
            return;
        }
        log::info!(
            "{} boards evaluated, {} frames queued, best {}/{} coins lit",
            stats.evaluations,
            stack_depth,
            stats.max_lit_coins,
            board.coin_count()
        );
        log::debug!("latest board:\n{board}");
    }

    fn finish<const COLS: usize, const ROWS: usize>(
        &self,
        outcome: SearchOutcome<COLS, ROWS>,
        stats: SearchStats,
    ) -> SearchReport<COLS, ROWS> {
        log::info!(
            "search {} after {} evaluations ({} frames expanded, {} pruned)",
            outcome.status(),
            stats.evaluations,
            stats.frames_expanded,
            stats.frames_pruned
        );
        SearchReport { outcome, stats }
    }
}

/// Searches with the default configuration.
///
/// Returns `Ok(None)` when no placement of the inventory lights every coin.
pub fn solve<const COLS: usize, const ROWS: usize>(
    board: &Board<COLS, ROWS>,
    inventory: &Inventory,
) -> Result<Option<Solution<COLS, ROWS>>, BoardError> {
    let report = Solver::default().run(board, inventory)?;
    Ok(report.outcome.into_solution())
}
