//! Board storage, queries and text rendering.
//!
//! Generic over board width (`COLS`) and height (`ROWS`). Pieces and the
//! per-cell beam ledger live in two flat row-major vectors of `COLS * ROWS`
//! cells. Propagation, which fills the ledger, lives in `propagation.rs`.

use std::fmt;

use crate::beam::{Beam, Color};
use crate::error::BoardError;
use crate::geometry::Position;
use crate::pieces::{Piece, PieceKind};

/// Converts an in-bounds (x, y) cell to a linear index.
///
/// Index order is row-major: `idx = y * COLS + x`.
#[inline(always)]
pub const fn cell_index<const COLS: usize>(x: i32, y: i32) -> usize {
    (y as usize) * COLS + (x as usize)
}

/// Converts a linear cell index back to its position.
#[inline(always)]
pub const fn idx_to_position<const COLS: usize>(cell_index: usize) -> Position {
    Position::new((cell_index % COLS) as i32, (cell_index / COLS) as i32)
}

/// A fixed-size grid of optional pieces plus the beams crossing each cell.
///
/// Cloning copies every piece but starts with an empty ledger; call
/// [`Board::update`] on the clone to rebuild its beams.
#[derive(Debug)]
pub struct Board<const COLS: usize, const ROWS: usize> {
    pub(crate) cells: Vec<Option<Piece>>,
    pub(crate) beams: Vec<Vec<Beam>>,
}

impl<const COLS: usize, const ROWS: usize> Board<COLS, ROWS> {
    pub const CELLS: usize = COLS * ROWS;

    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: vec![None; Self::CELLS],
            beams: vec![Vec::new(); Self::CELLS],
        }
    }

    /// True if `position` lies on the board.
    #[inline]
    pub const fn contains(position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < COLS
            && (position.y as usize) < ROWS
    }

    #[inline]
    pub(crate) const fn index_of(position: Position) -> Option<usize> {
        if Self::contains(position) {
            Some(cell_index::<COLS>(position.x, position.y))
        } else {
            None
        }
    }

    fn checked_index(position: Position) -> Result<usize, BoardError> {
        Self::index_of(position).ok_or(BoardError::OutOfBounds {
            position,
            cols: COLS,
            rows: ROWS,
        })
    }

    /// Places a piece at its own recorded position.
    pub fn add(&mut self, piece: Piece) -> Result<(), BoardError> {
        let idx = Self::checked_index(piece.position)?;
        let cell = &mut self.cells[idx];
        if cell.is_some() {
            return Err(BoardError::CellOccupied {
                position: piece.position,
            });
        }
        *cell = Some(piece);
        Ok(())
    }

    /// The piece occupying `position`, if any.
    pub fn piece_at(&self, position: Position) -> Result<Option<&Piece>, BoardError> {
        let idx = Self::checked_index(position)?;
        Ok(self.cells[idx].as_ref())
    }

    /// Beams recorded at `position` by the last [`Board::update`].
    pub fn beams_at(&self, position: Position) -> Result<&[Beam], BoardError> {
        let idx = Self::checked_index(position)?;
        Ok(&self.beams[idx])
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    pub fn coins(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(|piece| piece.is_coin())
    }

    /// True when every coin on the board is lit.
    pub fn is_solved(&self) -> bool {
        self.coins().all(Piece::is_lit)
    }

    pub fn lit_coins(&self) -> usize {
        self.coins().filter(|coin| coin.is_lit()).count()
    }

    pub fn coin_count(&self) -> usize {
        self.coins().count()
    }

    /// Union of the colors asked for by coins that are not lit yet.
    pub fn missing_colors(&self) -> Color {
        self.pieces()
            .filter_map(|piece| match piece.kind {
                PieceKind::Coin { color, lit: false } => Some(color),
                _ => None,
            })
            .fold(Color::NONE, Color::mix)
    }

    /// Union of the colors of all beams crossing coin cells.
    pub fn coin_beam_colors(&self) -> Color {
        self.beam_colors_at(self.coins().map(|coin| &coin.position))
    }

    /// Union of the colors of all beams recorded at `positions`.
    ///
    /// Positions off the board contribute nothing.
    pub fn beam_colors_at<'a>(&self, positions: impl IntoIterator<Item = &'a Position>) -> Color {
        positions
            .into_iter()
            .filter_map(|&position| Self::index_of(position))
            .flat_map(|idx| self.beams[idx].iter())
            .fold(Color::NONE, |acc, beam| acc.mix(beam.color))
    }

    /// Empty cells crossed by at least one beam, in row-major order.
    ///
    /// A new reflector is only worth placing where a beam will hit it.
    pub fn available_beam_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .zip(&self.beams)
            .enumerate()
            .filter(|(_, (piece, beams))| piece.is_none() && !beams.is_empty())
            .map(|(idx, _)| idx_to_position::<COLS>(idx))
            .collect()
    }

    pub(crate) fn clear_beams(&mut self) {
        for ledger in &mut self.beams {
            ledger.clear();
        }
    }
}

impl<const COLS: usize, const ROWS: usize> Default for Board<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> Clone for Board<COLS, ROWS> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            beams: vec![Vec::new(); Self::CELLS],
        }
    }
}

impl<const COLS: usize, const ROWS: usize> fmt::Display for Board<COLS, ROWS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_board(self))
    }
}

/// Three-character label for a cell holding a piece.
fn piece_label(piece: &Piece) -> String {
    match piece.kind {
        PieceKind::Reflector(reflector) => {
            let symbol = reflector.symbol();
            if symbol.len() == 1 {
                format!(" {symbol} ")
            } else {
                format!("{symbol:>3}")
            }
        }
        PieceKind::Coin { color, .. } => format!(" C{}", color.letter()),
        PieceKind::Laser { color } => format!(" L{}", color.letter()),
    }
}

/// Three-character label for an empty cell, summarizing its beams.
fn beams_label(beams: &[Beam]) -> String {
    match beams {
        [] => "   ".to_string(),
        [beam] => format!(" B{}", beam.color.letter()),
        _ => " B*".to_string(),
    }
}

/// Formats a board as a human-readable grid.
///
/// Each cell is three characters between `|` separators. Pieces show their
/// symbol or kind and color letter; empty cells show the beams crossing them.
pub fn format_board<const COLS: usize, const ROWS: usize>(board: &Board<COLS, ROWS>) -> String {
    let separator = "-".repeat(COLS * 4 + 1);

    let mut output = String::new();
    output.push_str(&separator);
    output.push('\n');

    for y in 0..ROWS {
        output.push('|');
        for x in 0..COLS {
            let idx = y * COLS + x;
            let label = match &board.cells[idx] {
                Some(piece) => piece_label(piece),
                None => beams_label(&board.beams[idx]),
            };
            output.push_str(&label);
            output.push('|');
        }
        output.push('\n');
        output.push_str(&separator);
        output.push('\n');
    }

    output
}
