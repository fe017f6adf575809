//! Error types for board construction and lookups.

use thiserror::Error;

use crate::geometry::Position;

/// Errors arising from placing pieces or addressing cells on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A position lies outside the board.
    #[error("position {position} is outside the {cols}x{rows} board")]
    OutOfBounds {
        position: Position,
        cols: usize,
        rows: usize,
    },
    /// A piece already occupies the target cell.
    #[error("cell {position} is already occupied")]
    CellOccupied { position: Position },
}
