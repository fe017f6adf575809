//! Built-in levels.
//!
//! Each puzzle is a static piece layout plus the reflectors the player may
//! place. Layouts are checked at compile time: every piece must lie on the
//! board and no two pieces may share a cell.

use crate::beam::Color;
use crate::error::BoardError;
use crate::geometry::Direction::*;
use crate::grid::Board;
use crate::pieces::{Piece, PieceTemplate};
use crate::reflector::Reflector;
use crate::solver::Inventory;
use crate::PuzzleOps;

/// Puzzle definition with compile-time board dimensions.
///
/// - `COLS`: board width
/// - `ROWS`: board height
pub struct Puzzle<const COLS: usize, const ROWS: usize> {
    pub name: &'static str,
    pub description: &'static str,
    /// Pieces on the board before the player places anything.
    pub layout: &'static [Piece],
    /// Reflectors available to place, with their counts.
    pub inventory: &'static [(PieceTemplate, u32)],
}

impl<const COLS: usize, const ROWS: usize> Puzzle<COLS, ROWS> {
    /// Creates a puzzle definition with compile-time validation.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        layout: &'static [Piece],
        inventory: &'static [(PieceTemplate, u32)],
    ) -> Self {
        let mut i = 0;
        while i < layout.len() {
            assert!(
                Board::<COLS, ROWS>::contains(layout[i].position),
                "layout piece lies outside the board"
            );
            let mut j = i + 1;
            while j < layout.len() {
                assert!(
                    layout[i].position.x != layout[j].position.x
                        || layout[i].position.y != layout[j].position.y,
                    "two layout pieces share a cell"
                );
                j += 1;
            }
            i += 1;
        }
        Self {
            name,
            description,
            layout,
            inventory,
        }
    }

    /// Builds the starting board with its beams propagated.
    pub fn board(&self) -> Result<Board<COLS, ROWS>, BoardError> {
        let mut board = Board::new();
        for &piece in self.layout {
            board.add(piece)?;
        }
        board.update();
        Ok(board)
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory
            .iter()
            .fold(Inventory::new(), |inventory, &(template, count)| {
                inventory.with(template, count)
            })
    }
}

pub const AARGON_COLS: usize = 15;
pub const AARGON_ROWS: usize = 11;

/// The demo layouts use the full playfield.
pub const DEMO_COLS: usize = 18;
pub const DEMO_ROWS: usize = 11;

const AARGON_LAYOUT: &[Piece] = &[
    // one-way gates
    Piece::fixed_reflector(4, 0, SouthWest, Reflector::OneWay),
    Piece::fixed_reflector(4, 1, SouthWest, Reflector::OneWay),
    Piece::fixed_reflector(4, 2, SouthWest, Reflector::OneWay),
    Piece::fixed_reflector(8, 0, SouthEast, Reflector::OneWay),
    Piece::fixed_reflector(8, 1, SouthEast, Reflector::OneWay),
    Piece::fixed_reflector(8, 2, SouthEast, Reflector::OneWay),
    Piece::fixed_reflector(4, 8, NorthWest, Reflector::OneWay),
    Piece::fixed_reflector(4, 9, NorthWest, Reflector::OneWay),
    Piece::fixed_reflector(4, 10, NorthWest, Reflector::OneWay),
    Piece::fixed_reflector(8, 8, NorthEast, Reflector::OneWay),
    Piece::fixed_reflector(8, 9, NorthEast, Reflector::OneWay),
    Piece::fixed_reflector(8, 10, NorthEast, Reflector::OneWay),
    // prism ring
    Piece::fixed_reflector(4, 3, North, Reflector::Prism),
    Piece::fixed_reflector(5, 4, North, Reflector::Prism),
    Piece::fixed_reflector(4, 7, West, Reflector::Prism),
    Piece::fixed_reflector(5, 6, West, Reflector::Prism),
    Piece::fixed_reflector(8, 3, East, Reflector::Prism),
    Piece::fixed_reflector(7, 4, East, Reflector::Prism),
    Piece::fixed_reflector(7, 6, South, Reflector::Prism),
    Piece::fixed_reflector(8, 7, South, Reflector::Prism),
    Piece::laser(13, 5, West, Color::WHITE),
    Piece::coin(4, 4, Color::BLUE),
    Piece::coin(4, 6, Color::BLUE),
    Piece::coin(5, 2, Color::RED),
    Piece::coin(6, 2, Color::WHITE),
    Piece::coin(7, 2, Color::BLUE),
    Piece::coin(5, 8, Color::RED),
    Piece::coin(6, 8, Color::WHITE),
    Piece::coin(7, 8, Color::BLUE),
    Piece::coin(0, 5, Color::BLUE),
    Piece::coin(1, 5, Color::BLUE),
    Piece::coin(2, 5, Color::BLUE),
];

const AARGON_INVENTORY: &[(PieceTemplate, u32)] = &[
    (PieceTemplate::new(Reflector::Mirror), 9),
    (PieceTemplate::new(Reflector::Prism), 4),
    (PieceTemplate::new(Reflector::Refractor), 2),
    (PieceTemplate::new(Reflector::Double), 2),
];

pub const AARGON_PUZZLE: Puzzle<AARGON_COLS, AARGON_ROWS> = Puzzle::new(
    "aargon",
    "prism ring with one-way gates, lit by a single white laser",
    AARGON_LAYOUT,
    AARGON_INVENTORY,
);

pub const ONE_WAY_DEMO: Puzzle<DEMO_COLS, DEMO_ROWS> = Puzzle::new(
    "one-way",
    "a one-way gate blocks a blue beam and lets a red one through",
    &[
        Piece::laser(10, 10, North, Color::BLUE),
        Piece::laser(15, 10, North, Color::RED),
        Piece::reflector(10, 7, South, Reflector::OneWay),
        Piece::reflector(10, 5, NorthEast, Reflector::Mirror),
        Piece::reflector(15, 5, SouthEast, Reflector::Mirror),
    ],
    &[],
);

pub const PRISM_DEMO: Puzzle<DEMO_COLS, DEMO_ROWS> = Puzzle::new(
    "prism",
    "white and green beams hitting a prism from three sides",
    &[
        Piece::laser(5, 0, SouthEast, Color::WHITE),
        Piece::laser(5, 5, East, Color::WHITE),
        Piece::laser(10, 0, South, Color::GREEN),
        Piece::reflector(10, 5, West, Reflector::Prism),
    ],
    &[],
);

pub const SPLITTER_DEMO: Puzzle<DEMO_COLS, DEMO_ROWS> = Puzzle::new(
    "splitter",
    "a green beam split sideways into red and blue beams",
    &[
        Piece::laser(10, 10, North, Color::GREEN),
        Piece::laser(17, 5, West, Color::BLUE),
        Piece::laser(0, 5, East, Color::RED),
        Piece::reflector(10, 5, North, Reflector::Splitter),
        Piece::coin(5, 5, Color::YELLOW),
    ],
    &[],
);

pub const CONVERTER_LOOP_DEMO: Puzzle<DEMO_COLS, DEMO_ROWS> = Puzzle::new(
    "converter-loop",
    "a reflective cycle through a converter that settles and lights a white coin",
    &[
        Piece::laser(10, 10, North, Color::RED),
        Piece::reflector(10, 7, SouthEast, Reflector::Threeway),
        Piece::reflector(7, 4, North, Reflector::Mirror),
        Piece::reflector(10, 1, NorthEast, Reflector::Refractor),
        Piece::reflector(17, 1, SouthEast, Reflector::Mirror),
        Piece::reflector(17, 7, SouthWest, Reflector::Mirror),
        Piece::reflector(14, 7, East, Reflector::Convert),
        Piece::coin(15, 7, Color::WHITE),
    ],
    &[],
);

pub const DOUBLE_DEMO: Puzzle<DEMO_COLS, DEMO_ROWS> = Puzzle::new(
    "double",
    "two lasers absorbed by the faces of a double mirror",
    &[
        Piece::laser(10, 10, North, Color::RED),
        Piece::laser(10, 0, South, Color::BLUE),
        Piece::reflector(10, 5, South, Reflector::Double),
    ],
    &[],
);

/// Every built-in puzzle, the full level first.
pub fn builtin_puzzles() -> [&'static dyn PuzzleOps; 6] {
    [
        &AARGON_PUZZLE,
        &ONE_WAY_DEMO,
        &PRISM_DEMO,
        &SPLITTER_DEMO,
        &CONVERTER_LOOP_DEMO,
        &DOUBLE_DEMO,
    ]
}

/// Looks up a built-in puzzle by name.
pub fn find_puzzle(name: &str) -> Option<&'static dyn PuzzleOps> {
    builtin_puzzles()
        .into_iter()
        .find(|puzzle| puzzle.name() == name)
}
