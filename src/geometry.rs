//! Grid positions and the eight compass headings a beam can travel along.
//!
//! Headings are multiples of 45 degrees measured clockwise from north.
//! Rows grow southwards, so a step north is `y - 1`.

use std::fmt;
use std::ops::{Add, AddAssign};

/// A (column, row) cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit step for every heading, indexed by `Direction as usize`.
///
/// Ordering note: the index mapping must stay in sync with `Direction::ALL`.
const OFFSETS: [Position; 8] = [
    Position::new(0, -1),  // north
    Position::new(1, -1),  // north-east
    Position::new(1, 0),   // east
    Position::new(1, 1),   // south-east
    Position::new(0, 1),   // south
    Position::new(-1, 1),  // south-west
    Position::new(-1, 0),  // west
    Position::new(-1, -1), // north-west
];

/// One of the eight compass headings, in 45 degree steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// Every heading, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Angle in degrees, in `[0, 360)`.
    #[inline]
    pub const fn degrees(self) -> i32 {
        self as i32 * 45
    }

    /// Returns the heading for an angle, or `None` if the angle is not a
    /// multiple of 45 degrees. Any multiple is accepted and wrapped.
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 45 != 0 {
            return None;
        }
        Some(Self::ALL[(degrees.rem_euclid(360) / 45) as usize])
    }

    /// Rotates clockwise by `degrees` (anticlockwise when negative), wrapping
    /// into `[0, 360)`.
    ///
    /// `degrees` is expected to be a multiple of 45; anything else rounds
    /// down to the previous heading.
    #[inline]
    pub const fn rotated(self, degrees: i32) -> Self {
        let total = (self.degrees() + degrees).rem_euclid(360);
        Self::ALL[(total / 45) as usize]
    }

    /// The antiparallel heading.
    #[inline]
    pub const fn opposite(self) -> Self {
        self.rotated(180)
    }

    /// Unit cell step along this heading.
    #[inline]
    pub const fn offset(self) -> Position {
        OFFSETS[self as usize]
    }

    /// True if both headings lie on the same axis (equal or antiparallel).
    ///
    /// Beams on contemporary headings that meet in one cell are merged.
    #[inline]
    pub const fn is_contemporary(self, other: Direction) -> bool {
        self as u8 == other as u8 || self.opposite() as u8 == other as u8
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
