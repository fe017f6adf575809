//! Beam state and the three-channel color algebra beams carry.

use std::fmt;
use std::ops::BitOr;

use crate::geometry::{Direction, Position};

/// How many times a beam recorded in a cell may absorb a contemporary beam
/// before further merges halt propagation along that path.
pub const MAX_BEAM_UPDATES: u8 = 2;

/// A 3-bit color mask over red, green and blue.
///
/// Composite colors are unions of channels. Coins compare colors with exact
/// equality, never by subset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u8);

impl Color {
    pub const NONE: Color = Color(0b000);
    pub const RED: Color = Color(0b100);
    pub const GREEN: Color = Color(0b010);
    pub const BLUE: Color = Color(0b001);
    pub const YELLOW: Color = Color(0b110);
    pub const MAGENTA: Color = Color(0b101);
    pub const CYAN: Color = Color(0b011);
    pub const WHITE: Color = Color(0b111);

    /// The primary channels, in red, green, blue order.
    pub const CHANNELS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

    /// Builds a color from its low three bits; higher bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Color(bits & 0b111)
    }

    /// Additive mix of two beams.
    #[inline]
    pub const fn mix(self, other: Color) -> Color {
        Color(self.0 | other.0)
    }

    /// True if every channel of `other` is present in `self`.
    #[inline]
    pub const fn contains(self, other: Color) -> bool {
        self.0 & other.0 == other.0
    }

    /// Single-letter tag used by the board renderer.
    pub const fn letter(self) -> char {
        match self.0 {
            0b100 => 'R',
            0b010 => 'G',
            0b001 => 'B',
            0b110 => 'Y',
            0b101 => 'M',
            0b011 => 'C',
            0b111 => 'W',
            _ => ' ',
        }
    }

    pub const fn name(self) -> &'static str {
        match self.0 {
            0b100 => "red",
            0b010 => "green",
            0b001 => "blue",
            0b110 => "yellow",
            0b101 => "magenta",
            0b011 => "cyan",
            0b111 => "white",
            _ => "none",
        }
    }
}

impl BitOr for Color {
    type Output = Color;

    fn bitor(self, rhs: Color) -> Color {
        self.mix(rhs)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directed colored ray occupying one cell.
///
/// Beams are rebuilt on every propagation pass. `updates` counts how many
/// contemporary beams have been merged into this one while it sits in a
/// cell's ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Beam {
    pub position: Position,
    pub direction: Direction,
    pub color: Color,
    pub updates: u8,
}

impl Beam {
    pub const fn new(position: Position, direction: Direction, color: Color) -> Self {
        Self {
            position,
            direction,
            color,
            updates: 0,
        }
    }

    /// A fresh beam at the same cell heading `direction`.
    #[inline]
    pub const fn redirected(&self, direction: Direction) -> Self {
        Beam::new(self.position, direction, self.color)
    }

    /// A fresh beam at the same cell with the same heading but a new color.
    #[inline]
    pub const fn recolored(&self, color: Color) -> Self {
        Beam::new(self.position, self.direction, color)
    }

    /// True once this ledger entry has absorbed its full quota of merges.
    #[inline]
    pub const fn is_saturated(&self) -> bool {
        self.updates >= MAX_BEAM_UPDATES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_color() -> impl Strategy<Value = Color> {
        (0u8..8).prop_map(Color::from_bits)
    }

    #[test]
    fn test_composites_are_channel_unions() {
        assert_eq!(Color::RED | Color::GREEN, Color::YELLOW);
        assert_eq!(Color::RED | Color::BLUE, Color::MAGENTA);
        assert_eq!(Color::GREEN | Color::BLUE, Color::CYAN);
        assert_eq!(Color::YELLOW | Color::BLUE, Color::WHITE);
    }

    #[test]
    fn test_letters() {
        let letters: String = [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::YELLOW,
            Color::MAGENTA,
            Color::CYAN,
            Color::WHITE,
            Color::NONE,
        ]
        .iter()
        .map(|c| c.letter())
        .collect();
        assert_eq!(letters, "RGBYMCW ");
    }

    #[test]
    fn test_redirect_resets_update_count() {
        let mut beam = Beam::new(Position::new(2, 3), Direction::East, Color::CYAN);
        beam.updates = MAX_BEAM_UPDATES;
        assert!(beam.is_saturated());

        let turned = beam.redirected(Direction::South);
        assert_eq!(turned.position, beam.position);
        assert_eq!(turned.color, Color::CYAN);
        assert_eq!(turned.updates, 0);
        assert!(!turned.is_saturated());
    }

    proptest! {
        #[test]
        fn mixing_is_commutative_and_idempotent(a in arb_color(), b in arb_color()) {
            prop_assert_eq!(a.mix(b), b.mix(a));
            prop_assert_eq!(a.mix(a), a);
            prop_assert_eq!(a.mix(b).mix(b), a.mix(b));
            prop_assert!(a.mix(b).contains(a));
            prop_assert!(a.mix(b).contains(b));
        }
    }
}
