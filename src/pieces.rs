//! Board pieces: lasers, coins and reflectors.
//!
//! What a piece may carry depends on its kind, so the kind is a tagged enum:
//! only coins and lasers have a color, only reflectors have a behavior, and
//! only coins track whether they are lit.

use crate::beam::Color;
use crate::geometry::{Direction, Position};
use crate::reflector::Reflector;

/// Kind-specific payload of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Reflector(Reflector),
    Coin { color: Color, lit: bool },
    Laser { color: Color },
}

/// A piece placed on the board.
///
/// `movable` and `rotatable` describe how a puzzle lets the player handle the
/// piece. Propagation ignores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub position: Position,
    pub rotation: Direction,
    pub kind: PieceKind,
    pub movable: bool,
    pub rotatable: bool,
}

impl Piece {
    /// A fixed coin. Coins have no meaningful rotation.
    pub const fn coin(x: i32, y: i32, color: Color) -> Self {
        Self {
            position: Position::new(x, y),
            rotation: Direction::North,
            kind: PieceKind::Coin { color, lit: false },
            movable: false,
            rotatable: false,
        }
    }

    /// A fixed laser emitting `color` along `rotation`.
    pub const fn laser(x: i32, y: i32, rotation: Direction, color: Color) -> Self {
        Self {
            position: Position::new(x, y),
            rotation,
            kind: PieceKind::Laser { color },
            movable: false,
            rotatable: false,
        }
    }

    /// A reflector the player may move and rotate.
    pub const fn reflector(x: i32, y: i32, rotation: Direction, reflector: Reflector) -> Self {
        Self {
            position: Position::new(x, y),
            rotation,
            kind: PieceKind::Reflector(reflector),
            movable: true,
            rotatable: true,
        }
    }

    /// A reflector that is part of the level layout.
    pub const fn fixed_reflector(
        x: i32,
        y: i32,
        rotation: Direction,
        reflector: Reflector,
    ) -> Self {
        Self {
            movable: false,
            rotatable: false,
            ..Self::reflector(x, y, rotation, reflector)
        }
    }

    pub const fn is_coin(&self) -> bool {
        matches!(self.kind, PieceKind::Coin { .. })
    }

    pub const fn is_laser(&self) -> bool {
        matches!(self.kind, PieceKind::Laser { .. })
    }

    /// The behavior of a reflector piece.
    pub const fn reflector_kind(&self) -> Option<Reflector> {
        match self.kind {
            PieceKind::Reflector(reflector) => Some(reflector),
            _ => None,
        }
    }

    /// Color of a coin or laser; reflectors have none.
    pub const fn color(&self) -> Option<Color> {
        match self.kind {
            PieceKind::Coin { color, .. } | PieceKind::Laser { color } => Some(color),
            PieceKind::Reflector(_) => None,
        }
    }

    /// True for a coin that a matching beam has reached.
    pub const fn is_lit(&self) -> bool {
        matches!(self.kind, PieceKind::Coin { lit: true, .. })
    }

    /// Sets a coin's lit flag; other kinds are unaffected.
    pub(crate) fn set_lit(&mut self, value: bool) {
        if let PieceKind::Coin { lit, .. } = &mut self.kind {
            *lit = value;
        }
    }
}

/// An inventory entry's shape: the reflector kind and handling flags that
/// every placed copy shares. Position and rotation are chosen at placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceTemplate {
    pub reflector: Reflector,
    pub movable: bool,
    pub rotatable: bool,
}

impl PieceTemplate {
    pub const fn new(reflector: Reflector) -> Self {
        Self {
            reflector,
            movable: true,
            rotatable: true,
        }
    }

    /// Instantiates the template at a cell.
    pub const fn place(&self, position: Position, rotation: Direction) -> Piece {
        Piece {
            position,
            rotation,
            kind: PieceKind::Reflector(self.reflector),
            movable: self.movable,
            rotatable: self.rotatable,
        }
    }
}
