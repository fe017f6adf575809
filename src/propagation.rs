//! Beam propagation.
//!
//! [`Board::update`] rebuilds the beam ledger and every coin's lit state from
//! the lasers on the board. Beams travel in straight lines, pass through
//! coins, stop at lasers and reflectors, and leave the board at its edges.
//! A reflector hands the beam to its rule, which may send out new beams.
//!
//! Reflective loops are cut by the merge cap: a ledger entry accepts at most
//! [`MAX_BEAM_UPDATES`](crate::beam::MAX_BEAM_UPDATES) merges from
//! contemporary beams, and a beam that reaches a saturated entry stops.
//! Pending beams are kept on an explicit worklist rather than the call stack.

use crate::beam::Beam;
use crate::grid::{cell_index, Board};
use crate::pieces::PieceKind;
use crate::reflector::Reflection;

/// Whether a beam keeps travelling after being recorded in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Propagation {
    Continue,
    Halt,
}

impl<const COLS: usize, const ROWS: usize> Board<COLS, ROWS> {
    /// Recomputes every beam and every coin's lit state from scratch.
    ///
    /// The result depends only on the pieces on the board, so calling this
    /// twice in a row changes nothing.
    pub fn update(&mut self) {
        self.clear_beams();
        for piece in self.cells.iter_mut().flatten() {
            piece.set_lit(false);
        }

        let laser_beams: Vec<Beam> = self
            .pieces()
            .filter_map(|piece| match piece.kind {
                PieceKind::Laser { color } => {
                    Some(Beam::new(piece.position, piece.rotation, color))
                }
                _ => None,
            })
            .collect();

        for beam in laser_beams {
            self.emit(beam);
        }
    }

    /// Emits a beam from its cell and follows every reflection it causes.
    fn emit(&mut self, beam: Beam) {
        let mut pending = vec![beam];
        while let Some(beam) = pending.pop() {
            let reflected = self.trace(beam);
            // reversed so the first outgoing beam is traced first
            pending.extend(reflected.into_iter().rev());
        }
    }

    /// Walks one beam forward from the cell after its origin until it leaves
    /// the board, saturates, or runs into a piece. Returns the beams sent on
    /// by a reflector it hits.
    fn trace(&mut self, beam: Beam) -> Reflection {
        let step = beam.direction.offset();
        let mut current = beam;
        current.position += step;

        while let Some(idx) = Self::index_of(current.position) {
            if let Some(piece) = &mut self.cells[idx] {
                let kind = piece.kind;
                match kind {
                    PieceKind::Coin { color, .. } => {
                        if color == beam.color {
                            piece.set_lit(true);
                        }
                    }
                    PieceKind::Reflector(reflector) => {
                        return reflector.reflect(piece.rotation, &current);
                    }
                    PieceKind::Laser { .. } => return Reflection::new(),
                }
            }

            if self.merge_beam(&current) == Propagation::Halt {
                return Reflection::new();
            }
            current.position += step;
        }

        Reflection::new()
    }

    /// Records a beam in its cell's ledger.
    ///
    /// A contemporary beam already in the ledger absorbs the new one: colors
    /// mix and a coin in the cell is re-lit against the mixed color, which
    /// can also put it out. Once that entry is saturated the beam halts.
    /// Otherwise the beam becomes a new ledger entry.
    fn merge_beam(&mut self, beam: &Beam) -> Propagation {
        let idx = cell_index::<COLS>(beam.position.x, beam.position.y);
        let ledger = &mut self.beams[idx];

        let Some(slot) = ledger
            .iter()
            .position(|recorded| recorded.direction.is_contemporary(beam.direction))
        else {
            ledger.push(*beam);
            return Propagation::Continue;
        };

        let recorded = &mut ledger[slot];
        if recorded.is_saturated() {
            return Propagation::Halt;
        }
        recorded.color = recorded.color.mix(beam.color);
        recorded.updates += 1;
        let mixed = recorded.color;

        if let Some(piece) = &mut self.cells[idx] {
            if let PieceKind::Coin { color, .. } = piece.kind {
                piece.set_lit(color == mixed);
            }
        }

        Propagation::Continue
    }
}
