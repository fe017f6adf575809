//! Reflection rules for the eight reflector kinds.
//!
//! A reflector sits in one cell with an orientation. When a beam runs into
//! it, the rule for its kind turns the incoming beam into zero or more
//! outgoing beams that start at the reflector's cell. No output means the
//! beam is absorbed.
//!
//! Every rule except one-way keys off the relative rotation difference
//! between the piece orientation and the beam heading (see
//! [`relative_rotation_diff`]).

use std::fmt;

use smallvec::SmallVec;

use crate::beam::{Beam, Color};
use crate::geometry::Direction;

/// Outgoing beams from one reflection. A prism splitting white light is the
/// widest case, at three beams.
pub type Reflection = SmallVec<[Beam; 3]>;

/// Color substitutions applied by a converter hit head-on.
const CONVERT_FORWARD: [(Color, Color); 6] = [
    (Color::RED, Color::GREEN),
    (Color::BLUE, Color::RED),
    (Color::GREEN, Color::BLUE),
    (Color::YELLOW, Color::CYAN),
    (Color::CYAN, Color::MAGENTA),
    (Color::MAGENTA, Color::YELLOW),
];

/// Color substitutions applied by a converter hit from behind.
const CONVERT_REVERSE: [(Color, Color); 6] = [
    (Color::RED, Color::BLUE),
    (Color::BLUE, Color::GREEN),
    (Color::GREEN, Color::RED),
    (Color::YELLOW, Color::MAGENTA),
    (Color::CYAN, Color::YELLOW),
    (Color::MAGENTA, Color::CYAN),
];

/// Reflector kinds. Behaviors are stateless, so pieces carry the kind by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reflector {
    Mirror,
    OneWay,
    Prism,
    Splitter,
    Threeway,
    Refractor,
    Convert,
    Double,
}

impl Reflector {
    pub const ALL: [Reflector; 8] = [
        Reflector::Mirror,
        Reflector::OneWay,
        Reflector::Prism,
        Reflector::Splitter,
        Reflector::Threeway,
        Reflector::Refractor,
        Reflector::Convert,
        Reflector::Double,
    ];

    /// Short tag used by the board renderer.
    pub const fn symbol(self) -> &'static str {
        match self {
            Reflector::Mirror => "M",
            Reflector::OneWay => "OW",
            Reflector::Prism => "P",
            Reflector::Splitter => "S",
            Reflector::Threeway => "T",
            Reflector::Refractor => "R",
            Reflector::Convert => "CV",
            Reflector::Double => "D",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Reflector::Mirror => "mirror",
            Reflector::OneWay => "one-way",
            Reflector::Prism => "prism",
            Reflector::Splitter => "splitter",
            Reflector::Threeway => "threeway",
            Reflector::Refractor => "refractor",
            Reflector::Convert => "convert",
            Reflector::Double => "double",
        }
    }

    /// Computes the beams leaving a reflector of this kind, oriented along
    /// `orientation`, when `beam` runs into it.
    ///
    /// Outgoing beams share the incoming beam's position; the caller steps
    /// them forward.
    pub fn reflect(self, orientation: Direction, beam: &Beam) -> Reflection {
        let mut out = Reflection::new();
        let diff = relative_rotation_diff(orientation, beam.direction);

        match self {
            // only the three oblique incidences reflect; head-on and
            // from-behind hits are absorbed
            Reflector::Mirror => {
                if matches!(diff, 45 | 90 | 135) {
                    out.push(beam.redirected(orientation.rotated(diff)));
                }
            }
            Reflector::OneWay => {
                if orientation == beam.direction {
                    out.push(*beam);
                }
            }
            Reflector::Prism => match diff {
                0 => {
                    let directions = [
                        beam.direction,
                        orientation.rotated(45),
                        orientation.rotated(90),
                    ];
                    for (channel, direction) in Color::CHANNELS.into_iter().zip(directions) {
                        if beam.color.contains(channel) {
                            out.push(Beam::new(beam.position, direction, channel));
                        }
                    }
                }
                90 if beam.color.contains(Color::BLUE) => {
                    out.push(Beam::new(beam.position, orientation.opposite(), Color::BLUE));
                }
                135 if beam.color.contains(Color::GREEN) => {
                    out.push(Beam::new(beam.position, orientation.opposite(), Color::GREEN));
                }
                180 if beam.color.contains(Color::RED) => {
                    out.push(Beam::new(beam.position, beam.direction, Color::RED));
                }
                _ => {}
            },
            Reflector::Splitter => {
                if diff == 0 {
                    out.push(beam.redirected(orientation.rotated(90)));
                    out.push(beam.redirected(orientation.rotated(270)));
                }
            }
            Reflector::Threeway => match diff {
                0 => {
                    out.push(beam.redirected(orientation.rotated(45)));
                    out.push(beam.redirected(orientation.rotated(315)));
                }
                135 | 225 => out.push(beam.redirected(orientation.opposite())),
                _ => {}
            },
            Reflector::Refractor => match diff {
                0 => out.push(beam.redirected(orientation.rotated(45))),
                135 => out.push(beam.redirected(orientation.opposite())),
                _ => {}
            },
            Reflector::Convert => {
                let table = match diff {
                    0 => Some(&CONVERT_FORWARD),
                    180 => Some(&CONVERT_REVERSE),
                    _ => None,
                };
                let converted = table.and_then(|rules| {
                    rules
                        .iter()
                        .find(|(from, _)| *from == beam.color)
                        .map(|&(_, to)| to)
                });
                if let Some(color) = converted {
                    out.push(beam.recolored(color));
                }
            }
            Reflector::Double => {
                if diff != 0 && diff != 180 {
                    out.push(beam.redirected(orientation.rotated(diff)));
                }
            }
        }

        out
    }
}

impl fmt::Display for Reflector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Incident angle of a beam against a reflector, in degrees.
///
/// Beams heading 180 degrees or more are turned to north and the piece
/// orientation is turned by the same amount, so the result lies in
/// `[0, 360)`. Beams heading less than 180 are left as they are and the
/// plain difference is returned, which can be negative. The rules above
/// match on these exact values.
pub fn relative_rotation_diff(orientation: Direction, incoming: Direction) -> i32 {
    if incoming.degrees() >= 180 {
        orientation.rotated(360 - incoming.degrees()).degrees()
    } else {
        orientation.degrees() - incoming.degrees()
    }
}
