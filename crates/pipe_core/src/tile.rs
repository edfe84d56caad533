//! Pipe tile shapes and rotations.

use crate::direction::{Direction, SideSet};
use std::fmt;

/// Number of distinct quarter-turn rotations.
pub const ROTATIONS: u8 = 4;

/// The topological pattern of a tile's openings before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileShape {
    /// One opening (dead end)
    Single,
    /// Two opposite openings
    Line,
    /// Two adjacent openings
    Corner,
    /// Three openings
    Tee,
    /// Four openings
    Cross,
}

impl TileShape {
    /// All shapes in enumeration order.
    pub const ALL: [TileShape; 5] = [
        TileShape::Single,
        TileShape::Line,
        TileShape::Corner,
        TileShape::Tee,
        TileShape::Cross,
    ];

    /// Open sides at rotation 0.
    pub fn canonical_sides(self) -> SideSet {
        use crate::direction::Direction::*;
        match self {
            TileShape::Single => SideSet::from([Up]),
            TileShape::Line => SideSet::from([Up, Down]),
            TileShape::Corner => SideSet::from([Up, Right]),
            TileShape::Tee => SideSet::from([Up, Right, Left]),
            TileShape::Cross => SideSet::ALL,
        }
    }

    /// Number of openings, independent of rotation.
    pub fn opening_count(self) -> usize {
        self.canonical_sides().len()
    }

    /// Number of rotations that produce distinct side sets (1, 2 or 4).
    pub fn distinct_rotations(self) -> u8 {
        match self {
            TileShape::Cross => 1,
            TileShape::Line => 2,
            TileShape::Single | TileShape::Corner | TileShape::Tee => 4,
        }
    }
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileShape::Single => "single",
            TileShape::Line => "line",
            TileShape::Corner => "corner",
            TileShape::Tee => "tee",
            TileShape::Cross => "cross",
        };
        f.write_str(name)
    }
}

/// Open sides of `shape` after `rotation` clockwise quarter turns.
pub fn open_sides(shape: TileShape, rotation: u8) -> SideSet {
    shape.canonical_sides().rotated(rotation % ROTATIONS)
}

/// A placed tile. The shape is fixed; only the rotation changes during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    shape: TileShape,
    rotation: u8,
}

impl Tile {
    /// Create a tile. `rotation` is taken modulo 4.
    pub fn new(shape: TileShape, rotation: u8) -> Self {
        Self {
            shape,
            rotation: rotation % ROTATIONS,
        }
    }

    #[inline]
    pub fn shape(&self) -> TileShape {
        self.shape
    }

    /// Current rotation in `0..4`.
    #[inline]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation % ROTATIONS;
    }

    /// Turn the tile one quarter clockwise and return the new rotation.
    pub fn rotate_cw(&mut self) -> u8 {
        self.rotation = (self.rotation % ROTATIONS + 1) % ROTATIONS;
        self.rotation
    }

    #[inline]
    pub fn open_sides(&self) -> SideSet {
        open_sides(self.shape, self.rotation)
    }

    #[inline]
    pub fn is_open(&self, dir: Direction) -> bool {
        self.open_sides().contains(dir)
    }
}
