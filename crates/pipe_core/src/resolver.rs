//! Candidate resolution.
//!
//! Given the sides a cell must open and the sides it may open, list every
//! (shape, rotation) pair whose open sides fit between the two.

use crate::direction::SideSet;
use crate::tile::{open_sides, Tile, TileShape, ROTATIONS};

/// A (shape, rotation) pair admissible for some cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub shape: TileShape,
    pub rotation: u8,
}

impl Candidate {
    pub fn new(shape: TileShape, rotation: u8) -> Self {
        Self { shape, rotation }
    }

    pub fn open_sides(&self) -> SideSet {
        open_sides(self.shape, self.rotation)
    }

    pub fn into_tile(self) -> Tile {
        Tile::new(self.shape, self.rotation)
    }
}

impl From<Candidate> for Tile {
    fn from(candidate: Candidate) -> Self {
        candidate.into_tile()
    }
}

/// Every (shape, rotation) with `required ⊆ open_sides ⊆ permitted`.
///
/// Results come in enumeration order: shape ascending, then rotation
/// ascending. Shapes with rotational symmetry appear once per matching
/// rotation, so a Line that fits vertically is listed for rotations 0 and 2.
/// An empty result is a normal outcome.
pub fn resolve(required: SideSet, permitted: SideSet) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for shape in TileShape::ALL {
        for rotation in 0..ROTATIONS {
            let sides = open_sides(shape, rotation);
            if required.is_subset(sides) && sides.is_subset(permitted) {
                candidates.push(Candidate::new(shape, rotation));
            }
        }
    }
    candidates
}
