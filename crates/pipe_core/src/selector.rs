//! Weighted candidate selection.
//!
//! Each candidate entry carries the full weight of its shape, so a shape
//! that fits in several rotations gets proportionally more selection mass.

use crate::resolver::Candidate;
use crate::rng::PipeRng;
use crate::tile::TileShape;
use serde::{Deserialize, Serialize};

/// Per-shape selection weights.
///
/// Corner dominates the reference table so generated puzzles are mostly
/// bends rather than straight runs or dead ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub single: u32,
    pub line: u32,
    pub corner: u32,
    pub tee: u32,
    pub cross: u32,
}

impl WeightTable {
    /// The reference weights: Single=10, Line=10, Corner=40, Tee=20, Cross=10.
    pub const REFERENCE: WeightTable = WeightTable {
        single: 10,
        line: 10,
        corner: 40,
        tee: 20,
        cross: 10,
    };

    pub fn weight(&self, shape: TileShape) -> u32 {
        match shape {
            TileShape::Single => self.single,
            TileShape::Line => self.line,
            TileShape::Corner => self.corner,
            TileShape::Tee => self.tee,
            TileShape::Cross => self.cross,
        }
    }

    /// First shape with a zero weight, if any.
    pub fn zero_weight_shape(&self) -> Option<TileShape> {
        TileShape::ALL.into_iter().find(|&s| self.weight(s) == 0)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Pick one candidate with probability `weight(shape_i) / Σ weight(shape_j)`.
///
/// # Panics
/// Panics if `candidates` is empty or every candidate has zero weight.
/// Callers check the resolver result before selecting.
pub fn select(candidates: &[Candidate], weights: &WeightTable, rng: &mut dyn PipeRng) -> Candidate {
    assert!(
        !candidates.is_empty(),
        "select called with an empty candidate list"
    );

    let total: u64 = candidates
        .iter()
        .map(|c| weights.weight(c.shape) as u64)
        .sum();
    assert!(total > 0, "select called with zero total weight");

    // Sums past u32::MAX fall back to a scaled double draw.
    let mut pick = if total <= u32::MAX as u64 {
        rng.next_u32_max(total as u32) as u64
    } else {
        ((rng.next_double() * total as f64) as u64).min(total - 1)
    };

    for candidate in candidates {
        let w = weights.weight(candidate.shape) as u64;
        if pick < w {
            return *candidate;
        }
        pick -= w;
    }

    // Unreachable: pick < total.
    candidates[candidates.len() - 1]
}
