//! Solved-state checks.
//!
//! An edge between two in-bounds neighbors is consistent when both tiles
//! are open toward each other or both are closed. The grid is solved when
//! every cell holds a tile and every edge is consistent. Sides facing the
//! grid boundary are not edges and are never checked.
//!
//! Nothing is cached: each call re-reads the whole grid.

use crate::direction::Direction;
use crate::grid::{Cell, PipeGrid};
use std::fmt;

/// One reason a grid is not solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMismatch {
    /// The cell holds no tile
    Gap(Cell),
    /// Exactly one of `cell` and its neighbor in `dir` is open toward
    /// the other
    OneSided { cell: Cell, dir: Direction },
}

impl fmt::Display for EdgeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeMismatch::Gap(cell) => write!(f, "empty cell at {}", cell),
            EdgeMismatch::OneSided { cell, dir } => {
                write!(f, "one-sided connector between {} and its {} neighbor", cell, dir)
            }
        }
    }
}

/// Whether the edge from `cell` toward `dir` agrees on both sides.
///
/// Returns true for edges on the grid boundary and for edges touching an
/// empty cell; gaps are reported separately.
pub fn edge_consistent(grid: &PipeGrid, cell: Cell, dir: Direction) -> bool {
    let Some(neighbor) = grid.neighbor_of(cell, dir) else {
        return true;
    };
    match (grid.get(cell), grid.get(neighbor)) {
        (Some(a), Some(b)) => a.is_open(dir) == b.is_open(dir.opposite()),
        _ => true,
    }
}

/// True when every cell holds a tile and every shared edge agrees.
pub fn is_solved(grid: &PipeGrid) -> bool {
    if grid.count_empty() > 0 {
        return false;
    }
    grid.iter().all(|(cell, _)| {
        Direction::ALL
            .into_iter()
            .all(|dir| edge_consistent(grid, cell, dir))
    })
}

/// Every gap and inconsistent edge in the grid.
///
/// Each edge is reported once, from the cell on its Up or Left side
/// looking Right or Down. Gaps are listed in row-major order before the
/// edges.
pub fn edge_mismatches(grid: &PipeGrid) -> Vec<EdgeMismatch> {
    let mut mismatches: Vec<EdgeMismatch> = grid
        .iter()
        .filter(|(_, tile)| tile.is_none())
        .map(|(cell, _)| EdgeMismatch::Gap(cell))
        .collect();

    for (cell, _) in grid.iter_placed() {
        for dir in [Direction::Right, Direction::Down] {
            if !edge_consistent(grid, cell, dir) {
                mismatches.push(EdgeMismatch::OneSided { cell, dir });
            }
        }
    }

    mismatches
}
