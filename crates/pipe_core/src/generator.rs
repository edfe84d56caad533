//! Breadth-first grid generation.
//!
//! Generation places one tile at a random start cell, then walks the grid
//! breadth-first. Each newly reached cell takes its constraints from every
//! neighbor that already holds a tile:
//!
//! - a neighbor whose facing side is open makes that side **required**
//! - a neighbor whose facing side is closed makes that side **excluded**
//!
//! Sides pointing off the grid are never permitted. The resolver lists the
//! tiles that fit and the selector picks one by shape weight. When nothing
//! fits, the cell stays empty and is not enqueued; it may still be filled
//! later when another placed neighbor reaches it. There is no backtracking,
//! so a finished grid can contain gaps.

use crate::direction::{Direction, SideSet};
use crate::grid::{Cell, PipeGrid};
use crate::resolver::{resolve, Candidate};
use crate::rng::{PipeRng, StdRandom};
use crate::selector::{select, WeightTable};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, warn};

/// Start cells tried before generation gives up.
pub const DEFAULT_START_ATTEMPTS: usize = 16;

/// Error type for grid generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Zero rows or columns
    InvalidDimensions { rows: usize, cols: usize },
    /// No start cell admitted any tile within the attempt budget
    NoStartCandidate { attempts: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {}x{}", rows, cols)
            }
            GenerateError::NoStartCandidate { attempts } => {
                write!(f, "no start cell admitted a tile after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Lifecycle of a generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Nothing generated yet (or the last run failed)
    Empty,
    /// Placing tiles
    Generating,
    /// Finished; some cells may be empty
    Complete,
}

/// Summary of a finished generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub start: Cell,
    pub start_attempts: usize,
    pub placed: usize,
    pub gaps: usize,
    /// Visits that found no fitting tile
    pub unsatisfiable_visits: usize,
}

/// Sides a cell must open and must keep closed, derived from its placed
/// neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellConstraints {
    pub required: SideSet,
    pub excluded: SideSet,
}

impl CellConstraints {
    /// Permitted sides: the boundary mask of `cell` minus excluded sides.
    pub fn permitted(&self, grid: &PipeGrid, cell: Cell) -> SideSet {
        grid.boundary_mask(cell, SideSet::ALL).difference(self.excluded)
    }
}

/// Derive constraints for `cell` from all of its placed neighbors.
pub fn cell_constraints(grid: &PipeGrid, cell: Cell) -> CellConstraints {
    let mut constraints = CellConstraints::default();
    for (neighbor, dir) in grid.neighbors(cell) {
        let Some(tile) = grid.get(neighbor) else {
            continue;
        };
        if tile.is_open(dir.opposite()) {
            constraints.required.insert(dir);
        } else {
            constraints.excluded.insert(dir);
        }
    }
    constraints
}

/// Tiles that fit `cell` given the current grid.
pub fn candidates_for(grid: &PipeGrid, cell: Cell) -> Vec<Candidate> {
    let constraints = cell_constraints(grid, cell);
    resolve(constraints.required, constraints.permitted(grid, cell))
}

/// Generates pipe grids whose placed tiles agree on every shared edge.
#[derive(Debug, Clone)]
pub struct GridGenerator {
    rows: usize,
    cols: usize,
    weights: WeightTable,
    start_attempts: usize,
    state: GeneratorState,
    stats: Option<GenerationStats>,
}

impl GridGenerator {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            weights: WeightTable::default(),
            start_attempts: DEFAULT_START_ATTEMPTS,
            state: GeneratorState::Empty,
            stats: None,
        }
    }

    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    /// Number of random start cells to try. At least one is always tried.
    pub fn with_start_attempts(mut self, attempts: usize) -> Self {
        self.start_attempts = attempts.max(1);
        self
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Stats from the last successful run.
    pub fn stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Run one full generation pass.
    pub fn generate(&mut self, rng: &mut dyn PipeRng) -> Result<PipeGrid, GenerateError> {
        self.state = GeneratorState::Empty;
        self.stats = None;

        let too_large = self.rows.checked_mul(self.cols).is_none();
        if self.rows == 0 || self.cols == 0 || too_large {
            return Err(GenerateError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        self.state = GeneratorState::Generating;
        let mut grid = PipeGrid::new(self.rows, self.cols);

        let (start, start_attempts) = match self.place_start(&mut grid, rng) {
            Ok(placed) => placed,
            Err(e) => {
                self.state = GeneratorState::Empty;
                return Err(e);
            }
        };

        let unsatisfiable_visits = self.propagate(&mut grid, start, rng);

        let stats = GenerationStats {
            start,
            start_attempts,
            placed: grid.count_placed(),
            gaps: grid.count_empty(),
            unsatisfiable_visits,
        };
        info!(
            "Generated {}x{} grid from {}: {} placed, {} gaps",
            self.rows, self.cols, start, stats.placed, stats.gaps
        );

        self.stats = Some(stats);
        self.state = GeneratorState::Complete;
        Ok(grid)
    }

    /// Pick a random start cell and place an unconstrained tile there,
    /// retrying other cells if boundary masking leaves nothing that fits.
    fn place_start(
        &self,
        grid: &mut PipeGrid,
        rng: &mut dyn PipeRng,
    ) -> Result<(Cell, usize), GenerateError> {
        for attempt in 1..=self.start_attempts {
            let start = Cell::new(rng.next_usize_max(self.rows), rng.next_usize_max(self.cols));
            let permitted = grid.boundary_mask(start, SideSet::ALL);
            let candidates = self.weighted(resolve(SideSet::EMPTY, permitted));

            if candidates.is_empty() {
                warn!("No tile fits start cell {}, restarting", start);
                continue;
            }

            let chosen = select(&candidates, &self.weights, rng);
            debug!(
                "Start cell {}: {} at rotation {}",
                start, chosen.shape, chosen.rotation
            );
            place(grid, start, chosen);
            return Ok((start, attempt));
        }

        Err(GenerateError::NoStartCandidate {
            attempts: self.start_attempts,
        })
    }

    /// Breadth-first placement from `start`. Returns the number of visits
    /// that found no fitting tile.
    fn propagate(&self, grid: &mut PipeGrid, start: Cell, rng: &mut dyn PipeRng) -> usize {
        let mut unsatisfiable = 0;
        let mut queue = VecDeque::from([start]);

        while let Some(cell) = queue.pop_front() {
            for dir in Direction::ALL {
                let Some(next) = grid.neighbor_of(cell, dir) else {
                    continue;
                };
                if grid.is_placed(next) {
                    continue;
                }

                let candidates = self.weighted(candidates_for(grid, next));
                if candidates.is_empty() {
                    debug!("No tile fits {}, leaving it empty", next);
                    unsatisfiable += 1;
                    continue;
                }

                let chosen = select(&candidates, &self.weights, rng);
                place(grid, next, chosen);
                queue.push_back(next);
            }
        }

        unsatisfiable
    }

    /// Drop candidates whose shape has zero weight.
    fn weighted(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.retain(|c| self.weights.weight(c.shape) > 0);
        candidates
    }
}

fn place(grid: &mut PipeGrid, cell: Cell, candidate: Candidate) {
    grid.set(cell, candidate.into_tile());
}

/// Generate a grid with the reference weights.
///
/// Deterministic when `rng_seed` is set; seeded from entropy otherwise.
pub fn generate_grid(
    rows: usize,
    cols: usize,
    rng_seed: Option<u64>,
) -> Result<PipeGrid, GenerateError> {
    let mut rng = StdRandom::from_optional_seed(rng_seed);
    GridGenerator::new(rows, cols).generate(&mut rng)
}
