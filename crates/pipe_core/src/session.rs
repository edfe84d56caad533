//! A single puzzle being played.
//!
//! The session owns the grid. The input side calls [`PuzzleSession::rotate`]
//! once per player click and reads back whether the puzzle is now solved.

use crate::config::PuzzleConfig;
use crate::generator::GenerateError;
use crate::grid::{Cell, GridError, PipeGrid};
use crate::rng::PipeRng;
use crate::validator::{edge_mismatches, is_solved, EdgeMismatch};
use tracing::{debug, info, warn};

/// Re-scrambles allowed when a scramble happens to leave the grid solved.
pub const DEFAULT_SCRAMBLE_ATTEMPTS: usize = 8;

/// Grids generated for a session before one with gaps is accepted.
pub const DEFAULT_GENERATE_ATTEMPTS: usize = 10;

/// Result of one player rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateOutcome {
    /// Rotation of the turned tile after the move
    pub rotation: u8,
    /// Whether the grid is solved after the move
    pub solved: bool,
    /// True only on the move that turned an unsolved grid into a solved one
    pub newly_solved: bool,
}

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    grid: PipeGrid,
    moves: u32,
    solved: bool,
}

impl PuzzleSession {
    pub fn new(grid: PipeGrid) -> Self {
        let solved = is_solved(&grid);
        Self {
            grid,
            moves: 0,
            solved,
        }
    }

    /// Generate a grid from `config` and scramble it if configured.
    ///
    /// A grid with gaps can never be solved, so generation is repeated
    /// while the grid has gaps, up to `config.generate_attempts` grids in
    /// total. The last grid is kept even if it still has gaps.
    pub fn from_config(
        config: &PuzzleConfig,
        rng: &mut dyn PipeRng,
    ) -> Result<Self, GenerateError> {
        let mut generator = config.generator();
        let attempts = config.generate_attempts.max(1);

        let mut grid = generator.generate(rng)?;
        let mut generated = 1;
        while grid.count_empty() > 0 && generated < attempts {
            debug!("Discarding grid with {} gaps", grid.count_empty());
            grid = generator.generate(rng)?;
            generated += 1;
        }
        if grid.count_empty() > 0 {
            warn!(
                "Keeping grid with {} gaps after {} attempts",
                grid.count_empty(),
                generated
            );
        }

        let mut session = Self::new(grid);
        if config.scramble {
            session.scramble(rng, config.scramble_attempts);
        }
        Ok(session)
    }

    /// Replace the puzzle with a freshly generated one.
    ///
    /// On error the current puzzle is left untouched.
    pub fn regenerate(
        &mut self,
        config: &PuzzleConfig,
        rng: &mut dyn PipeRng,
    ) -> Result<(), GenerateError> {
        *self = Self::from_config(config, rng)?;
        info!("New {}x{} puzzle", self.grid.rows(), self.grid.cols());
        Ok(())
    }

    pub fn grid(&self) -> &PipeGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PipeGrid {
        self.grid
    }

    /// Player rotations since the session started or was last scrambled.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Recomputed from the grid on every call.
    pub fn is_solved(&self) -> bool {
        is_solved(&self.grid)
    }

    /// Empty cells. A puzzle with gaps cannot be solved.
    pub fn gaps(&self) -> usize {
        self.grid.count_empty()
    }

    pub fn mismatches(&self) -> Vec<EdgeMismatch> {
        edge_mismatches(&self.grid)
    }

    /// Turn the tile at `cell` one quarter clockwise and re-check the grid.
    ///
    /// Out-of-bounds and empty cells are rejected without changing anything.
    pub fn rotate(&mut self, cell: Cell) -> Result<RotateOutcome, GridError> {
        let rotation = self.grid.rotate(cell)?;
        self.moves += 1;

        let was_solved = self.solved;
        self.solved = is_solved(&self.grid);
        let newly_solved = self.solved && !was_solved;
        if newly_solved {
            info!("Puzzle solved in {} moves", self.moves);
        }

        Ok(RotateOutcome {
            rotation,
            solved: self.solved,
            newly_solved,
        })
    }

    /// Give every placed tile a random rotation.
    ///
    /// A generated grid is solved by construction, so if the new rotations
    /// still solve it the scramble is repeated, up to `attempts` times in
    /// total. Grids made only of Cross tiles cannot be unsolved and are
    /// scrambled once. Returns the number of scrambles performed.
    pub fn scramble(&mut self, rng: &mut dyn PipeRng, attempts: usize) -> usize {
        let can_change = self
            .grid
            .iter_placed()
            .any(|(_, tile)| tile.shape().distinct_rotations() > 1);
        let attempts = if can_change { attempts.max(1) } else { 1 };

        let mut used = 0;
        for _ in 0..attempts {
            used += 1;
            for tile in self.grid.iter_placed_mut() {
                tile.set_rotation(rng.next_rotation());
            }
            if !is_solved(&self.grid) {
                break;
            }
        }

        self.moves = 0;
        self.solved = is_solved(&self.grid);
        debug!(
            "Scrambled {} tiles in {} passes, solved={}",
            self.grid.count_placed(),
            used,
            self.solved
        );
        used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::rng::StdRandom;
    use crate::tile::{Tile, TileShape};

    fn pair_session() -> PuzzleSession {
        let mut grid = PipeGrid::new(1, 2);
        grid.place(Cell::new(0, 0), Tile::new(TileShape::Single, 1)).unwrap();
        grid.place(Cell::new(0, 1), Tile::new(TileShape::Single, 1)).unwrap();
        PuzzleSession::new(grid)
    }

    #[test]
    fn test_rotate_reports_newly_solved_once() {
        let mut session = pair_session();
        assert!(!session.is_solved());

        let first = session.rotate(Cell::new(0, 1)).unwrap();
        assert_eq!(first.rotation, 2);
        assert!(!first.solved);

        let second = session.rotate(Cell::new(0, 1)).unwrap();
        assert_eq!(second.rotation, 3);
        assert!(second.solved);
        assert!(second.newly_solved);
        assert_eq!(session.moves(), 2);

        let third = session.rotate(Cell::new(0, 1)).unwrap();
        assert!(!third.solved);
        assert!(!third.newly_solved);
    }

    #[test]
    fn test_rotate_rejects_bad_cells_without_counting() {
        let mut grid = PipeGrid::new(2, 2);
        grid.place(Cell::new(0, 0), Tile::new(TileShape::Line, 0)).unwrap();
        let mut session = PuzzleSession::new(grid);

        assert_eq!(
            session.rotate(Cell::new(1, 1)),
            Err(GridError::EmptyCell { row: 1, col: 1 })
        );
        assert_eq!(
            session.rotate(Cell::new(5, 0)),
            Err(GridError::OutOfBounds { row: 5, col: 0 })
        );
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_four_rotations_restore_tile() {
        let mut session = pair_session();
        let cell = Cell::new(0, 0);
        let before = *session.grid().get(cell).unwrap();
        for _ in 0..4 {
            session.rotate(cell).unwrap();
        }
        let after = *session.grid().get(cell).unwrap();
        assert_eq!(after.rotation(), before.rotation());
        assert_eq!(after.open_sides(), before.open_sides());
    }

    #[test]
    fn test_scramble_unsolves_generated_grid() {
        let mut rng = StdRandom::from_seed(11);
        let config = PuzzleConfig {
            rows: 6,
            cols: 6,
            ..PuzzleConfig::default()
        };
        let session = PuzzleSession::from_config(&config, &mut rng).unwrap();
        assert!(!session.is_solved());
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_scramble_keeps_shapes() {
        let mut rng = StdRandom::from_seed(3);
        let config = PuzzleConfig {
            scramble: false,
            ..PuzzleConfig::default()
        };
        let mut session = PuzzleSession::from_config(&config, &mut rng).unwrap();
        let shapes: Vec<_> = session
            .grid()
            .iter()
            .map(|(_, t)| t.map(|t| t.shape()))
            .collect();

        session.scramble(&mut rng, DEFAULT_SCRAMBLE_ATTEMPTS);
        let after: Vec<_> = session
            .grid()
            .iter()
            .map(|(_, t)| t.map(|t| t.shape()))
            .collect();
        assert_eq!(shapes, after);
    }

    #[test]
    fn test_scramble_cross_only_grid_runs_once() {
        let mut grid = PipeGrid::new(1, 1);
        grid.place(Cell::new(0, 0), Tile::new(TileShape::Cross, 0)).unwrap();
        let mut session = PuzzleSession::new(grid);
        let mut rng = StdRandom::from_seed(0);
        assert_eq!(session.scramble(&mut rng, 8), 1);
        assert!(session.is_solved());
        assert!(session
            .grid()
            .get(Cell::new(0, 0))
            .unwrap()
            .is_open(Direction::Up));
    }

    #[test]
    fn test_from_config_retries_gapped_grids() {
        let single = PuzzleConfig {
            scramble: false,
            generate_attempts: 1,
            ..PuzzleConfig::default()
        };
        let retrying = PuzzleConfig {
            generate_attempts: DEFAULT_GENERATE_ATTEMPTS,
            ..single.clone()
        };

        let mut gapped_single = 0;
        let mut gapped_retrying = 0;
        for seed in 0..50 {
            let session =
                PuzzleSession::from_config(&single, &mut StdRandom::from_seed(seed)).unwrap();
            if session.gaps() > 0 {
                gapped_single += 1;
            }
            let session =
                PuzzleSession::from_config(&retrying, &mut StdRandom::from_seed(seed)).unwrap();
            if session.gaps() > 0 {
                gapped_retrying += 1;
                assert!(!session.is_solved());
            } else {
                assert!(session.is_solved());
            }
        }
        assert!(gapped_single > 0);
        assert!(gapped_retrying <= 2, "{} gapped grids kept", gapped_retrying);
    }

    #[test]
    fn test_regenerate_replaces_puzzle_and_resets_moves() {
        let mut rng = StdRandom::from_seed(21);
        let config = PuzzleConfig {
            rows: 6,
            cols: 6,
            ..PuzzleConfig::default()
        };
        let mut session = PuzzleSession::from_config(&config, &mut rng).unwrap();
        let (cell, _) = session.grid().iter_placed().next().unwrap();
        session.rotate(cell).unwrap();
        assert_eq!(session.moves(), 1);

        let other = PuzzleConfig {
            rows: 4,
            cols: 7,
            ..config
        };
        session.regenerate(&other, &mut rng).unwrap();
        assert_eq!((session.grid().rows(), session.grid().cols()), (4, 7));
        assert_eq!(session.moves(), 0);
        assert_eq!(session.gaps(), session.grid().count_empty());
    }

    #[test]
    fn test_failed_regenerate_keeps_current_puzzle() {
        let mut session = pair_session();
        session.rotate(Cell::new(0, 1)).unwrap();
        let before = session.grid().clone();

        let unplayable = PuzzleConfig {
            rows: 1,
            cols: 1,
            start_attempts: 2,
            ..PuzzleConfig::default()
        };
        let err = session
            .regenerate(&unplayable, &mut StdRandom::from_seed(4))
            .unwrap_err();
        assert_eq!(err, GenerateError::NoStartCandidate { attempts: 2 });
        assert_eq!(session.grid(), &before);
        assert_eq!(session.moves(), 1);
    }
}
