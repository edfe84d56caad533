//! Pipe maze puzzle core.
//!
//! Generates grids of pipe tiles whose connectors agree with their
//! neighbors, and checks whether a player's rotations have solved the grid.
//!
//! This crate provides:
//! - `Direction` / `SideSet`: side geometry and 4-bit side masks
//! - `Tile` / `TileShape`: the five pipe shapes and their rotations
//! - `PipeGrid`: the owned grid of optional tiles
//! - `resolve` / `select`: candidate listing and weighted choice
//! - `GridGenerator`: breadth-first constrained generation
//! - `is_solved` / `edge_mismatches`: solved-state checks
//! - `PuzzleSession`: rotate-and-check gameplay state
//! - `PuzzleConfig`: JSON configuration
//!
//! ## Example
//!
//! ```ignore
//! use pipe_core::{generate_grid, is_solved, Cell, PuzzleSession, StdRandom};
//!
//! let grid = generate_grid(10, 10, Some(42)).unwrap();
//! let mut session = PuzzleSession::new(grid);
//! session.scramble(&mut StdRandom::from_seed(42), 8);
//!
//! let outcome = session.rotate(Cell::new(3, 4)).unwrap();
//! if outcome.newly_solved {
//!     println!("Puzzle solved!");
//! }
//! ```

pub mod config;
pub mod direction;
pub mod generator;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod selector;
pub mod session;
pub mod tile;
pub mod validator;

pub use config::{ConfigError, PuzzleConfig};
pub use direction::{opposite, Direction, SideSet};
pub use generator::{
    candidates_for, cell_constraints, generate_grid, CellConstraints, GenerateError,
    GenerationStats, GeneratorState, GridGenerator,
};
pub use grid::{glyph, Cell, GridError, PipeGrid, DEFAULT_COLS, DEFAULT_ROWS};
pub use resolver::{resolve, Candidate};
pub use rng::{PipeRng, StdRandom};
pub use selector::{select, WeightTable};
pub use session::{PuzzleSession, RotateOutcome};
pub use tile::{open_sides, Tile, TileShape};
pub use validator::{edge_consistent, edge_mismatches, is_solved, EdgeMismatch};
