//! End-to-end puzzle tests through the public `pipe_core` API.
//!
//! Run with: cargo test --test puzzle_tests

use pipe_core::{
    edge_mismatches, generate_grid, is_solved, open_sides, Cell, Direction, EdgeMismatch,
    GenerateError, GridError, PipeGrid, PuzzleConfig, PuzzleSession, SideSet, StdRandom, Tile,
    TileShape,
};

/// Rotate every tile back to the orientation it had in `solution`.
fn replay_solution(session: &mut PuzzleSession, solution: &PipeGrid) -> usize {
    let mut clicks = 0;
    for (cell, target) in solution.iter_placed() {
        while session.grid().get(cell).map(|t| t.open_sides()) != Some(target.open_sides()) {
            session.rotate(cell).unwrap();
            clicks += 1;
            assert!(clicks < 4 * solution.len(), "rotation never matched at {}", cell);
        }
    }
    clicks
}

#[test]
fn test_generated_grid_rescrambled_and_solved_by_replay() {
    let config = PuzzleConfig {
        rows: 8,
        cols: 8,
        scramble: false,
        ..PuzzleConfig::default()
    };

    // Gapped grids can never be solved, so play the first gap-free one.
    let (solution, mut rng) = (0..100)
        .find_map(|seed| {
            let mut rng = StdRandom::from_seed(seed);
            let grid = config.generator().generate(&mut rng).ok()?;
            (grid.count_empty() == 0).then_some((grid, rng))
        })
        .expect("some seed should produce a gap-free grid");
    assert!(is_solved(&solution));

    let mut session = PuzzleSession::new(solution.clone());
    session.scramble(&mut rng, 8);
    assert!(!session.is_solved());

    let clicks = replay_solution(&mut session, &solution);
    assert!(clicks > 0);
    assert_eq!(session.moves() as usize, clicks);
    assert!(session.is_solved());
    assert!(edge_mismatches(session.grid()).is_empty());
}

#[test]
fn test_seeded_generation_is_reproducible_and_seeds_differ() {
    let a = generate_grid(10, 10, Some(1)).unwrap();
    let b = generate_grid(10, 10, Some(1)).unwrap();
    let c = generate_grid(10, 10, Some(2)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_gapped_grid_is_never_solved() {
    for seed in 0..100 {
        let grid = generate_grid(10, 10, Some(seed)).unwrap();
        if grid.count_empty() > 0 {
            assert!(!is_solved(&grid));
            assert!(edge_mismatches(&grid)
                .iter()
                .any(|m| matches!(m, EdgeMismatch::Gap(_))));
        }
    }
}

#[test]
fn test_hand_built_pair_mismatch_then_solved() {
    let mut grid = PipeGrid::new(1, 2);
    grid.place(Cell::new(0, 0), Tile::new(TileShape::Single, 1)).unwrap();
    grid.place(Cell::new(0, 1), Tile::new(TileShape::Single, 1)).unwrap();
    assert_eq!(open_sides(TileShape::Single, 1), SideSet::from([Direction::Right]));

    let mut session = PuzzleSession::new(grid);
    assert!(!session.is_solved());
    session.rotate(Cell::new(0, 1)).unwrap();
    let outcome = session.rotate(Cell::new(0, 1)).unwrap();
    assert!(outcome.solved);
    assert!(session
        .grid()
        .get(Cell::new(0, 1))
        .unwrap()
        .is_open(Direction::Left));
}

#[test]
fn test_invalid_requests_are_reported() {
    assert_eq!(
        generate_grid(0, 0, Some(1)).unwrap_err(),
        GenerateError::InvalidDimensions { rows: 0, cols: 0 }
    );
    assert!(matches!(
        generate_grid(1, 1, Some(1)),
        Err(GenerateError::NoStartCandidate { .. })
    ));

    let grid = generate_grid(3, 3, Some(5)).unwrap();
    let mut session = PuzzleSession::new(grid);
    assert_eq!(
        session.rotate(Cell::new(3, 0)).unwrap_err(),
        GridError::OutOfBounds { row: 3, col: 0 }
    );
}

#[test]
fn test_display_renders_one_line_per_row() {
    let grid = generate_grid(4, 6, Some(9)).unwrap();
    let text = grid.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.chars().count() == 6));
}
