//! The puzzle grid.
//!
//! `PipeGrid` stores `ROWS × COLS` optional tiles in a flat row-major
//! vector: `index = col + row * cols`. Cells start empty and are filled by
//! the generator; after that only tile rotations change.

use crate::direction::{Direction, SideSet};
use crate::tile::Tile;
use std::fmt;

/// Rows in the reference puzzle configuration.
pub const DEFAULT_ROWS: usize = 10;
/// Columns in the reference puzzle configuration.
pub const DEFAULT_COLS: usize = 10;

/// Error type for grid access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinates outside the grid
    OutOfBounds { row: usize, col: usize },
    /// Rotation requested on a cell with no tile
    EmptyCell { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the grid", row, col)
            }
            GridError::EmptyCell { row, col } => {
                write!(f, "cell ({}, {}) has no tile", row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A (row, col) coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A fixed-size grid of optional pipe tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeGrid {
    cells: Vec<Option<Tile>>,
    rows: usize,
    cols: usize,
}

impl PipeGrid {
    /// Create a grid with every cell empty.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![None; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Linear index for a cell, or None if out of bounds.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.col + cell.row * self.cols)
        } else {
            None
        }
    }

    /// Convert a linear index back to a cell.
    #[inline]
    pub fn index_to_cell(&self, idx: usize) -> Cell {
        Cell::new(idx / self.cols, idx % self.cols)
    }

    /// Tile at `cell`; None if the cell is empty or out of bounds.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&Tile> {
        self.index(cell).and_then(|i| self.cells[i].as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        match self.index(cell) {
            Some(i) => self.cells[i].as_mut(),
            None => None,
        }
    }

    #[inline]
    pub fn is_placed(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Put a tile into a cell, replacing whatever was there.
    pub fn place(&mut self, cell: Cell, tile: Tile) -> Result<(), GridError> {
        let i = self.checked_index(cell)?;
        self.cells[i] = Some(tile);
        Ok(())
    }

    /// Put a tile into a cell the caller already knows is in bounds.
    /// Panics otherwise.
    pub(crate) fn set(&mut self, cell: Cell, tile: Tile) {
        debug_assert!(self.contains(cell), "cell {} outside the grid", cell);
        self.cells[cell.col + cell.row * self.cols] = Some(tile);
    }

    /// Empty a cell, returning its previous tile.
    pub fn take(&mut self, cell: Cell) -> Result<Option<Tile>, GridError> {
        let i = self.checked_index(cell)?;
        Ok(self.cells[i].take())
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Turn the tile at `cell` one quarter clockwise and return its new
    /// rotation. Out-of-bounds and empty cells are rejected.
    pub fn rotate(&mut self, cell: Cell) -> Result<u8, GridError> {
        let i = self.checked_index(cell)?;
        match self.cells[i].as_mut() {
            Some(tile) => Ok(tile.rotate_cw()),
            None => Err(GridError::EmptyCell {
                row: cell.row,
                col: cell.col,
            }),
        }
    }

    /// Open sides of the tile at `cell`. Empty cells have none.
    pub fn open_sides_at(&self, cell: Cell) -> SideSet {
        self.get(cell)
            .map(|tile| tile.open_sides())
            .unwrap_or(SideSet::EMPTY)
    }

    /// The cell adjacent to `cell` in direction `dir`, or None at the
    /// grid boundary.
    pub fn neighbor_of(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.delta();
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        let neighbor = Cell::new(row, col);
        self.contains(neighbor).then_some(neighbor)
    }

    /// All in-bounds neighbors of `cell`, paired with the direction that
    /// leads to them, in rotation order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Cell, Direction)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor_of(cell, dir).map(|n| (n, dir)))
    }

    /// `sides` with every direction that points off the grid removed.
    ///
    /// Up is dropped on row 0, Right on the last column, Down on the last
    /// row and Left on column 0.
    pub fn boundary_mask(&self, cell: Cell, sides: SideSet) -> SideSet {
        let mut allowed = sides;
        if cell.row == 0 {
            allowed.remove(Direction::Up);
        }
        if cell.col + 1 >= self.cols {
            allowed.remove(Direction::Right);
        }
        if cell.row + 1 >= self.rows {
            allowed.remove(Direction::Down);
        }
        if cell.col == 0 {
            allowed.remove(Direction::Left);
        }
        allowed
    }

    /// Number of cells holding a tile.
    pub fn count_placed(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.len() - self.count_placed()
    }

    /// Iterate over every cell with its optional tile, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Option<&Tile>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, tile)| (self.index_to_cell(i), tile.as_ref()))
    }

    /// Iterate over placed tiles only.
    pub fn iter_placed(&self) -> impl Iterator<Item = (Cell, &Tile)> + '_ {
        self.iter().filter_map(|(cell, tile)| tile.map(|t| (cell, t)))
    }

    /// Iterate mutably over placed tiles only.
    pub fn iter_placed_mut(&mut self) -> impl Iterator<Item = &mut Tile> + '_ {
        self.cells.iter_mut().filter_map(|tile| tile.as_mut())
    }

    fn checked_index(&self, cell: Cell) -> Result<usize, GridError> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            row: cell.row,
            col: cell.col,
        })
    }
}

/// Box-drawing glyph for a set of open sides, indexed by mask bits
/// (Up = 1, Right = 2, Down = 4, Left = 8).
const GLYPHS: [char; 16] = [
    ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
];

/// Glyph used for a cell with no tile.
pub const EMPTY_GLYPH: char = '·';

/// Box-drawing glyph for a set of open sides.
pub fn glyph(sides: SideSet) -> char {
    GLYPHS[sides.bits() as usize]
}

impl fmt::Display for PipeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = match self.get(Cell::new(row, col)) {
                    Some(tile) => glyph(tile.open_sides()),
                    None => EMPTY_GLYPH,
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileShape;

    #[test]
    fn test_grid_new_is_empty() {
        let grid = PipeGrid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.count_placed(), 0);
        assert_eq!(grid.count_empty(), 12);
    }

    #[test]
    fn test_index_roundtrip() {
        let grid = PipeGrid::new(3, 4);
        assert_eq!(grid.index(Cell::new(0, 0)), Some(0));
        assert_eq!(grid.index(Cell::new(0, 3)), Some(3));
        assert_eq!(grid.index(Cell::new(1, 0)), Some(4));
        assert_eq!(grid.index(Cell::new(3, 0)), None);
        assert_eq!(grid.index(Cell::new(0, 4)), None);

        for idx in 0..grid.len() {
            let cell = grid.index_to_cell(idx);
            assert_eq!(grid.index(cell), Some(idx));
        }
    }

    #[test]
    fn test_neighbor_of_respects_bounds() {
        let grid = PipeGrid::new(10, 10);
        let corner = Cell::new(0, 0);
        assert_eq!(grid.neighbor_of(corner, Direction::Up), None);
        assert_eq!(grid.neighbor_of(corner, Direction::Left), None);
        assert_eq!(grid.neighbor_of(corner, Direction::Right), Some(Cell::new(0, 1)));
        assert_eq!(grid.neighbor_of(corner, Direction::Down), Some(Cell::new(1, 0)));

        let far = Cell::new(9, 9);
        assert_eq!(grid.neighbor_of(far, Direction::Right), None);
        assert_eq!(grid.neighbor_of(far, Direction::Down), None);
        assert_eq!(grid.neighbor_of(far, Direction::Up), Some(Cell::new(8, 9)));

        assert_eq!(grid.neighbors(Cell::new(5, 5)).count(), 4);
        assert_eq!(grid.neighbors(Cell::new(0, 5)).count(), 3);
        assert_eq!(grid.neighbors(corner).count(), 2);
    }

    #[test]
    fn test_boundary_mask() {
        let grid = PipeGrid::new(3, 3);
        use crate::direction::Direction::*;

        assert_eq!(
            grid.boundary_mask(Cell::new(0, 0), SideSet::ALL),
            SideSet::from([Right, Down])
        );
        assert_eq!(
            grid.boundary_mask(Cell::new(2, 2), SideSet::ALL),
            SideSet::from([Up, Left])
        );
        assert_eq!(grid.boundary_mask(Cell::new(1, 1), SideSet::ALL), SideSet::ALL);
        assert_eq!(
            grid.boundary_mask(Cell::new(0, 1), SideSet::from([Up, Down])),
            SideSet::from([Down])
        );
    }

    #[test]
    fn test_boundary_mask_single_cell_is_empty() {
        let grid = PipeGrid::new(1, 1);
        assert!(grid.boundary_mask(Cell::new(0, 0), SideSet::ALL).is_empty());
    }

    #[test]
    fn test_place_and_rotate() {
        let mut grid = PipeGrid::new(2, 2);
        let cell = Cell::new(1, 0);
        grid.place(cell, Tile::new(TileShape::Line, 0)).unwrap();
        assert!(grid.is_placed(cell));

        assert_eq!(grid.rotate(cell), Ok(1));
        assert_eq!(
            grid.open_sides_at(cell),
            SideSet::from([Direction::Right, Direction::Left])
        );
    }

    #[test]
    fn test_rotate_rejects_empty_and_out_of_bounds() {
        let mut grid = PipeGrid::new(2, 2);
        assert_eq!(
            grid.rotate(Cell::new(0, 0)),
            Err(GridError::EmptyCell { row: 0, col: 0 })
        );
        assert_eq!(
            grid.rotate(Cell::new(2, 0)),
            Err(GridError::OutOfBounds { row: 2, col: 0 })
        );
        assert!(grid
            .place(Cell::new(0, 5), Tile::new(TileShape::Cross, 0))
            .is_err());
    }

    #[test]
    fn test_set_places_at_row_major_index() {
        let mut grid = PipeGrid::new(2, 3);
        let tile = Tile::new(TileShape::Corner, 2);
        grid.set(Cell::new(1, 2), tile);
        assert_eq!(grid.get(Cell::new(1, 2)), Some(&tile));
        assert_eq!(grid.index(Cell::new(1, 2)), Some(5));
        assert_eq!(grid.count_placed(), 1);
    }

    #[test]
    fn test_take_and_clear() {
        let mut grid = PipeGrid::new(2, 2);
        let tile = Tile::new(TileShape::Tee, 3);
        grid.place(Cell::new(0, 1), tile).unwrap();
        grid.place(Cell::new(1, 1), tile).unwrap();

        assert_eq!(grid.take(Cell::new(0, 1)), Ok(Some(tile)));
        assert_eq!(grid.count_placed(), 1);

        grid.clear();
        assert_eq!(grid.count_placed(), 0);
    }

    #[test]
    fn test_display_glyphs() {
        let mut grid = PipeGrid::new(1, 3);
        grid.place(Cell::new(0, 0), Tile::new(TileShape::Single, 1)).unwrap();
        grid.place(Cell::new(0, 1), Tile::new(TileShape::Line, 1)).unwrap();
        assert_eq!(grid.to_string(), "╶─·\n");
    }

    #[test]
    fn test_glyph_table_covers_all_shapes() {
        for shape in TileShape::ALL {
            for rotation in 0..4 {
                let sides = crate::tile::open_sides(shape, rotation);
                assert_ne!(glyph(sides), ' ');
            }
        }
        assert_eq!(glyph(SideSet::ALL), '┼');
    }
}
