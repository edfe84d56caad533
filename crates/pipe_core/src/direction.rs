//! Grid directions and side sets.
//!
//! Directions are indexed clockwise starting at Up:
//!
//! ```text
//!        Up (0)
//! Left (3)  +  Right (1)
//!       Down (2)
//! ```
//!
//! Rotating a direction by one step turns it 90° clockwise, so the index
//! arithmetic is always `(d + steps) mod 4`.

use std::fmt;

/// One of the four sides of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in rotation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Direction for an index, taken modulo 4.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The side facing this one across a shared edge: `(d + 2) mod 4`.
    #[inline]
    pub fn opposite(self) -> Self {
        self.rotated(2)
    }

    /// Rotate clockwise by `steps` quarter turns.
    #[inline]
    pub fn rotated(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps as usize)
    }

    /// Coordinate delta as (row, col).
    ///
    /// Rows grow downward, so Up is `(-1, 0)`.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Single-bit mask used by [`SideSet`].
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// A set of directions stored as a 4-bit mask.
///
/// Bit `i` is set when `Direction::from_index(i)` is in the set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SideSet(u8);

impl SideSet {
    pub const EMPTY: SideSet = SideSet(0);
    pub const ALL: SideSet = SideSet(0b1111);

    /// Build a set from a raw mask. Bits above the low four are dropped.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        SideSet(bits & Self::ALL.0)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    #[inline]
    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    #[inline]
    pub fn with(mut self, dir: Direction) -> Self {
        self.insert(dir);
        self
    }

    #[inline]
    pub fn without(mut self, dir: Direction) -> Self {
        self.remove(dir);
        self
    }

    /// Set difference `self \ other`.
    #[inline]
    pub fn difference(self, other: SideSet) -> Self {
        SideSet(self.0 & !other.0)
    }

    #[inline]
    pub fn union(self, other: SideSet) -> Self {
        SideSet(self.0 | other.0)
    }

    #[inline]
    pub fn intersection(self, other: SideSet) -> Self {
        SideSet(self.0 & other.0)
    }

    #[inline]
    pub fn is_subset(self, other: SideSet) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Rotate every member clockwise by `steps` quarter turns.
    pub fn rotated(self, steps: u8) -> Self {
        self.iter().map(|d| d.rotated(steps)).collect()
    }

    /// Iterate members in rotation order (Up, Right, Down, Left).
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl FromIterator<Direction> for SideSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = SideSet::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

impl<const N: usize> From<[Direction; N]> for SideSet {
    fn from(dirs: [Direction; N]) -> Self {
        dirs.into_iter().collect()
    }
}

impl fmt::Display for SideSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, dir) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dir)?;
        }
        write!(f, "}}")
    }
}

/// The side facing `dir` across a shared edge.
#[inline]
pub fn opposite(dir: Direction) -> Direction {
    dir.opposite()
}
