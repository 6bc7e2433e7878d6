//! Hop directions on a 4-connected lattice.

/// One of the four neighbour directions of a [`Torus4`](crate::Torus4) site.
///
/// The discriminant is the neighbour index: a uniform draw `d` in
/// `[0, 4)` selects `Direction::ALL[d]`. The order is west, east, south,
/// north and must not change, since reproducibility for a fixed seed
/// depends on it.
///
/// ```
/// use poplat_space::Direction;
///
/// assert_eq!(Direction::ALL[0], Direction::West);
/// assert_eq!(Direction::North.index(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// `(x - 1, y)`.
    West = 0,
    /// `(x + 1, y)`.
    East = 1,
    /// `(x, y - 1)`.
    South = 2,
    /// `(x, y + 1)`.
    North = 3,
}

impl Direction {
    /// All directions in neighbour-index order.
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::South,
        Direction::North,
    ];

    /// Neighbour index of this direction.
    pub fn index(self) -> usize {
        self as usize
    }

    /// `(dx, dy)` offset before wraparound.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Self::West => (-1, 0),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::North => (0, 1),
        }
    }
}
