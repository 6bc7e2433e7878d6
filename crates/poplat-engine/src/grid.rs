//! Per-species occupancy counts laid out on the grid.

/// Occupant counts of one species, `height` rows by `width` columns.
///
/// Row `y` holds the counts of sites `(0, y)..(width - 1, y)`.
///
/// # Examples
///
/// ```
/// use poplat_engine::OccupancyGrid;
///
/// let grid = OccupancyGrid::from_counts(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(grid.get(2, 0), Some(2));
/// assert_eq!(grid.row(1), Some(&[3, 4, 5][..]));
/// assert_eq!(grid.total(), 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    counts: Vec<usize>,
}

impl OccupancyGrid {
    /// Wrap row-major counts. Returns `None` for a zero dimension or if
    /// `counts` does not hold exactly `width * height` entries.
    pub fn from_counts(width: u32, height: u32, counts: Vec<usize>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let expected = (width as usize).checked_mul(height as usize)?;
        (counts.len() == expected).then_some(Self {
            width,
            height,
            counts,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Count at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            self.counts
                .get(y as usize * self.width as usize + x as usize)
                .copied()
        } else {
            None
        }
    }

    /// Row `y`, or `None` if out of bounds.
    pub fn row(&self, y: u32) -> Option<&[usize]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.counts.get(start..start + self.width as usize)
    }

    /// Sum over all sites.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
