//! 2D periodic lattice with 4-connected neighbourhood (W/E/S/N).

use crate::direction::Direction;
use crate::error::SpaceError;
use poplat_core::SiteId;

/// A two-dimensional torus of `width * height` sites.
///
/// Site `(x, y)` with `0 <= x < width` and `0 <= y < height` has ID
/// `y * width + x`. Every site has exactly four neighbours, listed in
/// [`Direction`] order and wrapping on both axes. On a 1×1 lattice the
/// only site is its own neighbour in every direction.
///
/// The neighbour table is computed once at construction; the lattice is
/// immutable afterwards.
///
/// # Examples
///
/// ```
/// use poplat_core::SiteId;
/// use poplat_space::{Direction, Torus4};
///
/// let lattice = Torus4::new(4, 3).unwrap();
/// assert_eq!(lattice.site_count(), 12);
///
/// // West of the left edge wraps to the right edge.
/// let origin = lattice.site_at(0, 0).unwrap();
/// assert_eq!(lattice.coord(lattice.neighbour(origin, Direction::West)), (3, 0));
/// assert_eq!(lattice.coord(lattice.neighbour(origin, Direction::South)), (0, 2));
/// assert_eq!(lattice.label(SiteId(5)), "1x1");
/// ```
#[derive(Debug, Clone)]
pub struct Torus4 {
    width: u32,
    height: u32,
    neighbours: Vec<[SiteId; 4]>,
}

impl Torus4 {
    /// Create a new periodic lattice with `width * height` sites.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::CellCountOverflow)` if the site count does not fit
    /// in a `u32`.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        let site_count = width
            .checked_mul(height)
            .ok_or(SpaceError::CellCountOverflow { width, height })?;

        let mut neighbours = Vec::with_capacity(site_count as usize);
        for y in 0..height {
            for x in 0..width {
                let mut row = [SiteId(0); 4];
                for d in Direction::ALL {
                    let (dx, dy) = d.offset();
                    let nx = wrap_axis(i64::from(x) + dx, width);
                    let ny = wrap_axis(i64::from(y) + dy, height);
                    row[d.index()] = SiteId(ny * width + nx);
                }
                neighbours.push(row);
            }
        }

        Ok(Self {
            width,
            height,
            neighbours,
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

    /// Total number of sites.
    pub fn site_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Iterate over all sites in ID order.
    pub fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        (0..self.neighbours.len() as u32).map(SiteId)
    }

    /// Whether `site` belongs to this lattice.
    pub fn contains(&self, site: SiteId) -> bool {
        site.index() < self.neighbours.len()
    }

    /// The `(x, y)` coordinate of a site.
    pub fn coord(&self, site: SiteId) -> (u32, u32) {
        (site.0 % self.width, site.0 / self.width)
    }

    /// The site at `(x, y)`, or `None` if out of bounds.
    pub fn site_at(&self, x: u32, y: u32) -> Option<SiteId> {
        if x < self.width && y < self.height {
            Some(SiteId(y * self.width + x))
        } else {
            None
        }
    }

    /// The neighbour of `site` in direction `d`.
    ///
    /// # Panics
    ///
    /// Panics if `site` does not belong to this lattice.
    pub fn neighbour(&self, site: SiteId, d: Direction) -> SiteId {
        self.neighbours[site.index()][d.index()]
    }

    /// All four neighbours of `site`, in [`Direction`] order.
    ///
    /// # Panics
    ///
    /// Panics if `site` does not belong to this lattice.
    pub fn neighbours(&self, site: SiteId) -> [SiteId; 4] {
        self.neighbours[site.index()]
    }

    /// Toroidal Manhattan distance between two sites.
    pub fn distance(&self, a: SiteId, b: SiteId) -> u32 {
        let (ax, ay) = self.coord(a);
        let (bx, by) = self.coord(b);
        axis_distance(ax, bx, self.width) + axis_distance(ay, by, self.height)
    }

    /// Human-readable `"{x}x{y}"` label of a site.
    pub fn label(&self, site: SiteId) -> String {
        let (x, y) = self.coord(site);
        format!("{x}x{y}")
    }
}

/// Wrap an axis value into `[0, len)`.
fn wrap_axis(val: i64, len: u32) -> u32 {
    val.rem_euclid(i64::from(len)) as u32
}

/// 1D distance along a periodic axis.
fn axis_distance(a: u32, b: u32, len: u32) -> u32 {
    let diff = a.abs_diff(b);
    diff.min(len - diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn site(t: &Torus4, x: u32, y: u32) -> SiteId {
        t.site_at(x, y).unwrap()
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_interior() {
        let t = Torus4::new(5, 5).unwrap();
        let n = t.neighbours(site(&t, 2, 2));
        assert_eq!(n[Direction::West.index()], site(&t, 1, 2));
        assert_eq!(n[Direction::East.index()], site(&t, 3, 2));
        assert_eq!(n[Direction::South.index()], site(&t, 2, 1));
        assert_eq!(n[Direction::North.index()], site(&t, 2, 3));
    }

    #[test]
    fn neighbours_wrap_corner() {
        let t = Torus4::new(5, 4).unwrap();
        let n = t.neighbours(site(&t, 0, 0));
        assert_eq!(n, [site(&t, 4, 0), site(&t, 1, 0), site(&t, 0, 3), site(&t, 0, 1)]);
    }

    #[test]
    fn neighbours_wrap_opposite_corner() {
        let t = Torus4::new(5, 4).unwrap();
        let n = t.neighbours(site(&t, 4, 3));
        assert_eq!(n, [site(&t, 3, 3), site(&t, 0, 3), site(&t, 4, 2), site(&t, 4, 0)]);
    }

    #[test]
    fn single_site_is_its_own_neighbour() {
        let t = Torus4::new(1, 1).unwrap();
        assert_eq!(t.neighbours(SiteId(0)), [SiteId(0); 4]);
    }

    #[test]
    fn thin_strip_wraps_onto_self_vertically() {
        let t = Torus4::new(3, 1).unwrap();
        let s = site(&t, 1, 0);
        assert_eq!(t.neighbour(s, Direction::North), s);
        assert_eq!(t.neighbour(s, Direction::South), s);
        assert_eq!(t.neighbour(s, Direction::East), site(&t, 2, 0));
    }

    // ── Coordinate tests ────────────────────────────────────────

    #[test]
    fn site_ids_are_row_major() {
        let t = Torus4::new(4, 3).unwrap();
        assert_eq!(site(&t, 0, 0), SiteId(0));
        assert_eq!(site(&t, 3, 0), SiteId(3));
        assert_eq!(site(&t, 0, 1), SiteId(4));
        assert_eq!(t.coord(SiteId(11)), (3, 2));
        assert!(t.site_at(4, 0).is_none());
        assert!(t.site_at(0, 3).is_none());
    }

    #[test]
    fn sites_iterates_all_in_order() {
        let t = Torus4::new(3, 2).unwrap();
        let all: Vec<_> = t.sites().collect();
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(t.contains(SiteId(5)));
        assert!(!t.contains(SiteId(6)));
    }

    #[test]
    fn distance_wraps() {
        let t = Torus4::new(10, 10).unwrap();
        assert_eq!(t.distance(site(&t, 0, 0), site(&t, 9, 9)), 2);
        assert_eq!(t.distance(site(&t, 0, 0), site(&t, 3, 4)), 7);
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(Torus4::new(0, 5).unwrap_err(), SpaceError::EmptySpace);
        assert_eq!(Torus4::new(5, 0).unwrap_err(), SpaceError::EmptySpace);
    }

    #[test]
    fn overflowing_site_count_rejected() {
        assert!(matches!(
            Torus4::new(u32::MAX, 2),
            Err(SpaceError::CellCountOverflow { .. })
        ));
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn every_neighbour_points_back(
            w in 1u32..12,
            h in 1u32..12,
            raw in 0u32..144,
        ) {
            let t = Torus4::new(w, h).unwrap();
            let s = SiteId(raw % (w * h));
            for d in Direction::ALL {
                let n = t.neighbour(s, d);
                prop_assert!(t.contains(n));
                prop_assert!(t.neighbours(n).contains(&s));
                prop_assert!(t.distance(s, n) <= 1);
            }
        }

        #[test]
        fn distance_is_symmetric(
            w in 1u32..12,
            h in 1u32..12,
            a in 0u32..144,
            b in 0u32..144,
        ) {
            let t = Torus4::new(w, h).unwrap();
            let a = SiteId(a % (w * h));
            let b = SiteId(b % (w * h));
            prop_assert_eq!(t.distance(a, b), t.distance(b, a));
            prop_assert_eq!(t.distance(a, a), 0);
        }
    }
}
