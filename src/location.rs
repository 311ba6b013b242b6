use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A grid extent; grids are never empty.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a grid. The top left corner is `Location(0, 0)`.
///
/// Ordering is row-major, so sorting a set of locations walks the grid the way a reader would.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    /// Offset this location by `(rows, cols)`.
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, which every bounds check rejects.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// The signed `(rows, cols)` offset leading from `self` to `other`.
    pub fn delta_to(self, other: Location) -> (isize, isize) {
        (other.0 as isize - self.0 as isize, other.1 as isize - self.1 as isize)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}
