use std::hash::Hash;

use itertools::Itertools;
use strum::VariantArray;

use crate::location::Location;

/// Functionality that must be implemented on a case-by-case basis for any family of step directions.
///
/// [`SquareStep`] and [`CompassStep`] are built-in implementations.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd {
    /// The [`Location`] one step from `location` in this direction.
    ///
    /// The result is not bounds-checked; see [`Grid::get`](crate::Grid::get).
    fn attempt_from(&self, location: Location) -> Location;
    /// The `(rows, cols)` offset of a single step.
    fn delta(&self) -> (isize, isize);
    /// The opposite direction.
    fn invert(&self) -> Self;
}

/// The four orthogonal directions, as used by flood fills, trails and the patrolling guard.
///
/// Variants are declared in clockwise order starting from [`Up`](SquareStep::Up).
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Toward row 0.
    Up,
    /// Toward higher columns.
    Right,
    /// Toward higher rows.
    Down,
    /// Toward column 0.
    Left,
}

impl SquareStep {
    /// Rotate 90 degrees clockwise.
    pub fn turn_right(&self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// The arrow glyph a guard facing this way is drawn with.
    pub fn glyph(&self) -> char {
        match self {
            Self::Up => '^',
            Self::Right => '>',
            Self::Down => 'v',
            Self::Left => '<',
        }
    }

    /// Inverse of [`Self::glyph`].
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.glyph() == glyph).copied()
    }
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        location.offset_by(self.delta())
    }

    fn delta(&self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    fn invert(&self) -> Self {
        self.turn_right().turn_right()
    }
}

/// All eight directions, including diagonals; used by the word search.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum CompassStep {
    /// Up one row.
    North,
    /// Up one row, right one column.
    NorthEast,
    /// Right one column.
    East,
    /// Down one row, right one column.
    SouthEast,
    /// Down one row.
    South,
    /// Down one row, left one column.
    SouthWest,
    /// Left one column.
    West,
    /// Up one row, left one column.
    NorthWest,
}

impl Step for CompassStep {
    fn attempt_from(&self, location: Location) -> Location {
        location.offset_by(self.delta())
    }

    fn delta(&self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
            Self::East => (0, 1),
            Self::SouthEast => (1, 1),
            Self::South => (1, 0),
            Self::SouthWest => (1, -1),
            Self::West => (0, -1),
            Self::NorthWest => (-1, -1),
        }
    }

    fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }
}

/// Functionality on top of [`Step`] with identical implementation across all step families.
pub trait GridShape: Step {
    /// One step from `location` in every direction of the family, paired with that direction.
    ///
    /// Neighbors off the grid are included; callers filter them with a bounds check.
    fn neighbors_of(location: Location) -> Vec<(Self, Location)>;
    /// The direction leading from `a` to `b` in a single step.
    ///
    /// Returns [`None`] unless `a` and `b` are adjacent.
    fn direction_to(a: Location, b: Location) -> Option<Self>;
}

impl<Sh> GridShape for Sh
where
    Sh: Step,
{
    fn neighbors_of(location: Location) -> Vec<(Self, Location)> {
        Self::VARIANTS.iter()
            .map(|dir| (*dir, dir.attempt_from(location)))
            .collect_vec()
    }

    fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
