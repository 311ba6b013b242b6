use std::fmt::{Display, Formatter};

/// A single cell of the patrolled lab.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Tile {
    /// Floor the guard can walk over.
    #[default]
    Open,
    /// Turns the guard to its right.
    Obstacle,
}

impl Tile {
    /// The glyph used for this tile in puzzle input and in printed maps.
    pub fn glyph(&self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Obstacle => '#',
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
