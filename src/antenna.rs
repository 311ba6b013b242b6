//! Antinodes of same-frequency antenna pairs.

use std::collections::{BTreeMap, HashSet};
use std::iter::successors;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::error::InputResult;
use crate::grid::Grid;
use crate::location::Location;

/// Where antinodes of an antenna pair fall.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AntinodeMode {
    /// One antinode beyond each antenna, at twice the distance from the other one.
    Pair,
    /// Every grid point exactly in line with the pair, the antennas themselves included.
    Harmonic,
}

/// A grid of antennas, each named by the alphanumeric frequency it broadcasts on.
pub struct AntennaMap {
    grid: Grid<char>,
    antennas: BTreeMap<char, Vec<Location>>,
}

impl AntennaMap {
    /// Parse a map where every ASCII letter or digit is an antenna and anything else is empty.
    pub fn parse(text: &str) -> InputResult<Self> {
        Ok(Self::new(Grid::parse_chars(text)?))
    }

    /// Index the antennas on `grid` by frequency.
    pub fn new(grid: Grid<char>) -> Self {
        let mut antennas: BTreeMap<char, Vec<Location>> = BTreeMap::new();
        for (location, &frequency) in grid.indexed() {
            if frequency.is_ascii_alphanumeric() {
                antennas.entry(frequency).or_default().push(location);
            }
        }

        Self { grid, antennas }
    }

    /// Every frequency on the map, in ascending order.
    pub fn frequencies(&self) -> impl Iterator<Item=char> + '_ {
        self.antennas.keys().copied()
    }

    /// Every pair of antennas sharing a frequency.
    pub fn pairs(&self) -> impl Iterator<Item=UnorderedPair<Location>> + '_ {
        self.antennas.values()
            .flat_map(|locations| locations.iter().tuple_combinations())
            .map(|(a, b)| UnorderedPair(*a, *b))
    }

    /// The distinct on-grid antinodes of every pair.
    pub fn antinodes(&self, mode: AntinodeMode) -> HashSet<Location> {
        let mut antinodes = HashSet::new();

        for UnorderedPair(a, b) in self.pairs() {
            let (dr, dc) = a.delta_to(b);
            match mode {
                AntinodeMode::Pair => {
                    antinodes.extend([b.offset_by((dr, dc)), a.offset_by((-dr, -dc))]
                        .into_iter()
                        .filter(|location| self.grid.contains(*location)));
                }
                AntinodeMode::Harmonic => {
                    let divisor = gcd(dr.unsigned_abs(), dc.unsigned_abs()) as isize;
                    let step = (dr / divisor, dc / divisor);
                    antinodes.extend(self.ray(a, step));
                    antinodes.extend(self.ray(a, (-step.0, -step.1)));
                }
            }
        }

        antinodes
    }

    /// Number of distinct on-grid antinodes.
    pub fn count_antinodes(&self, mode: AntinodeMode) -> usize {
        self.antinodes(mode).len()
    }

    // `from` and every step after it, until the edge of the grid
    fn ray(&self, from: Location, step: (isize, isize)) -> impl Iterator<Item=Location> + '_ {
        successors(Some(from), move |location| Some(location.offset_by(step)))
            .take_while(move |location| self.grid.contains(*location))
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}
