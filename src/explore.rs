//! Breadth-first exploration of grids: hiking trails over elevation maps and flood-filled garden regions.

use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{InputError, InputResult};
use crate::grid::Grid;
use crate::location::Location;
use crate::shape::{GridShape, SquareStep};

/// Height of a single cell on a topographic map.
pub type Elevation = u8;

/// Trails start at this height.
pub const TRAILHEAD: Elevation = 0;
/// Trails end at this height.
pub const SUMMIT: Elevation = 9;
/// Marks a cell no trail may enter. Written as `.` in puzzle input.
pub const IMPASSABLE: Elevation = Elevation::MAX;

/// Parse a topographic map of single digits; `.` is read as [`IMPASSABLE`].
pub fn parse_elevations(text: &str) -> InputResult<Grid<Elevation>> {
    Grid::parse_with(text, |line, ch| match ch {
        '0'..='9' => Ok(ch as Elevation - b'0'),
        '.' => Ok(IMPASSABLE),
        _ => Err(InputError::malformed(line, format!("unexpected elevation {ch:?}"))),
    })
}

#[inline]
fn ascends(from: Elevation, to: Elevation) -> bool {
    from < SUMMIT && to == from + 1
}

/// Count the distinct [`SUMMIT`] cells reachable from `start` by steps that climb exactly one unit each.
///
/// A `start` already at [`SUMMIT`] reaches itself and scores 1. A `start` off the grid scores 0.
pub fn count_reachable(grid: &Grid<Elevation>, start: Location) -> usize {
    let Some(&start_height) = grid.get(start) else {
        return 0;
    };

    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, start_height)]);
    let mut summits = 0;

    while let Some((current, height)) = queue.pop_front() {
        if height == SUMMIT {
            summits += 1;
            continue;
        }

        for (_, neighbor, &next) in grid.neighbors::<SquareStep>(current) {
            if ascends(height, next) && visited.insert(neighbor) {
                queue.push_back((neighbor, next));
            }
        }
    }

    summits
}

/// Sum of [`count_reachable`] over every trailhead, the "score" of the map.
pub fn trailhead_scores(grid: &Grid<Elevation>) -> usize {
    let trailheads = grid.positions_of(&TRAILHEAD).collect_vec();
    trailheads.par_iter()
        .map(|trailhead| count_reachable(grid, *trailhead))
        .sum()
}

/// For every cell, the number of distinct ascending paths from it to any [`SUMMIT`].
///
/// Computed in one sweep per height from the top down, so the whole map costs `O(cells)`
/// instead of one search per trailhead.
pub fn trail_ratings(grid: &Grid<Elevation>) -> Grid<u64> {
    let mut ratings = grid.map(|height| u64::from(*height == SUMMIT));

    for height in (TRAILHEAD..SUMMIT).rev() {
        for location in grid.positions_of(&height) {
            let total: u64 = grid.neighbors::<SquareStep>(location)
                .filter(|(_, _, next)| ascends(height, **next))
                .filter_map(|(_, neighbor, _)| ratings.get(neighbor))
                .sum();

            if let Some(rating) = ratings.get_mut(location) {
                *rating = total;
            }
        }
    }

    ratings
}

/// Sum of the ratings of every trailhead.
pub fn trailhead_ratings(grid: &Grid<Elevation>) -> u64 {
    let ratings = trail_ratings(grid);
    grid.positions_of(&TRAILHEAD)
        .filter_map(|trailhead| ratings.get(trailhead))
        .sum()
}

/// Size of one flood-filled region.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Region {
    /// Number of cells in the region.
    pub area: usize,
    /// Number of cell edges facing another value or the edge of the grid.
    pub perimeter: usize,
}

impl Region {
    /// Cost of fencing this region.
    pub fn price(&self) -> usize {
        self.area * self.perimeter
    }
}

/// Flood fill from `start` over cells equal to it and measure the region.
///
/// Every edge of every cell that faces a different value or the grid boundary counts once toward the perimeter,
/// whether or not another region lies on the other side.
pub fn count_region<T: PartialEq>(grid: &Grid<T>, start: Location) -> Region {
    grow_region(grid, start, &mut HashSet::new(), |_| {})
}

fn grow_region<T, F>(grid: &Grid<T>, start: Location, visited: &mut HashSet<Location>, mut on_cell: F) -> Region
where
    T: PartialEq,
    F: FnMut(Location),
{
    let Some(plant) = grid.get(start) else {
        return Region::default();
    };

    let mut region = Region::default();
    let mut queue = VecDeque::from([start]);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        region.area += 1;
        on_cell(current);

        for (_, neighbor) in SquareStep::neighbors_of(current) {
            match grid.get(neighbor) {
                Some(other) if other == plant => {
                    if visited.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
                _ => region.perimeter += 1,
            }
        }
    }

    region
}

/// Partition the grid into its regions, sweeping row-major and growing a region from each cell not yet claimed.
pub fn regions<T: PartialEq + Clone>(grid: &Grid<T>) -> Vec<(T, Region)> {
    let mut visited = HashSet::with_capacity(grid.len());
    let mut found = Vec::new();

    for (location, plant) in grid.indexed() {
        if visited.contains(&location) {
            continue;
        }

        let region = grow_region(grid, location, &mut visited, |_| {});
        debug!(row = location.0, col = location.1, area = region.area, perimeter = region.perimeter, "region");
        found.push((plant.clone(), region));
    }

    found
}

/// Label every cell with the index of its region in the order [`regions`] reports them.
pub fn region_labels<T: PartialEq>(grid: &Grid<T>) -> Grid<usize> {
    let mut labels = grid.map(|_| 0);
    let mut visited = HashSet::with_capacity(grid.len());
    let mut next = 0;

    for (location, _) in grid.indexed() {
        if visited.contains(&location) {
            continue;
        }

        grow_region(grid, location, &mut visited, |cell| {
            if let Some(label) = labels.get_mut(cell) {
                *label = next;
            }
        });
        next += 1;
    }

    labels
}

/// Total fencing cost of every region on the grid.
pub fn fence_price<T: PartialEq + Clone>(grid: &Grid<T>) -> usize {
    regions(grid).iter()
        .map(|(_, region)| region.price())
        .sum()
}
