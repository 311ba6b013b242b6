use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::error::{InputError, InputResult};
use crate::location::{Coord, Location};
use crate::shape::GridShape;

/// An immutable rectangular grid of cells, stored row-major.
///
/// Built once from puzzle input and only read afterwards, so it can be shared freely between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T> Grid<T> {
    /// Wrap an existing array; the first axis is rows.
    pub fn from_array(cells: Array2<T>) -> Self {
        Self { cells }
    }

    /// Parse a block of text with one grid row per line, converting every character with `cell`.
    ///
    /// Blank lines before and after the grid are ignored; a blank line between two rows is
    /// [`InputError::Malformed`]. Every row must have the same length as the first.
    pub fn parse_with<F>(text: &str, mut cell: F) -> InputResult<Self>
    where
        F: FnMut(usize, char) -> InputResult<T>,
    {
        let mut width = None;
        let mut rows = 0;
        let mut cells = Vec::with_capacity(text.len());
        let mut last_line = 0;
        let mut gap = None;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim_end();
            if line.is_empty() {
                if rows > 0 {
                    gap.get_or_insert(line_no);
                }
                continue;
            }

            if let Some(blank) = gap {
                return Err(InputError::malformed(blank, "blank line inside grid"));
            }

            let len = line.chars().count();
            match width {
                None => width = Some(len),
                Some(expected) if expected != len => {
                    return Err(InputError::malformed(line_no, format!("row has {len} cells, expected {expected}")));
                }
                _ => {}
            }

            for ch in line.chars() {
                cells.push(cell(line_no, ch)?);
            }
            rows += 1;
            last_line = line_no;
        }

        let width = width.ok_or(InputError::Empty)?;
        let cells = Array2::from_shape_vec((rows, width), cells)
            .map_err(|err| InputError::malformed(last_line, err.to_string()))?;

        Ok(Self { cells })
    }

    /// Number of rows.
    pub fn rows(&self) -> Coord {
        self.cells.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> Coord {
        self.cells.ncols()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells; parsed grids never do.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `location` lies on the grid.
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.rows() && location.1 < self.cols()
    }

    /// The cell at `location`, or [`None`] if it is off the grid.
    pub fn get(&self, location: Location) -> Option<&T> {
        self.cells.get(location.as_index())
    }

    /// Every cell with its location, in row-major order.
    pub fn indexed(&self) -> impl Iterator<Item=(Location, &T)> {
        self.cells.indexed_iter().map(|(index, cell)| (Location::from(index), cell))
    }

    /// Every location holding a cell equal to `value`, in row-major order.
    pub fn positions_of<'a>(&'a self, value: &'a T) -> impl Iterator<Item=Location> + 'a
    where
        T: PartialEq,
    {
        self.indexed().filter(move |(_, cell)| *cell == value).map(|(location, _)| location)
    }

    /// The on-grid neighbors of `location` reachable with one step of `Sh`.
    pub fn neighbors<Sh: GridShape>(&self, location: Location) -> impl Iterator<Item=(Sh, Location, &T)> {
        Sh::neighbors_of(location).into_iter()
            .filter_map(move |(dir, neighbor)| self.get(neighbor).map(|cell| (dir, neighbor, cell)))
    }

    /// Build a new grid of the same shape by converting each cell.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid { cells: self.cells.map(f) }
    }

    /// Mutable access for grids still under construction inside this crate.
    pub(crate) fn get_mut(&mut self, location: Location) -> Option<&mut T> {
        self.cells.get_mut(location.as_index())
    }

    pub(crate) fn row_chunks(&self, chunk_rows: usize) -> Vec<std::ops::Range<Coord>> {
        let chunk_rows = chunk_rows.max(1);
        (0..self.rows()).step_by(chunk_rows)
            .map(|start| start..(start + chunk_rows).min(self.rows()))
            .collect_vec()
    }
}

impl Grid<char> {
    /// Parse a grid of arbitrary characters.
    pub fn parse_chars(text: &str) -> InputResult<Self> {
        Self::parse_with(text, |_, ch| Ok(ch))
    }
}

impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.rows() * (self.cols() + 1));

        for row in self.cells.rows() {
            for cell in row {
                out.push_str(&cell.to_string());
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
