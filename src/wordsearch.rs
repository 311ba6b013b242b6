//! Word search over a letter grid, in straight lines and in diagonal crosses.

use std::iter::successors;

use itertools::Itertools;
use rayon::prelude::*;
use strum::VariantArray;

use crate::grid::Grid;
use crate::location::Location;
use crate::shape::{CompassStep, Step};

/// Rows handed to one parallel task at a time.
const CHUNK_ROWS: usize = 16;

fn reads<Sh: Step>(grid: &Grid<char>, start: Location, direction: Sh, letters: &[char]) -> bool {
    successors(Some(start), |location| Some(direction.attempt_from(*location)))
        .zip(letters)
        .all(|(location, letter)| grid.get(location) == Some(letter))
}

fn count_in_rows<F>(grid: &Grid<char>, count_at: F) -> usize
where
    F: Fn(Location) -> usize + Sync,
{
    grid.row_chunks(CHUNK_ROWS).into_par_iter()
        .map(|rows| rows.cartesian_product(0..grid.cols())
            .map(|(row, col)| count_at(Location(row, col)))
            .sum::<usize>())
        .sum()
}

/// Count every occurrence of `word` reading in a straight line in any of the eight compass directions.
///
/// Occurrences may overlap. A palindrome is found once per direction it reads in.
pub fn count_word(grid: &Grid<char>, word: &str) -> usize {
    let letters = word.chars().collect_vec();
    if letters.is_empty() {
        return 0;
    }

    count_in_rows(grid, |start| CompassStep::VARIANTS.iter()
        .filter(|direction| reads(grid, start, **direction, &letters))
        .count())
}

/// Count the cells where `word` crosses itself in an X, each diagonal reading it forwards or backwards.
///
/// The crossing point is the middle letter, so `word` must have odd length; other words never cross and count 0.
pub fn count_crosses(grid: &Grid<char>, word: &str) -> usize {
    let letters = word.chars().collect_vec();
    if letters.len() % 2 == 0 {
        return 0;
    }

    let reversed = letters.iter().rev().copied().collect_vec();
    let reach = (letters.len() / 2) as isize;

    count_in_rows(grid, |centre| {
        let crossed = [CompassStep::SouthEast, CompassStep::SouthWest].into_iter().all(|diagonal| {
            let (dr, dc) = diagonal.delta();
            let start = centre.offset_by((-dr * reach, -dc * reach));
            reads(grid, start, diagonal, &letters) || reads(grid, start, diagonal, &reversed)
        });
        usize::from(crossed)
    })
}
