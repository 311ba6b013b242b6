#![warn(missing_docs)]

//! # `chromate`
//!
//! Solvers for the grid and graph puzzles of an annual programming-puzzle event.
//! Each puzzle reads a small static input, runs a self-contained search and reports one or two numbers.
//! The `solver` crate wraps each of them in a command-line program.
//!
//! Puzzles operate on a [`Grid`] of cells addressed by [`Location`]s, stepping between cells with the
//! directions in the [`shape`] module.
//!
//! # Internals
//! The interesting work falls into three families:
//!
//! 1. [`explore`]: breadth-first search over a grid. Hiking trails climb exactly one unit per step and are
//! scored by the summits they reach; a dynamic-programming sweep from the summits down counts the distinct
//! trails instead. Flood fills partition a garden into regions and measure each one's area and perimeter.
//! 2. [`patrol`]: a guard walks straight and turns right at obstacles until it leaves the map. Remembering
//! every (location, heading) pose it has held detects when it is stuck in a loop, which in turn lets us count
//! the places where a single extra obstacle would trap it.
//! 3. [`ordering`]: page ordering rules form a directed graph. Updates are validated against it, and
//! inconsistent ones are put in the smallest valid order with Kahn's algorithm.
//!
//! The remaining puzzles are simpler: [`lists`], [`reports`], [`wordsearch`],
//! [`calibration`], [`antenna`], [`disk`], [`stones`] and [`claw`].
//!
//! Inputs are parsed up front and never mutated afterwards, so independent pieces of work
//! (trailheads, obstacle candidates, updates, equations) run in parallel on `rayon`'s pool.

pub use builder::LabBuilder;
pub use cell::Tile;
pub use error::{InputError, InputResult, OrderError, StoneOverflow};
pub use grid::Grid;
pub use location::{Dimension, Location};

pub mod antenna;
pub mod builder;
pub mod calibration;
pub(crate) mod cell;
pub mod claw;
pub mod disk;
pub mod error;
pub mod explore;
pub(crate) mod grid;
pub mod lists;
pub(crate) mod location;
pub mod ordering;
pub mod patrol;
pub mod reports;
pub mod shape;
pub mod stones;
mod tests;
pub mod wordsearch;
