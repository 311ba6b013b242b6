//! Error types shared by the puzzle parsers and solvers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ordering::PageId;

/// Result type for parsing puzzle input.
pub type InputResult<T> = Result<T, InputError>;

/// Reasons puzzle input could not be read or understood.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InputError {
    /// The input file is missing or unreadable.
    #[error("could not read {path}")]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A line does not match the structure its section expects.
    #[error("line {line}: {reason}")]
    Malformed {
        /// One-based line number within the input.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The input holds nothing to work on.
    #[error("input is empty")]
    Empty,

    /// A map has no marked starting position.
    #[error("no starting position marked with one of {markers:?}")]
    MissingStart {
        /// The markers that were searched for.
        markers: &'static [char],
    },
}

impl InputError {
    /// Creates a malformed-line error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed { line, reason: reason.into() }
    }
}

/// Reasons a sequence could not be put in order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The rules restricted to the sequence contain a cycle; these pages never reached in-degree zero.
    #[error("ordering rules contain a cycle through pages {remaining:?}")]
    CycleDetected {
        /// Pages left over once no page could be placed, in ascending order.
        remaining: Vec<PageId>,
    },
}

/// A stone's engraving grew too large to represent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("stone {stone} overflows when multiplied")]
pub struct StoneOverflow {
    /// The engraving that could not be multiplied.
    pub stone: u64,
}
