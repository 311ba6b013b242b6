//! Two columns of location IDs: how far apart they are once sorted, and how similar.

use itertools::Itertools;
use tracing::warn;

use crate::error::{InputError, InputResult};

/// The left and right columns of a historian's list, kept in input order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PairedLists {
    left: Vec<u64>,
    right: Vec<u64>,
    skipped: usize,
}

impl PairedLists {
    /// Parse one `left right` pair per line, separated by any whitespace.
    ///
    /// Lines without exactly two numbers are skipped with a warning. Input without a single usable
    /// pair is [`InputError::Empty`].
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut lists = Self::default();

        for (index, line) in text.lines().enumerate().filter(|(_, line)| !line.trim().is_empty()) {
            match parse_pair(index + 1, line) {
                Ok((left, right)) => {
                    lists.left.push(left);
                    lists.right.push(right);
                }
                Err(err) => {
                    warn!(%err, "skipping malformed pair");
                    lists.skipped += 1;
                }
            }
        }

        if lists.left.is_empty() {
            return Err(InputError::Empty);
        }

        Ok(lists)
    }

    /// Build from columns already in hand. The longer column is truncated to the shorter.
    pub fn new(mut left: Vec<u64>, mut right: Vec<u64>) -> Self {
        let len = left.len().min(right.len());
        left.truncate(len);
        right.truncate(len);
        Self { left, right, skipped: 0 }
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Number of malformed lines dropped while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Pair the smallest left with the smallest right, and so on, and sum the gaps.
    pub fn total_distance(&self) -> u64 {
        self.left.iter().sorted()
            .zip(self.right.iter().sorted())
            .map(|(left, right)| left.abs_diff(*right))
            .sum()
    }

    /// Sum of every left value times the number of times it appears on the right.
    pub fn similarity_score(&self) -> u64 {
        let occurrences = self.right.iter().counts();
        self.left.iter()
            .map(|value| value * occurrences.get(value).map_or(0, |count| *count as u64))
            .sum()
    }
}

fn parse_pair(line: usize, text: &str) -> InputResult<(u64, u64)> {
    let Some((left, right)) = text.split_whitespace().collect_tuple() else {
        return Err(InputError::malformed(line, "expected two numbers"));
    };

    let number = |token: &str| token.parse::<u64>()
        .map_err(|err| InputError::malformed(line, format!("bad location id {token:?}: {err}")));

    Ok((number(left)?, number(right)?))
}
