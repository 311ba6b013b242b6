//! Engraved stones that change every time you blink.
//!
//! Stones never interact, so only how many carry each number matters, not their order.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{InputError, InputResult, StoneOverflow};

/// The number engraved on a stone.
pub type Engraving = u64;

/// Multiplier for stones that neither are zero nor have an even number of digits.
pub const MULTIPLIER: Engraving = 2024;

/// What a single stone turns into after one blink.
///
/// `0` becomes `1`, a number with an even count of digits splits into its two halves
/// (leading zeros dropped), and anything else is multiplied by [`MULTIPLIER`].
pub fn blink_once(stone: Engraving) -> Result<Vec<Engraving>, StoneOverflow> {
    if stone == 0 {
        return Ok(vec![1]);
    }

    let digits = stone.ilog10() + 1;
    if digits % 2 == 0 {
        let half = 10u64.pow(digits / 2);
        return Ok(vec![stone / half, stone % half]);
    }

    stone.checked_mul(MULTIPLIER)
        .map(|next| vec![next])
        .ok_or(StoneOverflow { stone })
}

/// A line of stones, tracked as a count per engraving.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stones {
    counts: HashMap<Engraving, u64>,
}

impl Stones {
    /// Parse whitespace-separated numbers. Any token that is not a number is malformed.
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut stones = Self::default();

        for (index, line) in text.lines().enumerate() {
            for token in line.split_whitespace() {
                let stone = token.parse::<Engraving>()
                    .map_err(|err| InputError::malformed(index + 1, format!("bad stone {token:?}: {err}")))?;
                *stones.counts.entry(stone).or_default() += 1;
            }
        }

        if stones.counts.is_empty() {
            return Err(InputError::Empty);
        }

        Ok(stones)
    }

    /// Total number of stones.
    pub fn len(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Whether there are no stones.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// How many stones carry `engraving`.
    pub fn count_of(&self, engraving: Engraving) -> u64 {
        self.counts.get(&engraving).copied().unwrap_or(0)
    }

    /// Number of distinct engravings.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The stones after one blink.
    pub fn blink(&self) -> Result<Self, StoneOverflow> {
        let mut counts = HashMap::with_capacity(self.counts.len() * 2);

        for (&stone, &count) in &self.counts {
            for next in blink_once(stone)? {
                *counts.entry(next).or_default() += count;
            }
        }

        Ok(Self { counts })
    }

    /// The stones after `blinks` blinks.
    pub fn after(&self, blinks: usize) -> Result<Self, StoneOverflow> {
        let mut stones = self.clone();
        for blink in 1..=blinks {
            stones = stones.blink()?;
            debug!(blink, stones = stones.len(), distinct = stones.distinct(), "blinked");
        }
        Ok(stones)
    }
}
