//! Reactor safety reports: levels must drift gradually in one direction.

use std::ops::RangeInclusive;

use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{InputError, InputResult};

/// How far adjacent levels of a safe report may differ.
pub const SAFE_STEP: RangeInclusive<u64> = 1..=3;

/// Whether a single bad level may be ignored.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dampener {
    /// Every level counts.
    Off,
    /// A report is also safe if removing any one level makes it safe.
    On,
}

/// One line of levels.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    levels: Vec<i64>,
}

impl Report {
    /// Wrap a sequence of levels.
    pub fn new(levels: Vec<i64>) -> Self {
        Self { levels }
    }

    /// Parse whitespace-separated levels. `line` is only used to label errors.
    pub fn parse(line: usize, text: &str) -> InputResult<Self> {
        let levels = text.split_whitespace()
            .map(|token| token.parse::<i64>()
                .map_err(|err| InputError::malformed(line, format!("bad level {token:?}: {err}"))))
            .collect::<InputResult<Vec<_>>>()?;

        if levels.is_empty() {
            return Err(InputError::malformed(line, "report has no levels"));
        }

        Ok(Self { levels })
    }

    /// The levels, in order.
    pub fn levels(&self) -> &[i64] {
        &self.levels
    }

    /// Whether the report is safe under the given dampener setting.
    pub fn is_safe(&self, dampener: Dampener) -> bool {
        if is_gradual(self.levels.iter().copied()) {
            return true;
        }

        if dampener == Dampener::Off {
            return false;
        }

        let rescued = (0..self.levels.len()).find(|skip| {
            is_gradual(self.levels.iter().enumerate()
                .filter(|(index, _)| index != skip)
                .map(|(_, level)| *level))
        });

        if let Some(index) = rescued {
            debug!(levels = ?self.levels, index, "dampener removed a level");
        }

        rescued.is_some()
    }
}

// strictly monotonic with every step inside SAFE_STEP; fewer than two levels always qualify
fn is_gradual(levels: impl Iterator<Item=i64>) -> bool {
    let mut direction = None;

    levels.tuple_windows().all(|(a, b)| {
        let rising = b > a;
        SAFE_STEP.contains(&a.abs_diff(b)) && *direction.get_or_insert(rising) == rising
    })
}

/// Every report in a file.
#[derive(Clone, Debug, Default)]
pub struct Reports {
    reports: Vec<Report>,
    skipped: usize,
}

impl Reports {
    /// Parse one report per line. Malformed lines are skipped with a warning.
    ///
    /// Input without a single usable report is [`InputError::Empty`].
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut reports = Self::default();

        for (index, line) in text.lines().enumerate().filter(|(_, line)| !line.trim().is_empty()) {
            match Report::parse(index + 1, line) {
                Ok(report) => reports.reports.push(report),
                Err(err) => {
                    warn!(%err, "skipping malformed report");
                    reports.skipped += 1;
                }
            }
        }

        if reports.reports.is_empty() {
            return Err(InputError::Empty);
        }

        Ok(reports)
    }

    /// The parsed reports.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Number of malformed lines dropped while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of safe reports.
    pub fn count_safe(&self, dampener: Dampener) -> usize {
        self.reports.par_iter()
            .filter(|report| report.is_safe(dampener))
            .count()
    }
}
