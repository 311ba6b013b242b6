//! Claw machines: the cheapest way to line a claw up with a prize using two buttons.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{InputError, InputResult};

/// Tokens spent per press of button A.
pub const COST_A: u64 = 3;
/// Tokens spent per press of button B.
pub const COST_B: u64 = 1;
/// Presses allowed per button on an unmodified machine.
pub const PRESS_LIMIT: u64 = 100;
/// Added to both prize coordinates once the unit conversion error is found.
pub const PRIZE_OFFSET: u64 = 10_000_000_000_000;

/// An `(x, y)` displacement or position.
pub type Offset = (u64, u64);

/// A single machine's buttons and prize.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ClawMachine {
    /// How far one press of A moves the claw.
    pub a: Offset,
    /// How far one press of B moves the claw.
    pub b: Offset,
    /// Where the prize sits.
    pub prize: Offset,
}

/// How many times each button was pressed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Presses {
    /// Presses of A.
    pub a: u64,
    /// Presses of B.
    pub b: u64,
}

impl Presses {
    /// Tokens spent on these presses.
    pub fn cost(&self) -> u64 {
        self.a * COST_A + self.b * COST_B
    }
}

impl ClawMachine {
    /// Parse the three lines describing one machine. `first_line` is only used to label errors.
    pub fn parse(first_line: usize, lines: [&str; 3]) -> InputResult<Self> {
        Ok(Self {
            a: parse_offset(first_line, lines[0], "Button A:", '+')?,
            b: parse_offset(first_line + 1, lines[1], "Button B:", '+')?,
            prize: parse_offset(first_line + 2, lines[2], "Prize:", '=')?,
        })
    }

    /// The same machine with the prize moved by [`PRIZE_OFFSET`] along both axes.
    pub fn corrected(&self) -> Self {
        Self { prize: (self.prize.0 + PRIZE_OFFSET, self.prize.1 + PRIZE_OFFSET), ..*self }
    }

    /// The cheapest presses that put the claw exactly on the prize, with at most `limit` presses per button.
    ///
    /// Unless the buttons move the claw along the same line, at most one combination reaches the prize
    /// and Cramer's rule finds it directly.
    pub fn cheapest(&self, limit: Option<u64>) -> Option<Presses> {
        let [ax, ay, bx, by, px, py] = [self.a.0, self.a.1, self.b.0, self.b.1, self.prize.0, self.prize.1]
            .map(i128::from);
        let within = |presses: &Presses| limit.map_or(true, |limit| presses.a <= limit && presses.b <= limit);

        let det = ax * by - ay * bx;
        if det == 0 {
            return self.cheapest_collinear(limit).filter(within);
        }

        let a = px * by - py * bx;
        let b = ax * py - ay * px;
        if a % det != 0 || b % det != 0 {
            return None;
        }

        let presses = Presses {
            a: u64::try_from(a / det).ok()?,
            b: u64::try_from(b / det).ok()?,
        };
        Some(presses).filter(within)
    }

    // Both buttons point the same way, so every solution is a trade of A presses for B presses.
    // Cost changes linearly with the number of A presses, so the cheapest solution is the first
    // one found from whichever end is cheaper. Solutions repeat at most every `bx` (or `by`) presses of A.
    fn cheapest_collinear(&self, limit: Option<u64>) -> Option<Presses> {
        let (a, b, prize) = (self.a, self.b, self.prize);
        let max_a = match a {
            (0, 0) => 0,
            (0, ay) => prize.1 / ay,
            (ax, _) => prize.0 / ax,
        };
        let max_a = limit.map_or(max_a, |limit| max_a.min(limit));

        let b_for = |presses_a: u64| -> Option<u64> {
            let rest = (prize.0 - presses_a * a.0, prize.1.checked_sub(presses_a * a.1)?);
            let presses_b = match b {
                (0, 0) => 0,
                (0, by) => rest.1 / by,
                (bx, _) => rest.0 / bx,
            };
            (presses_b * b.0 == rest.0 && presses_b * b.1 == rest.1).then_some(presses_b)
        };

        let period = b.0.max(b.1).max(1) + 1;
        // A is the better deal per unit of distance when it covers more than COST_A times B's distance
        let prefer_a = a.0 + a.1 > COST_A * (b.0 + b.1);
        let candidates: Box<dyn Iterator<Item=u64>> = if prefer_a {
            Box::new((0..=max_a).rev())
        } else {
            Box::new(0..=max_a)
        };

        candidates.take(period as usize)
            .find_map(|presses_a| b_for(presses_a).map(|presses_b| Presses { a: presses_a, b: presses_b }))
    }
}

fn parse_offset(line: usize, text: &str, label: &str, sign: char) -> InputResult<Offset> {
    let malformed = |reason: String| InputError::malformed(line, reason);

    let rest = text.trim().strip_prefix(label)
        .ok_or_else(|| malformed(format!("expected {label:?}")))?;
    let (x, y) = rest.split_once(',')
        .ok_or_else(|| malformed("expected two coordinates".to_string()))?;

    let coordinate = |token: &str, axis: char| {
        token.trim()
            .strip_prefix(axis)
            .and_then(|token| token.strip_prefix(sign))
            .and_then(|token| token.parse::<u64>().ok())
            .ok_or_else(|| malformed(format!("bad {axis} coordinate {token:?}")))
    };

    Ok((coordinate(x, 'X')?, coordinate(y, 'Y')?))
}

/// Every machine in an arcade.
#[derive(Clone, Debug, Default)]
pub struct Arcade {
    machines: Vec<ClawMachine>,
    skipped: usize,
}

impl Arcade {
    /// Parse blocks of three lines (`Button A`, `Button B`, `Prize`) separated by blank lines.
    ///
    /// Malformed blocks are skipped with a warning. Input without a single usable machine is [`InputError::Empty`].
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut arcade = Self::default();
        let mut block: Vec<(usize, &str)> = Vec::with_capacity(3);

        // a trailing blank line flushes the final block
        for (index, line) in text.lines().chain([""]).enumerate() {
            if !line.trim().is_empty() {
                block.push((index + 1, line));
                continue;
            }
            if block.is_empty() {
                continue;
            }

            let parsed = match *block.as_slice() {
                [(first, a), (_, b), (_, prize)] => ClawMachine::parse(first, [a, b, prize]),
                _ => Err(InputError::malformed(block[0].0, format!("machine has {} lines, expected 3", block.len()))),
            };
            match parsed {
                Ok(machine) => arcade.machines.push(machine),
                Err(err) => {
                    warn!(%err, "skipping malformed machine");
                    arcade.skipped += 1;
                }
            }
            block.clear();
        }

        if arcade.machines.is_empty() {
            return Err(InputError::Empty);
        }

        Ok(arcade)
    }

    /// The parsed machines.
    pub fn machines(&self) -> &[ClawMachine] {
        &self.machines
    }

    /// Number of malformed blocks dropped while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Tokens needed to win every winnable prize within [`PRESS_LIMIT`] presses per button.
    pub fn fewest_tokens(&self) -> u64 {
        self.total(|machine| machine.cheapest(Some(PRESS_LIMIT)))
    }

    /// Tokens needed to win every winnable prize once the prizes are [`corrected`](ClawMachine::corrected).
    /// There is no press limit.
    pub fn fewest_tokens_corrected(&self) -> u64 {
        self.total(|machine| machine.corrected().cheapest(None))
    }

    fn total<F>(&self, solve: F) -> u64
    where
        F: Fn(&ClawMachine) -> Option<Presses> + Sync,
    {
        self.machines.par_iter()
            .filter_map(|machine| {
                let presses = solve(machine);
                debug!(?machine, ?presses, "solved machine");
                presses
            })
            .map(|presses| presses.cost())
            .sum()
    }
}
