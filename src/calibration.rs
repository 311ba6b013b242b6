//! Calibration equations: can operators placed between the numbers, evaluated left to right, hit the target?

use itertools::{repeat_n, Itertools};
use rayon::prelude::*;
use strum::VariantArray;
use tracing::warn;

use crate::error::{InputError, InputResult};

/// A binary operator that may be placed between two operands.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, VariantArray)]
pub enum Operator {
    /// `a + b`
    Add,
    /// `a * b`
    Multiply,
    /// Join the decimal digits of both operands, so `12 || 345` is `12345`.
    Concatenate,
}

impl Operator {
    /// Addition and multiplication only.
    pub const ARITHMETIC: &'static [Self] = &[Self::Add, Self::Multiply];

    /// Apply this operator, or [`None`] if the result overflows.
    pub fn apply(&self, left: u64, right: u64) -> Option<u64> {
        match self {
            Self::Add => left.checked_add(right),
            Self::Multiply => left.checked_mul(right),
            Self::Concatenate => {
                let digits = right.checked_ilog10().map_or(1, |log| log + 1);
                left.checked_mul(10u64.checked_pow(digits)?)?.checked_add(right)
            }
        }
    }
}

/// One line of calibration input: a target value and the operands that should produce it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Equation {
    /// The value the operands should evaluate to.
    pub target: u64,
    /// Operands in the order given, never empty once parsed.
    pub operands: Vec<u64>,
}

impl Equation {
    /// Parse `target: a b c ...`. `line` is only used to label errors.
    pub fn parse(line: usize, text: &str) -> InputResult<Self> {
        let (target, operands) = text.split_once(':')
            .ok_or_else(|| InputError::malformed(line, "equation has no ':' separator"))?;

        let number = |token: &str| token.trim().parse::<u64>()
            .map_err(|err| InputError::malformed(line, format!("bad number {token:?}: {err}")));

        let target = number(target)?;
        let operands = operands.split_whitespace().map(number).collect::<InputResult<Vec<_>>>()?;
        if operands.is_empty() {
            return Err(InputError::malformed(line, "equation has no operands"));
        }

        Ok(Self { target, operands })
    }

    /// Whether some choice of `operators` between the operands evaluates to the target.
    ///
    /// Every assignment of operators to the gaps is tried in turn; a combination that overflows simply fails.
    pub fn is_solvable(&self, operators: &[Operator]) -> bool {
        let Some((&first, rest)) = self.operands.split_first() else {
            return false;
        };

        if rest.is_empty() {
            return first == self.target;
        }

        repeat_n(operators.iter(), rest.len())
            .multi_cartesian_product()
            .any(|chosen| chosen.into_iter()
                .zip(rest)
                .try_fold(first, |acc, (operator, &operand)| operator.apply(acc, operand))
                == Some(self.target))
    }
}

/// Every equation in a calibration file.
#[derive(Clone, Debug, Default)]
pub struct Calibration {
    equations: Vec<Equation>,
    skipped: usize,
}

impl Calibration {
    /// Parse one equation per line. Malformed lines are skipped with a warning.
    ///
    /// Input without a single usable equation is [`InputError::Empty`].
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut calibration = Self::default();

        for (index, line) in text.lines().enumerate().filter(|(_, line)| !line.trim().is_empty()) {
            match Equation::parse(index + 1, line) {
                Ok(equation) => calibration.equations.push(equation),
                Err(err) => {
                    warn!(%err, "skipping malformed equation");
                    calibration.skipped += 1;
                }
            }
        }

        if calibration.equations.is_empty() {
            return Err(InputError::Empty);
        }

        Ok(calibration)
    }

    /// The parsed equations.
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Number of malformed lines dropped while parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Sum of the targets of every equation solvable with `operators`.
    pub fn total(&self, operators: &[Operator]) -> u64 {
        self.equations.par_iter()
            .filter(|equation| equation.is_solvable(operators))
            .map(|equation| equation.target)
            .sum()
    }
}
