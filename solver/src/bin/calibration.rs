//! Calibration: equations solvable with `+` and `*`, then also with concatenation.

use anyhow::{Context, Result};
use chromate::calibration::{Calibration, Operator};
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};
use strum::VariantArray;

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let calibration = Calibration::parse(&text)
        .with_context(|| format!("parsing calibration equations {}", args.input.display()))?;
    tracing::info!(equations = calibration.equations().len(), skipped = calibration.skipped(), "parsed equations");

    report(calibration.total(Operator::ARITHMETIC), calibration.total(Operator::VARIANTS));
    Ok(())
}
