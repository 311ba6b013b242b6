//! Guard patrol: cells visited before leaving, then obstacle placements that trap the guard.

use anyhow::{bail, Context, Result};
use chromate::patrol::{Lab, PatrolOutcome};
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let lab = Lab::parse(&text)
        .with_context(|| format!("parsing lab map {}", args.input.display()))?;
    tracing::debug!("lab:\n{lab}");

    let PatrolOutcome::Exited { visited } = lab.walk() else {
        bail!("the guard never leaves the lab");
    };

    report(visited, lab.count_loop_obstructions());
    Ok(())
}
