//! Plutonian stones: how many after 25 blinks, then after 75.

use anyhow::{Context, Result};
use chromate::stones::Stones;
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let stones = Stones::parse(&text)
        .with_context(|| format!("parsing stones {}", args.input.display()))?;

    let short = stones.after(25)?;
    let long = short.after(50)?;
    report(short.len(), long.len());
    Ok(())
}
