//! Claw machines: fewest tokens to win every prize, then again with the corrected prize positions.

use anyhow::{Context, Result};
use chromate::claw::Arcade;
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let arcade = Arcade::parse(&text)
        .with_context(|| format!("parsing claw machines {}", args.input.display()))?;
    tracing::info!(machines = arcade.machines().len(), skipped = arcade.skipped(), "parsed arcade");

    report(arcade.fewest_tokens(), arcade.fewest_tokens_corrected());
    Ok(())
}
