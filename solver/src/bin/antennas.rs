//! Antenna antinodes: pairwise antinodes, then every antinode in line with a pair.

use anyhow::{Context, Result};
use chromate::antenna::{AntennaMap, AntinodeMode};
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let map = AntennaMap::parse(&text)
        .with_context(|| format!("parsing antenna map {}", args.input.display()))?;
    tracing::info!(frequencies = map.frequencies().count(), pairs = map.pairs().count(), "parsed map");

    report(map.count_antinodes(AntinodeMode::Pair), map.count_antinodes(AntinodeMode::Harmonic));
    Ok(())
}
