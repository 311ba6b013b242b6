//! Hiking trails: sum of trailhead scores, then sum of trailhead ratings.

use anyhow::{Context, Result};
use chromate::explore;
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let grid = explore::parse_elevations(&text)
        .with_context(|| format!("parsing topographic map {}", args.input.display()))?;
    tracing::info!(rows = grid.rows(), cols = grid.cols(), "parsed map");

    report(explore::trailhead_scores(&grid), explore::trailhead_ratings(&grid));
    Ok(())
}
