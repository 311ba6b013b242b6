//! Reactor reports: safe reports, then safe reports with the problem dampener.

use anyhow::{Context, Result};
use chromate::reports::{Dampener, Reports};
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let reports = Reports::parse(&text)
        .with_context(|| format!("parsing reactor reports {}", args.input.display()))?;
    tracing::info!(reports = reports.reports().len(), skipped = reports.skipped(), "parsed reports");

    report(reports.count_safe(Dampener::Off), reports.count_safe(Dampener::On));
    Ok(())
}
