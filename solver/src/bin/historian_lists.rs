//! Location lists: total distance between the sorted lists, then their similarity score.

use anyhow::{Context, Result};
use chromate::lists::PairedLists;
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let lists = PairedLists::parse(&text)
        .with_context(|| format!("parsing location lists {}", args.input.display()))?;
    tracing::info!(pairs = lists.len(), skipped = lists.skipped(), "parsed lists");

    report(lists.total_distance(), lists.similarity_score());
    Ok(())
}
