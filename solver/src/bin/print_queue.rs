//! Print queue: middle pages of correctly ordered updates, then of the fixed-up incorrect ones.

use anyhow::{Context, Result};
use chromate::ordering::PrintQueue;
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let queue = PrintQueue::parse(&text)
        .with_context(|| format!("parsing print queue {}", args.input.display()))?;
    tracing::info!(rules = queue.rules().len(), updates = queue.updates().len(), skipped = queue.skipped(), "parsed queue");

    let reordered = queue.reordered_middle_sum().context("reordering updates")?;
    report(queue.ordered_middle_sum(), reordered);
    Ok(())
}
