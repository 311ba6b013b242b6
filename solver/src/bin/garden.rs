//! Garden plots: total fencing price of every region.

use anyhow::{Context, Result};
use chromate::{explore, Grid};
use clap::Parser;
use solver::{init_tracing, read_input, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let grid = Grid::parse_chars(&text)
        .with_context(|| format!("parsing garden {}", args.input.display()))?;

    let regions = explore::regions(&grid);
    tracing::info!(regions = regions.len(), "partitioned garden");

    let price: usize = regions.iter().map(|(_, region)| region.price()).sum();
    println!("{price}");
    Ok(())
}
