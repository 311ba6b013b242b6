//! Word search: every `XMAS`, then every `MAS` crossing itself.

use anyhow::{Context, Result};
use chromate::{wordsearch, Grid};
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let grid = Grid::parse_chars(&text)
        .with_context(|| format!("parsing letter grid {}", args.input.display()))?;

    report(wordsearch::count_word(&grid, "XMAS"), wordsearch::count_crosses(&grid, "MAS"));
    Ok(())
}
