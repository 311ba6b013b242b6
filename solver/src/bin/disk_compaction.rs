//! Disk compaction: checksum after moving single blocks, then after moving whole files.

use anyhow::{Context, Result};
use chromate::disk::DiskMap;
use clap::Parser;
use solver::{init_tracing, read_input, report, PuzzleArgs};

fn main() -> Result<()> {
    let args = PuzzleArgs::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let disk = DiskMap::parse(&text)
        .with_context(|| format!("parsing disk map {}", args.input.display()))?;
    tracing::info!(files = disk.file_count(), blocks = disk.block_count(), "parsed disk map");

    report(disk.compact_blocks(), disk.compact_files());
    Ok(())
}
