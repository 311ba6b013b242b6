//! Shared plumbing for the puzzle binaries: argument parsing, logging and input loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chromate::InputError;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

/// Arguments every puzzle binary accepts.
#[derive(Parser, Debug)]
#[command(version)]
pub struct PuzzleArgs {
    /// Puzzle input to read
    #[arg(default_value = "input.txt")]
    pub input: PathBuf,

    /// Log per-item diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// Log to stderr at `INFO`, or `DEBUG` when `verbose`, so answers on stdout stay clean.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Read the whole input file.
pub fn read_input(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), bytes = text.len(), "read input");
    Ok(text)
}

/// Print part one and part two, one per line.
pub fn report(part_one: impl std::fmt::Display, part_two: impl std::fmt::Display) {
    println!("{part_one}");
    println!("{part_two}");
}
