//! CLI entry point for the quadtree image approximation tool

use clap::Parser;
use quadart::io::cli::{Cli, FileProcessor};

fn main() -> quadart::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
