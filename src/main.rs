//! CLI entry point for the gradient tile mosaic renderer

use clap::Parser;
use sprinkle::io::cli::{Cli, FileProcessor};

fn main() -> sprinkle::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
