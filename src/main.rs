//! CLI entry point for the layered token generator

use clap::Parser;
use traitmint::io::cli::{Cli, Processor};

fn main() -> traitmint::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();
    Processor::new(cli).process()
}
