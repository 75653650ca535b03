//! CLI entry point for the polyomino tiling solver

use clap::Parser;
use polysolve::io::cli::{Cli, PuzzleRunner};

fn main() -> polysolve::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let runner = PuzzleRunner::new(cli);
    runner.run()
}
