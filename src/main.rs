//! `pinnacle` command: reads a profile dataset JSON, marks the water surface in
//! every time sample, and writes the augmented dataset, a depth-corrected
//! backscatter image, or both.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::run(cli::CliArgs::parse())
}
