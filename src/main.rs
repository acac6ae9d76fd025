use anyhow::Result;
use clap::Parser;

use covpart::cli::Cli;
use covpart::commands::run;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)
}
