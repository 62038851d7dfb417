use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use era5_topo::cli::{command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config()?;
    command::run(&config)
}
