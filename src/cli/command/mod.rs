pub mod convert;
pub mod sample;

use anyhow::Result;

use crate::{
    cells::GridCell,
    cli::create_spinner,
    config::{Config, Mode},
    reading::NetCdfReader,
    topology::{save_topology, Topology},
};

pub use convert::convert;
pub use sample::sample;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Runs the command selected by `config`.
pub fn run(config: &Config) -> Result<()> {
    match &config.mode {
        Mode::Convert { temp, precip } => convert(&NetCdfReader, config, temp, precip),
        Mode::Sample => sample(config),
    }
}

/// Encodes the cells as TopoJSON and writes them to the configured output.
fn write_cells(cells: &[GridCell], config: &Config) -> Result<()> {
    println!("Converting to TopoJSON (quantization: {})...", config.quantization);

    let bar = create_spinner("Extracting shared arcs...".to_string());
    let topology = Topology::from_cells(cells, config.quantization);
    bar.finish_and_clear();

    let size = save_topology(&topology, &config.output)?;
    println!(
        "Saved to {} ({:.2} MB)",
        config.output.display(),
        size as f64 / BYTES_PER_MB
    );

    Ok(())
}
