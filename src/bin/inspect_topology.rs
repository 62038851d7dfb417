//! Topology inspection utility
//!
//! Loads a generated artifact, decodes every cell and prints a summary of
//! the grid and its value ranges.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Result;
use clap::Parser;
use era5_topo::{cells::GridCell, topology::Topology};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Summarize a climate TopoJSON artifact
struct Args {
    /// Path to the TopoJSON file
    path: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match inspect(&args.path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn inspect(path: &Path) -> Result<()> {
    let topology = Topology::from_path(path)?;
    let cells = topology.decode_cells()?;

    println!("File:          {}", path.display());
    println!("Cells:         {}", topology.cell_count());
    println!("Arcs:          {}", topology.arcs.len());
    println!("Bounding box:  {:?}", topology.bbox);
    println!("Scale:         {:?}", topology.transform.scale);

    if cells.is_empty() {
        println!("No cells to summarize");
        return Ok(());
    }

    let (t_min, t_max) = value_range(&cells, |c| &c.properties.temperature);
    let (p_min, p_max) = value_range(&cells, |c| &c.properties.precipitation);
    println!("Temperature:   {:.1} .. {:.1} °C", t_min, t_max);
    println!("Precipitation: {:.1} .. {:.1} mm", p_min, p_max);

    Ok(())
}

fn value_range<F>(cells: &[GridCell], series: F) -> (f64, f64)
where
    F: Fn(&GridCell) -> &[f64; 12],
{
    cells
        .iter()
        .flat_map(|c| series(c).iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
