use anyhow::Result;

use crate::{config::Config, sample::generate_sample_cells};

use super::write_cells;

/// Writes the synthetic sample grid to the configured output.
pub fn sample(config: &Config) -> Result<()> {
    println!("Generating sample climate data...");

    let cells = generate_sample_cells(&mut rand::thread_rng());
    println!("Generated {} sample cells", cells.len());

    write_cells(&cells, config)?;
    println!("Done!");

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use tempfile::TempDir;

    use crate::{
        config::{Mode, SAMPLE_QUANTIZATION},
        topology::Topology,
    };

    use super::*;

    #[test]
    fn should_write_sample_artifact() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            mode: Mode::Sample,
            output: dir.path().join("public/data/climate.topojson"),
            resolution: 0.25,
            quantization: SAMPLE_QUANTIZATION,
        };

        sample(&config).unwrap();

        let topology = Topology::from_path(&config.output).unwrap();
        assert_eq!(topology.cell_count(), 26 * 72);
        assert_eq!(topology.bbox, [-182.5, -62.5, 177.5, 67.5]);
    }
}
