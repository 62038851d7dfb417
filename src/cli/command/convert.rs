use std::path::Path;

use anyhow::Result;

use crate::{
    cli::{create_progress_bar, create_spinner},
    config::Config,
    pipeline::{build_from_fields, check_inputs_exist, extract_field, PRECIPITATION_VAR, TEMPERATURE_VAR},
    reading::{GridReader, GriddedDataset},
};

use super::write_cells;

/// Converts the temperature and precipitation inputs into the output artifact.
pub fn convert<R: GridReader>(reader: &R, config: &Config, temp: &Path, precip: &Path) -> Result<()> {
    check_inputs_exist(temp, precip)?;

    let (temp_ds, precip_ds) = load_inputs(reader, temp, precip)?;

    let bar = create_spinner("Extracting variables...".to_string());
    let temperature = extract_field(&temp_ds, TEMPERATURE_VAR)?;
    let precipitation = extract_field(&precip_ds, PRECIPITATION_VAR)?;
    drop((temp_ds, precip_ds));
    bar.finish_and_clear();

    println!("Creating grid cells...");
    let conversion = build_from_fields(&temperature, &precipitation, config.resolution)?;
    if !conversion.empty_months.is_empty() {
        eprintln!(
            "Warning: no samples for calendar month(s) {:?}; affected cells are dropped",
            conversion.empty_months
        );
    }
    println!("Created {} grid cells", conversion.cells.len());

    write_cells(&conversion.cells, config)?;
    println!("Done!");

    Ok(())
}

fn load_inputs<R: GridReader>(reader: &R, temp: &Path, precip: &Path) -> Result<(GriddedDataset, GriddedDataset)> {
    let bar = create_progress_bar(2, "Loading inputs...".to_string());

    bar.suspend(|| println!("Loading temperature data from {}", temp.display()));
    let temp_ds = reader.open(temp)?;
    bar.inc(1);

    bar.suspend(|| println!("Loading precipitation data from {}", precip.display()));
    let precip_ds = reader.open(precip)?;
    bar.inc(1);

    bar.finish_and_clear();

    Ok((temp_ds, precip_ds))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::{collections::HashMap, path::PathBuf};

    use tempfile::TempDir;

    use crate::{
        config::Mode, error::ConverterError, reading::dataset::tests::dataset_fixture, topology::Topology,
    };

    use super::*;

    /// Serves prepared datasets keyed by path.
    struct FixtureReader(HashMap<PathBuf, GriddedDataset>);

    impl GridReader for FixtureReader {
        fn open(&self, path: &Path) -> Result<GriddedDataset, ConverterError> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| ConverterError::load(path, "not a fixture"))
        }
    }

    fn setup(dir: &TempDir) -> (FixtureReader, PathBuf, PathBuf) {
        let temp = dir.path().join("t2m.nc");
        let precip = dir.path().join("tp.nc");
        std::fs::write(&temp, b"").unwrap();
        std::fs::write(&precip, b"").unwrap();

        let mut fixtures = HashMap::new();
        fixtures.insert(temp.clone(), dataset_fixture("t2m", &[0.0, 5.0], &[0.0, 5.0], 288.15));
        fixtures.insert(precip.clone(), dataset_fixture("tp", &[0.0, 5.0], &[0.0, 5.0], 0.01));

        (FixtureReader(fixtures), temp, precip)
    }

    fn config(dir: &TempDir, temp: &Path, precip: &Path) -> Config {
        Config {
            mode: Mode::Convert {
                temp: temp.to_path_buf(),
                precip: precip.to_path_buf(),
            },
            output: dir.path().join("public/data/climate.topojson"),
            resolution: 5.0,
            quantization: 1_000_000,
        }
    }

    #[test]
    fn should_write_round_trippable_artifact() {
        let dir = TempDir::new().unwrap();
        let (reader, temp, precip) = setup(&dir);
        let config = config(&dir, &temp, &precip);

        convert(&reader, &config, &temp, &precip).unwrap();

        let cells = Topology::from_path(&config.output).unwrap().decode_cells().unwrap();
        assert_eq!(cells.len(), 4);
        for cell in cells {
            assert_eq!(cell.properties.temperature, [15.0; 12]);
            assert_eq!(cell.properties.precipitation, [10.0; 12]);
        }
    }

    #[test]
    fn should_not_touch_output_when_input_missing() {
        let dir = TempDir::new().unwrap();
        let (reader, _, precip) = setup(&dir);
        let missing = dir.path().join("missing.nc");
        let config = config(&dir, &missing, &precip);

        let err = convert(&reader, &config, &missing, &precip).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConverterError>(),
            Some(ConverterError::InputNotFound { .. })
        ));
        assert!(!config.output.exists());
    }

    #[test]
    fn should_propagate_load_failure() {
        let dir = TempDir::new().unwrap();
        let (_, temp, precip) = setup(&dir);
        let reader = FixtureReader(HashMap::new());
        let config = config(&dir, &temp, &precip);

        let err = convert(&reader, &config, &temp, &precip).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConverterError>(),
            Some(ConverterError::Load { .. })
        ));
        assert!(!config.output.exists());
    }
}
