//! The load, reduce and build steps shared by the real-data command.

use std::path::Path;

use crate::{
    cells::{build_cells, GridCell},
    error::ConverterError,
    monthly::monthly_means,
    reading::{ClimateField, GriddedDataset},
};

pub const TEMPERATURE_VAR: &str = "t2m";
pub const PRECIPITATION_VAR: &str = "tp";

const COORDINATE_TOLERANCE: f64 = 1e-6;

/// Fails on the first input path that does not exist.
pub fn check_inputs_exist(temp: &Path, precip: &Path) -> Result<(), ConverterError> {
    for (kind, path) in [("Temperature", temp), ("Precipitation", precip)] {
        if !path.exists() {
            return Err(ConverterError::InputNotFound {
                kind,
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Resolves a variable by its canonical name, else the first data variable.
pub fn extract_field(dataset: &GriddedDataset, canonical: &str) -> Result<ClimateField, ConverterError> {
    let name = dataset
        .resolve_data_var(canonical)
        .map_err(|e| ConverterError::load(&dataset.source, e))?;
    dataset.field(&name)
}

/// Both fields must sit on the same lat/lon lattice.
pub fn check_same_grid(temperature: &ClimateField, precipitation: &ClimateField) -> Result<(), ConverterError> {
    let axes = [
        ("latitude", &temperature.lats, &precipitation.lats),
        ("longitude", &temperature.lons, &precipitation.lons),
    ];

    for (axis, a, b) in axes {
        if a.len() != b.len() {
            return Err(ConverterError::GridMismatch(format!(
                "{} has {} points in the temperature grid but {} in the precipitation grid",
                axis,
                a.len(),
                b.len()
            )));
        }

        if let Some((x, y)) = a.iter().zip(b.iter()).find(|(x, y)| (*x - *y).abs() > COORDINATE_TOLERANCE) {
            return Err(ConverterError::GridMismatch(format!(
                "{} {} in the temperature grid does not match {} in the precipitation grid",
                axis, x, y
            )));
        }
    }

    Ok(())
}

#[derive(Debug)]
pub struct Conversion {
    pub cells: Vec<GridCell>,
    /// Calendar months (1-12) absent from either time axis.
    pub empty_months: Vec<u32>,
}

/// Reduces both fields to monthly means and builds the cell collection.
pub fn build_from_fields(
    temperature: &ClimateField,
    precipitation: &ClimateField,
    resolution: f64,
) -> Result<Conversion, ConverterError> {
    check_same_grid(temperature, precipitation)?;

    let temperature_monthly = monthly_means(temperature);
    let precipitation_monthly = monthly_means(precipitation);

    let cells = build_cells(
        &temperature.lats,
        &temperature.lons,
        &temperature_monthly,
        &precipitation_monthly,
        resolution,
    )?;

    let mut empty_months: Vec<u32> = temperature_monthly
        .empty_months
        .iter()
        .chain(&precipitation_monthly.empty_months)
        .copied()
        .collect();
    empty_months.sort_unstable();
    empty_months.dedup();

    Ok(Conversion { cells, empty_months })
}

// -- Tests -------------------------------------------------------------------
