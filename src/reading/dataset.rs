//! In-memory gridded dataset and the name resolution rules applied to it.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::error::ConverterError;

pub const LATITUDE_NAMES: [&str; 2] = ["latitude", "lat"];
pub const LONGITUDE_NAMES: [&str; 2] = ["longitude", "lon"];
pub const TIME_NAMES: [&str; 2] = ["time", "valid_time"];

#[derive(Debug, Error, PartialEq)]
#[error("no variable named {wanted}")]
pub struct NameNotFound {
    pub wanted: String,
}

/// Picks the first of `candidates` present in `available`. When none is
/// present and `fall_back_to_first` is set, the first available name wins.
pub fn resolve_name<'a>(
    candidates: &[&str],
    available: &'a [String],
    fall_back_to_first: bool,
) -> Result<&'a str, NameNotFound> {
    for candidate in candidates {
        if let Some(name) = available.iter().find(|name| name.as_str() == *candidate) {
            return Ok(name);
        }
    }

    match available.first() {
        Some(first) if fall_back_to_first => Ok(first),
        _ => Err(NameNotFound {
            wanted: candidates.join(" or "),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Coordinate {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct DataVariable {
    pub name: String,
    /// Dimension names paired with their lengths, outermost first.
    pub dims: Vec<(String, usize)>,
    /// Row-major values, `None` where the source is missing.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct TimeAxis {
    pub name: String,
    pub stamps: Vec<NaiveDateTime>,
}

/// A loaded gridded file: coordinate axes, a decoded time axis and the data
/// variables in file order.
#[derive(Debug, Clone)]
pub struct GriddedDataset {
    pub source: PathBuf,
    pub coordinates: Vec<Coordinate>,
    pub time: TimeAxis,
    pub data_vars: Vec<DataVariable>,
}

/// One variable reshaped to (time, lat, lon) with its axes attached.
#[derive(Debug, Clone)]
pub struct ClimateField {
    pub name: String,
    pub times: Vec<NaiveDateTime>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub values: Vec<Option<f64>>,
}

impl ClimateField {
    #[cfg(test)]
    pub(crate) fn value(&self, t: usize, i: usize, j: usize) -> Option<f64> {
        let idx = (t * self.lats.len() + i) * self.lons.len() + j;
        self.values.get(idx).copied().flatten()
    }
}

impl GriddedDataset {
    pub fn data_var_names(&self) -> Vec<String> {
        self.data_vars.iter().map(|v| v.name.clone()).collect()
    }

    pub fn coordinate_names(&self) -> Vec<String> {
        self.coordinates.iter().map(|c| c.name.clone()).collect()
    }

    /// The canonical variable if present, else the first data variable.
    pub fn resolve_data_var(&self, canonical: &str) -> Result<String, NameNotFound> {
        let names = self.data_var_names();
        resolve_name(&[canonical], &names, true).map(str::to_string)
    }

    pub fn coordinate(&self, candidates: &[&str]) -> Result<&Coordinate, NameNotFound> {
        let names = self.coordinate_names();
        let name = resolve_name(candidates, &names, false)?;

        self.coordinates
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| NameNotFound {
                wanted: name.to_string(),
            })
    }

    pub fn latitudes(&self) -> Result<&Coordinate, NameNotFound> {
        self.coordinate(&LATITUDE_NAMES)
    }

    pub fn longitudes(&self) -> Result<&Coordinate, NameNotFound> {
        self.coordinate(&LONGITUDE_NAMES)
    }

    /// Extracts `var_name` as a (time, lat, lon) field. Extra length-1
    /// dimensions are squeezed; any other layout is rejected.
    pub fn field(&self, var_name: &str) -> Result<ClimateField, ConverterError> {
        let variable = self
            .data_vars
            .iter()
            .find(|v| v.name == var_name)
            .ok_or_else(|| {
                ConverterError::load(
                    &self.source,
                    NameNotFound {
                        wanted: var_name.to_string(),
                    },
                )
            })?;

        let lat = self
            .latitudes()
            .map_err(|e| ConverterError::load(&self.source, e))?;
        let lon = self
            .longitudes()
            .map_err(|e| ConverterError::load(&self.source, e))?;
        let time_name = self.time.name.as_str();

        let axes = [time_name, lat.name.as_str(), lon.name.as_str()];
        let layout: Vec<&(String, usize)> = variable
            .dims
            .iter()
            .filter(|(name, len)| axes.contains(&name.as_str()) || *len != 1)
            .collect();
        let layout_names: Vec<&str> = layout.iter().map(|(name, _)| name.as_str()).collect();

        if layout_names != axes {
            return Err(ConverterError::load(
                &self.source,
                format!(
                    "variable {} has dimensions {:?}, expected {:?}",
                    var_name, layout_names, axes
                ),
            ));
        }

        let expected = [self.time.stamps.len(), lat.values.len(), lon.values.len()];
        let actual: Vec<usize> = layout.iter().map(|(_, len)| *len).collect();
        if actual != expected || variable.values.len() != expected.iter().product::<usize>() {
            return Err(ConverterError::load(
                &self.source,
                format!(
                    "variable {} has shape {:?}, expected {:?}",
                    var_name, actual, expected
                ),
            ));
        }

        Ok(ClimateField {
            name: var_name.to_string(),
            times: self.time.stamps.clone(),
            lats: lat.values.clone(),
            lons: lon.values.clone(),
            values: variable.values.clone(),
        })
    }
}

// -- Tests -------------------------------------------------------------------
