//! NetCDF reader for ERA5-style monthly grids.
//!
//! Values are unpacked the way CF tooling does it: `_FillValue` and
//! `missing_value` become missing, then `scale_factor` and `add_offset` are
//! applied. Variables named by another variable's `coordinates` or `bounds`
//! attribute are treated as coordinates rather than data.

use std::path::Path;

use crate::error::ConverterError;

use super::{GridReader, GriddedDataset};

#[derive(Debug, Default, Clone, Copy)]
pub struct NetCdfReader;

#[cfg(feature = "netcdf")]
impl GridReader for NetCdfReader {
    fn open(&self, path: &Path) -> Result<GriddedDataset, ConverterError> {
        imp::read_dataset(path).map_err(|e| ConverterError::load(path, format!("{:#}", e)))
    }
}

#[cfg(not(feature = "netcdf"))]
impl GridReader for NetCdfReader {
    fn open(&self, path: &Path) -> Result<GriddedDataset, ConverterError> {
        Err(ConverterError::load(
            path,
            "built without NetCDF support (enable the `netcdf` feature)",
        ))
    }
}

#[cfg(feature = "netcdf")]
mod imp {
    use std::{collections::HashSet, path::Path};

    use anyhow::{anyhow, Result};
    use netcdf::{AttributeValue, Variable};

    use crate::reading::{
        dataset::{resolve_name, TIME_NAMES},
        time_axis::decode_times,
        Coordinate, DataVariable, GriddedDataset, TimeAxis,
    };

    pub fn read_dataset(path: &Path) -> Result<GriddedDataset> {
        let file = netcdf::open(path)?;

        let dimension_names: Vec<String> = file.dimensions().map(|d| d.name()).collect();
        let variables: Vec<Variable> = file.variables().collect();

        let mut auxiliary = HashSet::new();
        for var in &variables {
            for attribute in ["coordinates", "bounds"] {
                if let Some(names) = string_attribute(var, attribute) {
                    auxiliary.extend(names.split_whitespace().map(str::to_string));
                }
            }
        }

        let mut axes = Vec::new();
        let mut data_vars = Vec::new();

        for var in &variables {
            let name = var.name();
            let is_axis = dimension_names.contains(&name) && var.dimensions().len() == 1;

            if is_axis {
                axes.push(Coordinate {
                    name,
                    values: var.get_values::<f64, _>(..)?,
                });
            } else if !auxiliary.contains(&name) && !var.dimensions().is_empty() {
                data_vars.push(read_data_variable(var)?);
            }
        }

        let axis_names: Vec<String> = axes.iter().map(|c| c.name.clone()).collect();
        let time_name = resolve_name(&TIME_NAMES, &axis_names, false)?.to_string();
        let time_var = file
            .variable(&time_name)
            .ok_or_else(|| anyhow!("time variable {} vanished", time_name))?;
        let units = string_attribute(&time_var, "units")
            .ok_or_else(|| anyhow!("time variable {} has no units", time_name))?;
        let calendar = string_attribute(&time_var, "calendar");

        let mut coordinates = Vec::with_capacity(axes.len());
        let mut time = None;
        for axis in axes {
            if axis.name == time_name {
                time = Some(TimeAxis {
                    stamps: decode_times(&axis.values, &units, calendar.as_deref())?,
                    name: axis.name,
                });
            } else {
                coordinates.push(axis);
            }
        }

        Ok(GriddedDataset {
            source: path.to_path_buf(),
            coordinates,
            time: time.ok_or_else(|| anyhow!("no time axis"))?,
            data_vars,
        })
    }

    fn read_data_variable(var: &Variable) -> Result<DataVariable> {
        let name = var.name();
        let dims = var
            .dimensions()
            .iter()
            .map(|d| (d.name(), d.len()))
            .collect();

        let fill_value = numeric_attribute(var, "_FillValue");
        let missing_value = numeric_attribute(var, "missing_value");
        let scale = numeric_attribute(var, "scale_factor").unwrap_or(1.0);
        let offset = numeric_attribute(var, "add_offset").unwrap_or(0.0);

        let raw: Vec<f64> = var
            .get_values::<f64, _>(..)
            .map_err(|e| anyhow!("reading {}: {}", name, e))?;

        let values = raw
            .into_iter()
            .map(|v| {
                if Some(v) == fill_value || Some(v) == missing_value {
                    return None;
                }
                let unpacked = v * scale + offset;
                unpacked.is_finite().then_some(unpacked)
            })
            .collect();

        Ok(DataVariable { name, dims, values })
    }

    fn numeric_attribute(var: &Variable, name: &str) -> Option<f64> {
        match var.attribute_value(name)?.ok()? {
            AttributeValue::Double(v) => Some(v),
            AttributeValue::Float(v) => Some(v as f64),
            AttributeValue::Short(v) => Some(v as f64),
            AttributeValue::Int(v) => Some(v as f64),
            AttributeValue::Longlong(v) => Some(v as f64),
            AttributeValue::Doubles(v) => v.first().copied(),
            AttributeValue::Floats(v) => v.first().map(|&v| v as f64),
            AttributeValue::Shorts(v) => v.first().map(|&v| v as f64),
            AttributeValue::Ints(v) => v.first().map(|&v| v as f64),
            _ => None,
        }
    }

    fn string_attribute(var: &Variable, name: &str) -> Option<String> {
        match var.attribute_value(name)?.ok()? {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

// -- Tests -------------------------------------------------------------------
