//! Gridded input datasets and the readers that produce them.

pub mod dataset;
pub mod nc_file;
pub mod time_axis;

use std::path::Path;

use crate::error::ConverterError;

pub use dataset::{ClimateField, Coordinate, DataVariable, GriddedDataset, NameNotFound, TimeAxis};
pub use nc_file::NetCdfReader;

/// Opens a gridded time-series file as an in-memory dataset.
pub trait GridReader {
    fn open(&self, path: &Path) -> Result<GriddedDataset, ConverterError>;
}
