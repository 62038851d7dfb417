//! Grid cell records: one rectangular polygon per complete grid point.

use std::collections::BTreeMap;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::{
    error::ConverterError,
    monthly::{MonthlyAggregate, MONTHS},
};

pub const KELVIN_OFFSET: f64 = 273.15;
pub const MM_PER_METRE: f64 = 1000.0;

/// Rounds to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Flat property map of a cell: `lat`, `lon`, `t1..t12` (°C), `p1..p12` (mm).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct CellProperties {
    pub lat: f64,
    pub lon: f64,
    pub temperature: [f64; MONTHS],
    pub precipitation: [f64; MONTHS],
}

impl Serialize for CellProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + 2 * MONTHS))?;
        map.serialize_entry("lat", &self.lat)?;
        map.serialize_entry("lon", &self.lon)?;
        for (m, t) in self.temperature.iter().enumerate() {
            map.serialize_entry(&format!("t{}", m + 1), t)?;
        }
        for (m, p) in self.precipitation.iter().enumerate() {
            map.serialize_entry(&format!("p{}", m + 1), p)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, f64>> for CellProperties {
    type Error = String;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let field = |key: String| map.get(&key).copied().ok_or_else(|| format!("missing property {}", key));

        let mut temperature = [0.0; MONTHS];
        let mut precipitation = [0.0; MONTHS];
        for m in 0..MONTHS {
            temperature[m] = field(format!("t{}", m + 1))?;
            precipitation[m] = field(format!("p{}", m + 1))?;
        }

        Ok(CellProperties {
            lat: field("lat".to_string())?,
            lon: field("lon".to_string())?,
            temperature,
            precipitation,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub properties: CellProperties,
    /// Closed counter-clockwise ring, first vertex repeated last.
    pub ring: Vec<[f64; 2]>,
}

impl GridCell {
    /// Builds a cell of `resolution` degrees centred on (lat, lon) from
    /// already converted values; every value is rounded to one decimal.
    pub fn new(
        lat: f64,
        lon: f64,
        resolution: f64,
        temperature_c: [f64; MONTHS],
        precipitation_mm: [f64; MONTHS],
    ) -> Self {
        GridCell {
            properties: CellProperties {
                lat,
                lon,
                temperature: temperature_c.map(round1),
                precipitation: precipitation_mm.map(round1),
            },
            ring: cell_ring(lat, lon, resolution),
        }
    }

    /// [min_lon, min_lat, max_lon, max_lat]
    pub fn bbox(&self) -> [f64; 4] {
        self.ring.iter().fold(
            [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
            |[x0, y0, x1, y1], [x, y]| [x0.min(*x), y0.min(*y), x1.max(*x), y1.max(*y)],
        )
    }
}

/// Axis-aligned rectangle around the centre, counter-clockwise from the
/// south-east corner.
fn cell_ring(lat: f64, lon: f64, resolution: f64) -> Vec<[f64; 2]> {
    let half = resolution / 2.0;
    let (x0, y0, x1, y1) = (lon - half, lat - half, lon + half, lat + half);

    vec![[x1, y0], [x1, y1], [x0, y1], [x0, y0], [x1, y0]]
}

/// Emits a cell for every (lat, lon) in latitude-major order whose 24
/// monthly values are all present. Temperature is converted from Kelvin and
/// precipitation from metres.
pub fn build_cells(
    lats: &[f64],
    lons: &[f64],
    temperature: &MonthlyAggregate,
    precipitation: &MonthlyAggregate,
    resolution: f64,
) -> Result<Vec<GridCell>, ConverterError> {
    for (name, agg) in [("temperature", temperature), ("precipitation", precipitation)] {
        if agg.lat_count != lats.len() || agg.lon_count != lons.len() {
            return Err(ConverterError::GridMismatch(format!(
                "{} aggregate is {}x{}, grid is {}x{}",
                name,
                agg.lat_count,
                agg.lon_count,
                lats.len(),
                lons.len()
            )));
        }
    }

    let mut cells = Vec::new();

    for (i, &lat) in lats.iter().enumerate() {
        for (j, &lon) in lons.iter().enumerate() {
            let (Some(kelvin), Some(metres)) = (temperature.series(i, j), precipitation.series(i, j)) else {
                continue;
            };

            cells.push(GridCell::new(
                lat,
                lon,
                resolution,
                kelvin.map(|k| k - KELVIN_OFFSET),
                metres.map(|m| m * MM_PER_METRE),
            ));
        }
    }

    Ok(cells)
}

// -- Tests -------------------------------------------------------------------
