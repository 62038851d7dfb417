//! Synthetic climate cells for demos, from a latitude-based model with
//! random precipitation noise.

use std::f64::consts::PI;

use rand::Rng;

use crate::{cells::GridCell, monthly::MONTHS};

pub const SAMPLE_RESOLUTION: f64 = 5.0;

/// Cell centres -60..65 by 5 degrees of latitude.
pub fn sample_latitudes() -> Vec<f64> {
    (-60..70).step_by(5).map(f64::from).collect()
}

/// Cell centres -180..175 by 5 degrees of longitude.
pub fn sample_longitudes() -> Vec<f64> {
    (-180..180).step_by(5).map(f64::from).collect()
}

/// Warmest in July north of the equator, in January south of it.
pub fn sample_temperatures(lat: f64) -> [f64; MONTHS] {
    let base = 30.0 - lat.abs() * 0.6;
    let amplitude = (lat.abs() * 0.3).min(15.0);
    let peak = if lat >= 0.0 { 6.0 } else { 0.0 };

    std::array::from_fn(|m| base + amplitude * ((m as f64 - peak) * PI / 6.0).cos())
}

/// Wet tropics, dry subtropics, moderate mid-latitudes, dry poles.
pub fn base_precipitation(lat: f64) -> f64 {
    match lat.abs() {
        a if a < 15.0 => 150.0,
        a if a < 30.0 => 30.0,
        a if a < 50.0 => 70.0,
        _ => 40.0,
    }
}

pub fn sample_precipitation<R: Rng>(lat: f64, rng: &mut R) -> [f64; MONTHS] {
    let base = base_precipitation(lat);
    let spread = base * 0.5;

    std::array::from_fn(|_| (base + rng.gen_range(-spread..=spread)).max(0.0))
}

/// Every sample cell in latitude-major order.
pub fn generate_sample_cells<R: Rng>(rng: &mut R) -> Vec<GridCell> {
    let lons = sample_longitudes();
    let mut cells = Vec::new();

    for lat in sample_latitudes() {
        let temperatures = sample_temperatures(lat);
        for &lon in &lons {
            let precipitation = sample_precipitation(lat, rng);
            cells.push(GridCell::new(lat, lon, SAMPLE_RESOLUTION, temperatures, precipitation));
        }
    }

    cells
}

// -- Tests -------------------------------------------------------------------
