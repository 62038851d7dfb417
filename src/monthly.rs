//! Reduction of a time series grid to twelve calendar-month means.

use chrono::Datelike;

use crate::reading::ClimateField;

pub const MONTHS: usize = 12;

/// Mean per (calendar month, lat, lon). Month index 0 is January.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub lat_count: usize,
    pub lon_count: usize,
    values: Vec<Option<f64>>,
    /// Calendar months (1-12) with no time samples at all.
    pub empty_months: Vec<u32>,
}

impl MonthlyAggregate {
    /// Builds an aggregate from month-major values, shape (12, lat, lon).
    #[cfg(test)]
    pub(crate) fn from_values(lat_count: usize, lon_count: usize, values: Vec<Option<f64>>) -> Option<Self> {
        (values.len() == MONTHS * lat_count * lon_count).then(|| MonthlyAggregate {
            lat_count,
            lon_count,
            values,
            empty_months: vec![],
        })
    }

    pub fn get(&self, month_index: usize, i: usize, j: usize) -> Option<f64> {
        if month_index >= MONTHS || i >= self.lat_count || j >= self.lon_count {
            return None;
        }
        self.values[(month_index * self.lat_count + i) * self.lon_count + j]
    }

    /// All twelve monthly values at a grid point, or `None` if any is missing.
    pub fn series(&self, i: usize, j: usize) -> Option<[f64; MONTHS]> {
        let mut series = [0.0; MONTHS];
        for (month_index, slot) in series.iter_mut().enumerate() {
            *slot = self.get(month_index, i, j)?;
        }
        Some(series)
    }
}

/// Groups every time sample by calendar month and averages per grid point.
/// Missing samples are skipped; a month with no samples stays missing.
pub fn monthly_means(field: &ClimateField) -> MonthlyAggregate {
    let lat_count = field.lats.len();
    let lon_count = field.lons.len();
    let plane = lat_count * lon_count;

    let mut sums = vec![0.0; MONTHS * plane];
    let mut counts = vec![0u32; MONTHS * plane];
    let mut samples_per_month = [0usize; MONTHS];

    for (t, stamp) in field.times.iter().enumerate() {
        let month_index = stamp.month0() as usize;
        samples_per_month[month_index] += 1;

        let source = &field.values[t * plane..(t + 1) * plane];
        let target = month_index * plane;

        for (k, value) in source.iter().enumerate() {
            if let Some(v) = value {
                sums[target + k] += v;
                counts[target + k] += 1;
            }
        }
    }

    let values = sums
        .into_iter()
        .zip(counts)
        .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
        .collect();

    let empty_months = samples_per_month
        .iter()
        .enumerate()
        .filter(|(_, n)| **n == 0)
        .map(|(m, _)| m as u32 + 1)
        .collect();

    MonthlyAggregate {
        lat_count,
        lon_count,
        values,
        empty_months,
    }
}

// -- Tests -------------------------------------------------------------------
