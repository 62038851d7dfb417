//! Decoding of CF-style `"<unit> since <reference>"` time coordinates.

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

const SUPPORTED_CALENDARS: [&str; 3] = ["standard", "gregorian", "proleptic_gregorian"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUnits {
    millis_per_unit: f64,
    reference: NaiveDateTime,
}

impl TimeUnits {
    pub fn parse(units: &str) -> Result<Self> {
        let (unit, reference) = units
            .split_once(" since ")
            .ok_or_else(|| anyhow!("time units `{}` are not of the form `<unit> since <date>`", units))?;

        let millis_per_unit = match unit.trim().to_lowercase().as_str() {
            "milliseconds" | "millisecond" | "ms" => 1.0,
            "seconds" | "second" | "secs" | "sec" | "s" => 1_000.0,
            "minutes" | "minute" | "mins" | "min" => 60_000.0,
            "hours" | "hour" | "hrs" | "hr" | "h" => 3_600_000.0,
            "days" | "day" | "d" => 86_400_000.0,
            other => return Err(anyhow!("unsupported time unit `{}`", other)),
        };

        Ok(TimeUnits {
            millis_per_unit,
            reference: parse_reference(reference)?,
        })
    }

    pub fn decode(&self, offset: f64) -> Result<NaiveDateTime> {
        if !offset.is_finite() {
            return Err(anyhow!("time value {} is not finite", offset));
        }

        let millis = (offset * self.millis_per_unit).round() as i64;

        Duration::try_milliseconds(millis)
            .and_then(|delta| self.reference.checked_add_signed(delta))
            .ok_or_else(|| anyhow!("time value {} is out of range", offset))
    }
}

/// Decodes raw time coordinate values into timestamps.
pub fn decode_times(values: &[f64], units: &str, calendar: Option<&str>) -> Result<Vec<NaiveDateTime>> {
    if let Some(calendar) = calendar {
        let calendar = calendar.trim().to_lowercase();
        if !SUPPORTED_CALENDARS.contains(&calendar.as_str()) {
            return Err(anyhow!("unsupported calendar `{}`", calendar));
        }
    }

    let units = TimeUnits::parse(units)?;
    values.iter().map(|&v| units.decode(v)).collect()
}

fn parse_reference(reference: &str) -> Result<NaiveDateTime> {
    let cleaned = reference
        .trim()
        .trim_end_matches("UTC")
        .trim_end_matches('Z')
        .trim()
        .replace('T', " ");

    let datetime_formats = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow!("cannot parse reference date `{}`", reference.trim()))
}

// -- Tests -------------------------------------------------------------------
