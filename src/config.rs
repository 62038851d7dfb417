//! Run configuration resolved from the command line.

use std::path::PathBuf;

use crate::error::ConverterError;

pub const DEFAULT_OUTPUT: &str = "public/data/climate.topojson";
pub const DEFAULT_RESOLUTION: f64 = 0.25;
pub const DEFAULT_QUANTIZATION: u64 = 1_000_000;
pub const SAMPLE_QUANTIZATION: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Convert { temp: PathBuf, precip: PathBuf },
    Sample,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: Mode,
    pub output: PathBuf,
    pub resolution: f64,
    pub quantization: u64,
}

impl Config {
    /// Validates the raw arguments for the chosen mode. Sample mode ignores
    /// the input paths, the resolution and the quantization, and always uses
    /// the coarse sample quantization.
    pub fn resolve(
        temp: Option<PathBuf>,
        precip: Option<PathBuf>,
        output: PathBuf,
        resolution: f64,
        quantization: u64,
        sample: bool,
    ) -> Result<Self, ConverterError> {
        if sample {
            return Ok(Config {
                mode: Mode::Sample,
                output,
                resolution,
                quantization: SAMPLE_QUANTIZATION,
            });
        }

        let (Some(temp), Some(precip)) = (temp, precip) else {
            return Err(ConverterError::Config(
                "--temp and --precip required unless using --sample".to_string(),
            ));
        };

        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ConverterError::Config(format!(
                "--resolution must be a positive number of degrees, got {}",
                resolution
            )));
        }

        if quantization < 2 {
            return Err(ConverterError::Config(format!(
                "--quantization must be at least 2, got {}",
                quantization
            )));
        }

        let mode = Mode::Convert { temp, precip };

        Ok(Config {
            mode,
            output,
            resolution,
            quantization,
        })
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    fn output() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT)
    }

    #[test]
    fn should_require_both_inputs() {
        let err = Config::resolve(Some("t.nc".into()), None, output(), 0.25, 1_000_000, false).unwrap_err();
        assert!(matches!(err, ConverterError::Config(_)));

        let err = Config::resolve(None, None, output(), 0.25, 1_000_000, false).unwrap_err();
        assert_eq!(err.to_string(), "--temp and --precip required unless using --sample");
    }

    #[test]
    fn should_ignore_inputs_in_sample_mode() {
        let config = Config::resolve(Some("t.nc".into()), None, output(), 0.25, 1_000_000, true).unwrap();

        assert_eq!(config.mode, Mode::Sample);
        assert_eq!(config.quantization, SAMPLE_QUANTIZATION);
    }

    #[test]
    fn should_keep_requested_quantization() {
        let config = Config::resolve(Some("t.nc".into()), Some("p.nc".into()), output(), 0.5, 5_000, false)
            .unwrap();

        assert_eq!(config.quantization, 5_000);
        assert_eq!(config.resolution, 0.5);
        assert!(matches!(config.mode, Mode::Convert { .. }));
    }

    #[test]
    fn should_reject_bad_numbers() {
        let inputs = || (Some(PathBuf::from("t.nc")), Some(PathBuf::from("p.nc")));

        let (t, p) = inputs();
        assert!(Config::resolve(t, p, output(), 0.0, 1_000_000, false).is_err());
        let (t, p) = inputs();
        assert!(Config::resolve(t, p, output(), f64::NAN, 1_000_000, false).is_err());
        let (t, p) = inputs();
        assert!(Config::resolve(t, p, output(), 0.25, 1, false).is_err());
    }

    #[test]
    fn should_ignore_numbers_in_sample_mode() {
        let config = Config::resolve(None, None, output(), 0.0, 1, true).unwrap();

        assert_eq!(config.mode, Mode::Sample);
        assert_eq!(config.quantization, SAMPLE_QUANTIZATION);
    }
}
