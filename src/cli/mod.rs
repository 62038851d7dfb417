//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::{Config, DEFAULT_OUTPUT, DEFAULT_QUANTIZATION, DEFAULT_RESOLUTION},
    error::ConverterError,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Preprocess ERA5 climate data into a TopoJSON grid for Köppen classification
pub struct Cli {
    /// Path to temperature NetCDF file
    #[arg(short, long)]
    pub temp: Option<PathBuf>,

    /// Path to precipitation NetCDF file
    #[arg(short, long)]
    pub precip: Option<PathBuf>,

    /// Output TopoJSON path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Grid resolution in degrees
    #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: f64,

    /// Generate sample data instead of processing real data
    #[arg(long)]
    pub sample: bool,

    /// TopoJSON quantization level
    #[arg(short, long, default_value_t = DEFAULT_QUANTIZATION)]
    pub quantization: u64,
}

impl Cli {
    pub fn config(&self) -> Result<Config, ConverterError> {
        Config::resolve(
            self.temp.clone(),
            self.precip.clone(),
            self.output.clone(),
            self.resolution,
            self.quantization,
            self.sample,
        )
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

// -- Tests -------------------------------------------------------------------
