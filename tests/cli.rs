use std::{path::Path, process::Command};

use era5_topo::topology::Topology;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_era5-topo");

fn run_in(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(BIN).args(args).current_dir(dir).output().unwrap()
}

#[test]
fn should_write_sample_to_default_output() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &["--sample"]);
    assert!(output.status.success());

    let artifact = dir.path().join("public/data/climate.topojson");
    assert!(std::fs::metadata(&artifact).unwrap().len() > 0);

    let topology = Topology::from_path(&artifact).unwrap();
    let cells = topology.decode_cells().unwrap();
    assert_eq!(cells.len(), 26 * 72);
    assert_eq!(topology.bbox, [-182.5, -62.5, 177.5, 67.5]);
}

#[test]
fn should_fail_without_inputs() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--temp and --precip required unless using --sample"));
}

#[test]
fn should_fail_on_missing_temperature_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tp.nc"), b"").unwrap();

    let output = run_in(dir.path(), &["-t", "nope.nc", "-p", "tp.nc", "-o", "out.topojson"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Temperature file not found"));
    assert!(!dir.path().join("out.topojson").exists());
}

#[test]
fn should_fail_on_unreadable_input() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("t2m.nc"), b"not a grid").unwrap();
    std::fs::write(dir.path().join("tp.nc"), b"not a grid").unwrap();

    let output = run_in(dir.path(), &["-t", "t2m.nc", "-p", "tp.nc", "-o", "out.topojson"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
    assert!(!dir.path().join("out.topojson").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loading temperature data from t2m.nc"));
}

#[test]
fn should_leave_existing_output_untouched_on_failure() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tp.nc"), b"").unwrap();
    let artifact = dir.path().join("out.topojson");
    std::fs::write(&artifact, b"previous artifact").unwrap();

    let output = run_in(dir.path(), &["-t", "nope.nc", "-p", "tp.nc", "-o", "out.topojson"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read(&artifact).unwrap(), b"previous artifact");
}

#[test]
fn should_run_sample_with_values_it_ignores() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &["--sample", "-q", "1", "-r", "0", "-o", "out.topojson"]);

    assert!(output.status.success());
    assert!(dir.path().join("out.topojson").exists());
}
