use anyhow::{bail, Context, Result};
use log::info;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use thermostrip::series::{SeriesTable, Side};

/// Sampling interval of the synthetic recordings, in seconds
const SAMPLE_INTERVAL: f64 = 0.1;

/// Length of the synthetic specimen, in millimetres
const LENGTH_MM: f64 = 100.0;

/// Generate synthetic measurement files
pub fn run(output: PathBuf, panels: bool, duration: f64, points: usize) -> Result<()> {
    if duration.partial_cmp(&0.0) != Some(Ordering::Greater) {
        bail!("Duration must be positive, got {}", duration);
    }
    if points < 2 {
        bail!("At least 2 distance points are needed, got {}", points);
    }
    std::fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    if panels {
        for (i, side) in Side::ALL.iter().enumerate() {
            let phase = i as f64 * 0.25;
            let table = heat_pulse(duration, points, 45.0, 4.0, phase)?;
            write(&table, &output.join(format!("demo_{}.csv", side)))?;
        }
        println!(
            "Wrote demo_top/bottom/left/right.csv to {}; try:\n  thermostrip export {}",
            output.display(),
            Side::ALL
                .iter()
                .map(|s| output.join(format!("demo_{}.csv", s)).display().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
    } else {
        let table = heat_pulse(duration, points, 47.5, 11.0, 0.0)?;
        let path = output.join("demo_strip.csv");
        write(&table, &path)?;
        println!(
            "Wrote {}; try:\n  thermostrip export {}",
            path.display(),
            path.display()
        );
    }
    Ok(())
}

/// A warm pulse travelling along the specimen and back.
///
/// `base` is the mean temperature, `swing` the pulse height above and below it,
/// `phase` a fraction of a full period.
fn heat_pulse(duration: f64, points: usize, base: f64, swing: f64, phase: f64) -> Result<SeriesTable> {
    let steps = (duration / SAMPLE_INTERVAL).round() as usize + 1;
    let times: Vec<f64> = (0..steps)
        .map(|i| (i as f64 * SAMPLE_INTERVAL * 1e6).round() / 1e6)
        .collect();
    let distance: Vec<f64> = (0..points)
        .map(|j| (j as f64 * LENGTH_MM / (points - 1) as f64 * 100.0).round() / 100.0)
        .collect();

    let width = LENGTH_MM / 6.0;
    let rows = times
        .iter()
        .map(|&t| {
            let cycle = (t / duration + phase).fract();
            // Triangle wave: out to the far end and back
            let centre = LENGTH_MM * (1.0 - (2.0 * cycle - 1.0).abs());
            distance
                .iter()
                .map(|&d| {
                    let pulse = (-((d - centre) / width).powi(2)).exp();
                    let value = base - swing + 2.0 * swing * pulse;
                    (value * 100.0).round() / 100.0
                })
                .collect()
        })
        .collect();

    SeriesTable::new(times, distance, rows).context("Failed to build demo table")
}

fn write(table: &SeriesTable, path: &Path) -> Result<()> {
    table
        .save_csv(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} ({} time points)", path.display(), table.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_duration() {
        let dir = tempfile::tempdir().unwrap();
        for duration in [0.0, -1.0, f64::NAN] {
            assert!(run(dir.path().to_path_buf(), false, duration, 5).is_err());
        }
    }

    #[test]
    fn test_heat_pulse_shape() {
        let table = heat_pulse(2.0, 12, 45.0, 4.0, 0.0).unwrap();
        assert_eq!(table.len(), 21);
        assert_eq!(table.distance().len(), 12);
        assert_eq!(table.distance_span(), (0.0, 100.0));
        let (lo, hi) = table.temperature_span();
        assert!(lo >= 41.0 && hi <= 49.0);
    }

    #[test]
    fn test_demo_files_load_as_panels() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path().to_path_buf(), true, 1.0, 5).unwrap();
        let paths: Vec<PathBuf> = Side::ALL
            .iter()
            .map(|s| dir.path().join(format!("demo_{}.csv", s)))
            .collect();
        let panels = thermostrip::series::PanelSet::from_paths(&paths).unwrap();
        assert_eq!(panels.times().len(), 11);
    }
}
