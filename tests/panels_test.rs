//! Integration tests for the four-panel cross layout

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;
use thermostrip::prelude::*;
use thermostrip::render::geometry::{CENTER_CELL, CROSS_SIZE};

fn write_panel(dir: &Path, name: &str, times: &[f64], value: f64) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    writeln!(file, "time,0mm,20mm,40mm").unwrap();
    for t in times {
        writeln!(file, "{},{},{},{}", t, value, value + 0.5, value + 1.0).unwrap();
    }
    path
}

fn panel_paths(dir: &Path, times: &[f64]) -> Vec<PathBuf> {
    vec![
        write_panel(dir, "oven_left.csv", times, 44.0),
        write_panel(dir, "oven_bottom.csv", times, 42.0),
        write_panel(dir, "oven_top.csv", times, 40.0),
        write_panel(dir, "oven_right.csv", times, 46.0),
    ]
}

#[test]
fn test_cross_export_from_named_files() {
    let dir = tempdir().unwrap();
    let paths = panel_paths(dir.path(), &[0.0, 0.5, 1.0, 1.5]);
    let panels = PanelSet::from_paths(&paths).unwrap();
    assert_eq!(panels.get(Side::Top).name(), Some("oven_top"));

    let config = PlaybackConfig::for_variant(Variant::CrossWithProfiles)
        .with_step(TimeStep::Half)
        .with_pacing_delay(Duration::from_millis(100));
    let mut session = PlaybackSession::new(FrameSource::from(panels), config)
        .unwrap()
        .without_text();

    let mut progress = Vec::new();
    let animation = session.export(|p| progress.push(p.completed)).unwrap();
    assert_eq!(animation.len(), 4);
    assert_eq!(progress, vec![1, 2, 3, 4]);
    assert!(animation
        .frames()
        .iter()
        .all(|f| f.dimensions() == CROSS_SIZE));

    let gif = dir.path().join("oven.gif");
    animation.save(&gif).unwrap();
    assert!(std::fs::metadata(&gif).unwrap().len() > 0);
}

#[test]
fn test_mismatched_panel_axes_rejected() {
    let dir = tempdir().unwrap();
    let mut paths = panel_paths(dir.path(), &[0.0, 1.0, 2.0]);
    paths[3] = write_panel(dir.path(), "oven_right.csv", &[0.0, 1.0, 2.5], 46.0);
    assert!(matches!(
        PanelSet::from_paths(&paths),
        Err(SeriesError::MismatchedAxes(_))
    ));
}

#[test]
fn test_still_frame_centre_is_background_without_text() {
    let dir = tempdir().unwrap();
    let panels = PanelSet::from_paths(&panel_paths(dir.path(), &[0.0, 1.0])).unwrap();
    let session = PlaybackSession::new(
        FrameSource::from(panels),
        PlaybackConfig::for_variant(Variant::Cross),
    )
    .unwrap()
    .without_text();

    let frame = session.still(0.9).unwrap();
    assert_eq!(frame.index(), 1);
    assert_eq!(frame.label(), "Time = 1.0 s");
    let (cx, cy) = CENTER_CELL.center();
    assert_eq!(frame.image().get_pixel(cx as u32, cy as u32).0, [255, 255, 255]);
}

#[test]
fn test_strip_variant_rejects_panels() {
    let dir = tempdir().unwrap();
    let panels = PanelSet::from_paths(&panel_paths(dir.path(), &[0.0])).unwrap();
    assert!(matches!(
        PlaybackSession::new(FrameSource::from(panels), PlaybackConfig::default()),
        Err(PlaybackError::VariantMismatch(_))
    ));
}
