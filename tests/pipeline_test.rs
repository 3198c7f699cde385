//! Integration tests for thermostrip
//!
//! These tests run the full pipeline from CSV files on disk to exported
//! animations and preview images.

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;
use thermostrip::prelude::*;
use thermostrip::render::geometry::STRIP_BAND;

/// Write a CSV with `rows` as `(time, temperatures)` over `distance`
fn write_csv(dir: &Path, name: &str, distance: &[&str], rows: &[(f64, Vec<f64>)]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    writeln!(file, "time,{}", distance.join(",")).unwrap();
    for (time, values) in rows {
        let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        writeln!(file, "{},{}", time, cells.join(",")).unwrap();
    }
    path
}

fn uniform_rows(times: &[f64], width: usize, value: f64) -> Vec<(f64, Vec<f64>)> {
    times.iter().map(|&t| (t, vec![value; width])).collect()
}

fn session_for(path: &Path, config: PlaybackConfig) -> PlaybackSession {
    let table = SeriesTable::from_path(path).unwrap();
    PlaybackSession::new(FrameSource::from(table), config)
        .unwrap()
        .without_text()
}

/// Full sweep with step 1 over rows 40/50/60: each frame is uniformly its own row's colour
#[test]
fn test_uniform_table_full_sweep() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "uniform.csv",
        &["0mm", "10mm"],
        &[
            (0.0, vec![40.0, 40.0]),
            (1.0, vec![50.0, 50.0]),
            (2.0, vec![60.0, 60.0]),
        ],
    );

    let config = PlaybackConfig::default().with_step(TimeStep::Whole);
    let mut session = session_for(&path, config.clone());
    let animation = session.export(|_| {}).unwrap();
    assert_eq!(animation.len(), 3);

    let (_, cy) = STRIP_BAND.center();
    for (frame, value) in animation.frames().iter().zip([40.0, 50.0, 60.0]) {
        let expected = config.colormap.color_of(value, &config.value_range);
        for x in [STRIP_BAND.x + 5, STRIP_BAND.center().0, STRIP_BAND.right() - 5] {
            assert_eq!(frame.image().get_pixel(x as u32, cy as u32).0, expected);
        }
    }
    let first = animation.frames()[0].image().get_pixel(STRIP_BAND.center().0 as u32, cy as u32);
    let last = animation.frames()[2].image().get_pixel(STRIP_BAND.center().0 as u32, cy as u32);
    assert_ne!(first, last);
}

/// Start time past the end yields no frames and export reports EmptyExport
#[test]
fn test_start_after_end_exports_nothing() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "short.csv",
        &["0mm", "10mm"],
        &uniform_rows(&[0.0, 1.0, 2.0], 2, 45.0),
    );

    let mut session = session_for(&path, PlaybackConfig::default().with_start_time(5.0));
    assert_eq!(session.frames().unwrap().total(), 0);
    assert!(matches!(
        session.export(|_| {}),
        Err(PlaybackError::EmptyExport)
    ));
    assert_eq!(session.state(), SessionState::Idle);
}

/// A single distance column loads but cannot be rendered
#[test]
fn test_single_distance_column_is_degenerate() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "narrow.csv",
        &["5mm"],
        &uniform_rows(&[0.0, 1.0], 1, 42.0),
    );

    let session = session_for(&path, PlaybackConfig::default());
    let err = session.still(0.0).unwrap_err();
    assert!(matches!(
        err,
        PlaybackError::RenderError(RenderError::SeriesError(SeriesError::DegenerateSeries(_)))
    ));
}

/// Export with a 200 ms pacing delay writes an infinitely looping 3-frame GIF
#[test]
fn test_gif_export_on_disk() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "ramp.csv",
        &["0mm", "5mm", "10mm"],
        &[
            (0.0, vec![36.0, 40.0, 44.0]),
            (1.0, vec![40.0, 45.0, 50.0]),
            (2.0, vec![44.0, 50.0, 58.0]),
        ],
    );

    let config = PlaybackConfig::default()
        .with_step(TimeStep::Whole)
        .with_pacing_delay(Duration::from_millis(200));
    let mut session = session_for(&path, config);
    let gif = dir.path().join("ramp.gif");
    session.export(|_| {}).unwrap().save(&gif).unwrap();

    let bytes = fs::read(&gif).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    let netscape = bytes
        .windows(15)
        .any(|w| &w[..11] == b"NETSCAPE2.0" && w[11..] == [3, 1, 0, 0]);
    assert!(netscape, "missing infinite loop extension");

    let decoder = GifDecoder::new(BufReader::new(File::open(&gif).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    assert!(frames
        .iter()
        .all(|f| Duration::from(f.delay()) == Duration::from_millis(200)));
}

/// A stop raised by the display after the first frame ends playback after one frame
#[test]
fn test_stop_request_after_first_frame() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "long.csv",
        &["0mm", "10mm"],
        &uniform_rows(&[0.0, 0.5, 1.0, 1.5, 2.0], 2, 47.0),
    );

    let mut session = session_for(&path, PlaybackConfig::default().with_step(TimeStep::Half));
    let stop = session.stop_handle();
    let target = move |_: &Frame| -> Result<(), PlaybackError> {
        stop.raise();
        Ok(())
    };
    let mut sink = LiveSink::new(target, Duration::ZERO);

    let summary = session.play(&mut sink).unwrap();
    assert_eq!(summary.frames_delivered, 1);
    assert!(summary.stopped);
    assert_eq!(sink.shown(), 1);
    assert_eq!(session.state(), SessionState::Idle);
}

/// A stop raised from another thread is honoured between frames
#[test]
fn test_stop_from_another_thread() {
    let dir = tempdir().unwrap();
    let times: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
    let path = write_csv(
        dir.path(),
        "threaded.csv",
        &["0mm", "10mm"],
        &uniform_rows(&times, 2, 40.0),
    );

    let mut session = session_for(&path, PlaybackConfig::default());
    let stop = session.stop_handle();
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    let stopper = std::thread::spawn(move || {
        rx.recv().unwrap();
        stop.raise();
    });

    let mut signalled = false;
    let target = move |_: &Frame| -> Result<(), PlaybackError> {
        if !signalled {
            tx.send(()).unwrap();
            signalled = true;
        }
        Ok(())
    };
    let mut sink = LiveSink::new(target, Duration::from_millis(50));
    let summary = session.play(&mut sink).unwrap();
    stopper.join().unwrap();

    assert!(summary.stopped);
    assert!(summary.frames_delivered >= 1 && summary.frames_delivered < 50);
}

/// The live preview file always holds the most recent frame
#[test]
fn test_live_preview_png() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "preview.csv",
        &["0mm", "10mm"],
        &[(0.0, vec![35.0, 35.0]), (1.0, vec![60.0, 60.0])],
    );
    let preview = dir.path().join("live.png");

    let mut session = session_for(&path, PlaybackConfig::default().with_step(TimeStep::Whole));
    let mut sink = LiveSink::new(PngFileTarget::new(&preview), Duration::ZERO);
    let summary = session.play(&mut sink).unwrap();
    assert_eq!(summary.frames_delivered, 2);

    let shown = image::open(&preview).unwrap().to_rgb8();
    let (cx, cy) = STRIP_BAND.center();
    assert_eq!(
        shown.get_pixel(cx as u32, cy as u32).0,
        Colormap::Plasma.srgb(1.0)
    );
    assert_eq!(Some(&shown), sink.current().map(Frame::image));
}

/// Malformed files surface as typed errors
#[test]
fn test_malformed_files() {
    let dir = tempdir().unwrap();
    let bad_header = dir.path().join("bad.csv");
    fs::write(&bad_header, "seconds,0mm\n0,40\n").unwrap();
    assert!(matches!(
        SeriesTable::from_path(&bad_header),
        Err(SeriesError::MalformedInput(_))
    ));

    assert!(matches!(
        SeriesTable::from_path(dir.path().join("missing.csv")),
        Err(SeriesError::IoError(_))
    ));
}
