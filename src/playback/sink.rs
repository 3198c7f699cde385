//! Frame consumers: live display with pacing, and export buffering.

use log::debug;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

use super::{AnimationExport, PlaybackError};
use crate::render::Frame;

/// Consumes rendered frames, each exactly once
pub trait FrameSink {
    /// Take ownership of the next frame
    fn accept(&mut self, frame: Frame) -> Result<(), PlaybackError>;
}

/// Somewhere a live frame can be shown
pub trait DisplayTarget {
    /// Show `frame`, replacing whatever was shown before
    fn show(&mut self, frame: &Frame) -> Result<(), PlaybackError>;
}

impl<F> DisplayTarget for F
where
    F: FnMut(&Frame) -> Result<(), PlaybackError>,
{
    fn show(&mut self, frame: &Frame) -> Result<(), PlaybackError> {
        self(frame)
    }
}

/// Keeps one PNG file up to date with the latest frame.
///
/// Each frame is written to a temporary file in the same directory and then
/// renamed over the preview, so viewers never observe a half-written image.
#[derive(Debug, Clone)]
pub struct PngFileTarget {
    path: PathBuf,
}

impl PngFileTarget {
    /// Preview written to `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Preview location
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplayTarget for PngFileTarget {
    fn show(&mut self, frame: &Frame) -> Result<(), PlaybackError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        frame.write_png(tmp.as_file_mut())?;
        tmp.persist(&self.path).map_err(|e| PlaybackError::IoError(e.error))?;
        Ok(())
    }
}

/// Shows frames on a [`DisplayTarget`] and waits `delay` after each one
pub struct LiveSink<T: DisplayTarget> {
    target: T,
    delay: Duration,
    current: Option<Frame>,
    shown: usize,
}

impl<T: DisplayTarget> LiveSink<T> {
    /// Live sink pacing frames by `delay`
    pub fn new(target: T, delay: Duration) -> Self {
        Self {
            target,
            delay,
            current: None,
            shown: 0,
        }
    }

    /// Frame on display right now
    pub fn current(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    /// Number of frames shown so far
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Pause after each frame
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Give back the display target
    pub fn into_target(self) -> T {
        self.target
    }
}

impl<T: DisplayTarget> FrameSink for LiveSink<T> {
    fn accept(&mut self, frame: Frame) -> Result<(), PlaybackError> {
        self.target.show(&frame)?;
        debug!("Showing {}", frame.label());
        // The previous frame is released here
        self.current = Some(frame);
        self.shown += 1;
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(())
    }
}

/// Buffers every frame of an export run
#[derive(Debug)]
pub struct ExportSink {
    frames: Vec<Frame>,
    frame_duration: Duration,
}

impl ExportSink {
    /// Export sink whose animation shows each frame for `frame_duration`
    pub fn new(frame_duration: Duration) -> Self {
        Self {
            frames: Vec::new(),
            frame_duration,
        }
    }

    /// Pre-size the buffer for `expected` frames
    pub fn with_capacity(frame_duration: Duration, expected: usize) -> Self {
        Self {
            frames: Vec::with_capacity(expected),
            frame_duration,
        }
    }

    /// Number of frames gathered
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True until the first frame arrives
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Turn the gathered frames into an animation
    pub fn finalize(self) -> Result<AnimationExport, PlaybackError> {
        if self.frames.is_empty() {
            return Err(PlaybackError::EmptyExport);
        }
        Ok(AnimationExport::new(self.frames, self.frame_duration))
    }
}

impl FrameSink for ExportSink {
    fn accept(&mut self, frame: Frame) -> Result<(), PlaybackError> {
        self.frames.push(frame);
        Ok(())
    }
}
