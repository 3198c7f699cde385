//! Animated GIF export.

use chrono::{DateTime, Utc};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame as AnimationFrame};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use super::PlaybackError;
use crate::config::PlaybackConfig;
use crate::render::Frame;

/// Encoder speed, 1 (best palette) ..= 30 (fastest)
const GIF_SPEED: i32 = 10;

/// How often an animation repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repetition {
    /// Loop forever
    #[default]
    Infinite,
    /// Play this many extra times
    Times(u16),
}

impl From<Repetition> for Repeat {
    fn from(repetition: Repetition) -> Self {
        match repetition {
            Repetition::Infinite => Repeat::Infinite,
            Repetition::Times(n) => Repeat::Finite(n),
        }
    }
}

/// Ordered frames of one export run, written once
#[derive(Debug, Clone)]
pub struct AnimationExport {
    frames: Vec<Frame>,
    frame_duration: Duration,
    repetition: Repetition,
}

impl AnimationExport {
    /// Wrap gathered frames; the caller guarantees at least one
    pub(crate) fn new(frames: Vec<Frame>, frame_duration: Duration) -> Self {
        Self {
            frames,
            frame_duration,
            repetition: Repetition::Infinite,
        }
    }

    /// Frames in display order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false for a finalized export
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Display time of every frame
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Loop behaviour
    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    /// Total play time of one loop
    pub fn total_duration(&self) -> Duration {
        self.frame_duration * self.frames.len() as u32
    }

    /// Encode as an animated GIF
    pub fn write_gif<W: Write>(&self, writer: W) -> Result<(), PlaybackError> {
        let mut encoder = GifEncoder::new_with_speed(writer, GIF_SPEED);
        encoder.set_repeat(self.repetition.into())?;

        let delay = Delay::from_saturating_duration(self.frame_duration);
        let frames = self
            .frames
            .iter()
            .map(|frame| AnimationFrame::from_parts(frame.to_rgba(), 0, 0, delay));
        encoder.encode_frames(frames)?;
        Ok(())
    }

    /// Write the animation to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PlaybackError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_gif(&mut writer)?;
        writer.flush()?;
        info!(
            "Wrote {} frames ({:?} each) to {}",
            self.frames.len(),
            self.frame_duration,
            path.display()
        );
        Ok(())
    }

    /// Describe this export for a JSON sidecar
    pub fn manifest(&self, config: &PlaybackConfig, sources: Vec<String>) -> ExportManifest {
        ExportManifest {
            created: Utc::now(),
            sources,
            variant: config.variant.to_string(),
            frame_count: self.frames.len(),
            frame_duration_ms: self.frame_duration.as_millis() as u64,
            repetition: self.repetition,
            colormap: config.colormap.to_string(),
            value_min: config.value_range.min(),
            value_max: config.value_range.max(),
            first_time: self.frames.first().map(Frame::time),
            last_time: self.frames.last().map(Frame::time),
        }
    }
}

/// Record of one export, written next to the animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    /// When the export was produced
    pub created: DateTime<Utc>,
    /// Input tables
    pub sources: Vec<String>,
    /// Layout variant
    pub variant: String,
    /// Number of frames
    pub frame_count: usize,
    /// Per-frame display time in milliseconds
    pub frame_duration_ms: u64,
    /// Loop behaviour
    pub repetition: Repetition,
    /// Colour scale name
    pub colormap: String,
    /// Lower bound of the colour range
    pub value_min: f64,
    /// Upper bound of the colour range
    pub value_max: f64,
    /// Time shown by the first frame
    pub first_time: Option<f64>,
    /// Time shown by the last frame
    pub last_time: Option<f64>,
}

impl ExportManifest {
    /// Write as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PlaybackError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| PlaybackError::IoError(e.into()))
    }
}
