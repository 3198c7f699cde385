//! # thermostrip - Animated Temperature Strips
//!
//! `thermostrip` turns CSV time series of temperature-vs-distance measurements
//! into animated colour strips, played back live or exported as looping GIFs.
//!
//! ## Key Features
//!
//! - **One table, one strip**: each time point of a measurement file becomes a
//!   horizontal colour band, resampled onto a dense distance grid.
//!
//! - **Four-directional panels**: four files tagged top, bottom, left and right
//!   are drawn as a cross of bands around the current time, optionally with a
//!   line plot of every raw profile.
//!
//! - **Fixed colour ranges**: values are clipped to a configured range before
//!   colour mapping, so frames stay comparable over the whole run.
//!
//! - **Cooperative stop**: live playback polls a shared stop flag between
//!   frames; export always runs to completion.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use thermostrip::prelude::*;
//! use std::time::Duration;
//!
//! let table = SeriesTable::from_path("furnace.csv")?;
//! let config = PlaybackConfig::for_variant(Variant::Strip)
//!     .with_step(TimeStep::Fifth)
//!     .with_colormap(Colormap::Inferno);
//!
//! let mut session = PlaybackSession::new(FrameSource::from(table), config)?;
//!
//! // Live playback into a preview PNG, 200 ms per frame
//! let mut sink = LiveSink::new(PngFileTarget::new("preview.png"), Duration::from_millis(200));
//! let summary = session.play(&mut sink)?;
//! println!("Showed {} frames", summary.frames_delivered);
//!
//! // Or export the same sequence as a looping GIF
//! session.export(|_| {})?.save("furnace.gif")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Input Format
//!
//! ```text
//! time,0mm,12.5mm,25mm
//! 0.0,40.1,41.3,39.8
//! 0.1,40.4,41.9,40.0
//! ```
//!
//! ## Architecture
//!
//! - [`series`]: measurement tables, panel sets and CSV I/O
//! - [`resample`]: linear resampling onto 500 evenly spaced distances
//! - [`sequencer`]: stepping through the time axis
//! - [`colormap`]: colour scales and value normalization
//! - [`render`]: strip and cross layouts drawn with plotters
//! - [`playback`]: live sinks, export and the session state machine
//! - [`config`]: the playback configuration snapshot

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod colormap;
pub mod config;
pub mod playback;
pub mod render;
pub mod resample;
pub mod sequencer;
pub mod series;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::colormap::{Colormap, ValueRange};
    pub use crate::config::{ConfigError, PlaybackConfig, TimeStep, Variant};
    pub use crate::playback::{
        AnimationExport, DisplayTarget, ExportManifest, ExportProgress, ExportSink, FrameSink,
        LiveSink, PlaybackError, PlaybackSession, PlaybackSummary, PngFileTarget, RunOutcome,
        SessionState, StopHandle,
    };
    pub use crate::render::{Frame, FontSource, FrameRenderer, RenderError, RenderLayout};
    pub use crate::resample::{resample, Profile, DENSE_SAMPLES};
    pub use crate::sequencer::{FrameSequencer, SequenceStep};
    pub use crate::series::{FrameSource, PanelSet, SeriesError, SeriesSummary, SeriesTable, Side};
}
