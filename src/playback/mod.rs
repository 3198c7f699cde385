//! # Playback and Export
//!
//! Drives rendered frames to a consumer.
//!
//! - [`PlaybackSession`] owns the frame source, the current configuration and
//!   the stop flag, and moves between [`SessionState::Idle`],
//!   [`SessionState::Playing`] and [`SessionState::Exporting`].
//! - [`FramePlayer`] is the pull-based frame iterator a session drives.
//! - [`LiveSink`] shows frames on a [`DisplayTarget`] with a pacing delay;
//!   [`ExportSink`] gathers them into an [`AnimationExport`] written as GIF.
//!
//! ## Example
//!
//! ```rust,no_run
//! use thermostrip::prelude::*;
//!
//! let table = SeriesTable::from_path("run.csv")?;
//! let config = PlaybackConfig::default().with_step(TimeStep::Half);
//! let mut session = PlaybackSession::new(FrameSource::from(table), config)?;
//!
//! let animation = session.export(|p| println!("{}/{}", p.completed, p.expected))?;
//! animation.save("run.gif")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod export;
mod player;
mod session;
mod sink;


pub use error::PlaybackError;
pub use export::{AnimationExport, ExportManifest, Repetition};
pub use player::FramePlayer;
pub use session::{
    ExportProgress, PlaybackSession, PlaybackSummary, RunOutcome, SessionState, StopHandle,
    DEFAULT_PROGRESS_INTERVAL,
};
pub use sink::{DisplayTarget, ExportSink, FrameSink, LiveSink, PngFileTarget};
