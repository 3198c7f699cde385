use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use thermostrip::playback::{FrameSink, LiveSink, PlaybackError, PngFileTarget, StopHandle};
use thermostrip::render::Frame;

use super::PlaybackArgs;

/// Forwards frames and raises the stop handle once `limit` frames went through
struct FrameLimit<S> {
    inner: S,
    limit: Option<usize>,
    seen: usize,
    stop: StopHandle,
}

impl<S: FrameSink> FrameSink for FrameLimit<S> {
    fn accept(&mut self, frame: Frame) -> Result<(), PlaybackError> {
        self.inner.accept(frame)?;
        self.seen += 1;
        if self.limit.is_some_and(|limit| self.seen >= limit) {
            self.stop.raise();
        }
        Ok(())
    }
}

/// Play frames live into a preview PNG
pub fn run(args: PlaybackArgs, preview: PathBuf, max_frames: Option<usize>) -> Result<()> {
    let mut session = args.open_session()?;
    let delay = session.config().pacing_delay;

    info!("Writing live preview to {}", preview.display());
    let mut sink = FrameLimit {
        inner: LiveSink::new(PngFileTarget::new(&preview), delay),
        limit: max_frames,
        seen: 0,
        stop: session.stop_handle(),
    };

    let summary = session.play(&mut sink).context("Playback failed")?;

    if summary.stopped {
        println!(
            "Stopped after {} frames; last frame in {}",
            summary.frames_delivered,
            preview.display()
        );
    } else {
        println!(
            "Played {} frames; last frame in {}",
            summary.frames_delivered,
            preview.display()
        );
    }
    Ok(())
}
