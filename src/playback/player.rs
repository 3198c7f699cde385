use super::{PlaybackError, StopHandle};
use crate::render::{Frame, FrameRenderer};
use crate::sequencer::FrameSequencer;
use crate::series::FrameSource;

/// Pull-based frame producer.
///
/// Each call to `next` renders the frame of the next sequence step. When a
/// stop handle is attached it is polled before every frame, so a stop request
/// takes effect between frames and never interrupts one.
pub struct FramePlayer<'a> {
    source: &'a FrameSource,
    renderer: &'a FrameRenderer,
    steps: FrameSequencer<'a>,
    stop: Option<StopHandle>,
    stopped: bool,
}

impl<'a> FramePlayer<'a> {
    /// Player over `steps` that ignores stop requests
    pub fn new(
        source: &'a FrameSource,
        renderer: &'a FrameRenderer,
        steps: FrameSequencer<'a>,
    ) -> Self {
        Self {
            source,
            renderer,
            steps,
            stop: None,
            stopped: false,
        }
    }

    /// Honour stop requests raised on `stop`
    pub fn with_stop(mut self, stop: StopHandle) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Total number of frames the sequence holds
    pub fn total(&self) -> usize {
        self.steps.total()
    }

    /// Frames not yet produced
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Whether the player ended because of a stop request
    pub fn was_stopped(&self) -> bool {
        self.stopped
    }
}

impl Iterator for FramePlayer<'_> {
    type Item = Result<Frame, PlaybackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        if self.stop.as_ref().is_some_and(StopHandle::is_raised) {
            self.stopped = true;
            return None;
        }
        let step = self.steps.next()?;
        Some(
            self.renderer
                .render(self.source, step.index)
                .map_err(PlaybackError::from),
        )
    }
}
