use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::sink::{ExportSink, FrameSink};
use super::{AnimationExport, FramePlayer, PlaybackError};
use crate::config::{PlaybackConfig, Variant};
use crate::render::{Frame, FontSource, FrameRenderer};
use crate::sequencer::{nearest_index, FrameSequencer};
use crate::series::FrameSource;

/// Default number of frames between export progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 25;

/// What a session is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No run in progress
    #[default]
    Idle,
    /// Live playback in progress
    Playing,
    /// Export in progress
    Exporting,
}

/// Shared stop request flag.
///
/// Clones share one flag, so any clone may be raised from another thread, a
/// sink or a signal handler. Live playback polls it between frames.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Fresh, lowered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Withdraw a stop request
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Whether a stop was requested
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a live playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Frames handed to the sink
    pub frames_delivered: usize,
    /// True when a stop request ended the run early
    pub stopped: bool,
}

/// Export progress, reported after every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    /// Frames rendered so far
    pub completed: usize,
    /// Frames the sequence holds
    pub expected: usize,
}

impl ExportProgress {
    /// Completed share in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.expected == 0 {
            1.0
        } else {
            self.completed as f64 / self.expected as f64
        }
    }
}

/// Result of [`PlaybackSession::run`]
#[derive(Debug)]
pub enum RunOutcome {
    /// Live playback ran
    Played(PlaybackSummary),
    /// An animation was exported
    Exported(AnimationExport),
    /// A single frame was rendered
    Still(Frame),
}

/// Playback and export driver for one frame source.
///
/// The session is `Idle` between runs. A run always uses the configuration
/// current at its start; [`reconfigure`](Self::reconfigure) takes `&mut self`,
/// so it can never overlap a run.
pub struct PlaybackSession {
    source: FrameSource,
    config: PlaybackConfig,
    renderer: FrameRenderer,
    state: SessionState,
    stop: StopHandle,
    progress_interval: usize,
}

impl PlaybackSession {
    /// Create a session, searching the system for a text font
    pub fn new(source: FrameSource, config: PlaybackConfig) -> Result<Self, PlaybackError> {
        Self::with_fonts(source, config, &FontSource::system())
    }

    /// Create a session with an explicit font source
    pub fn with_fonts(
        source: FrameSource,
        config: PlaybackConfig,
        fonts: &FontSource,
    ) -> Result<Self, PlaybackError> {
        check(&source, &config)?;
        let renderer = FrameRenderer::from_config(&config, fonts)?;
        info!(
            "Session ready: {} variant, {} time points, step {}",
            config.variant,
            source.times().len(),
            config.step
        );
        Ok(Self {
            source,
            config,
            renderer,
            state: SessionState::Idle,
            stop: StopHandle::new(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        })
    }

    /// Render frames without any text
    pub fn without_text(mut self) -> Self {
        self.renderer = self.renderer.without_text();
        self
    }

    /// Log export progress every `frames` frames (0 disables the log lines)
    pub fn with_progress_interval(mut self, frames: usize) -> Self {
        self.progress_interval = frames;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Data being played
    pub fn source(&self) -> &FrameSource {
        &self.source
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// A handle that stops live playback when raised
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Replace the configuration; the next run starts from scratch with it
    pub fn reconfigure(&mut self, config: PlaybackConfig) -> Result<(), PlaybackError> {
        check(&self.source, &config)?;
        let text = self.renderer.draws_text();
        let mut renderer = FrameRenderer::new(
            config.variant.layout(),
            config.colormap,
            config.value_range,
        );
        if !text {
            renderer = renderer.without_text();
        }
        debug!("Reconfigured session: {:?}", config);
        self.renderer = renderer;
        self.config = config;
        Ok(())
    }

    /// Sequence of the current configuration
    fn sequence(&self) -> Result<FrameSequencer<'_>, PlaybackError> {
        let times = self.source.times();
        let start = self.config.start_on(times);
        let steps = FrameSequencer::new(times, start, self.config.step.seconds())?;
        if steps.total() == 0 {
            warn!(
                "Start time {} is past the last time point {}; nothing to show",
                start,
                self.source.time_span().1
            );
        }
        Ok(steps)
    }

    /// Frames of the current configuration, ignoring stop requests
    pub fn frames(&self) -> Result<FramePlayer<'_>, PlaybackError> {
        Ok(FramePlayer::new(&self.source, &self.renderer, self.sequence()?))
    }

    /// Play every frame into `sink` until the sequence ends or a stop is requested.
    ///
    /// Clears any earlier stop request first. The session is `Idle` again when
    /// this returns, whatever the outcome.
    pub fn play<S: FrameSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<PlaybackSummary, PlaybackError> {
        self.stop.clear();
        self.state = SessionState::Playing;
        let result = self.drive_play(sink);
        self.state = SessionState::Idle;
        result
    }

    fn drive_play<S: FrameSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> Result<PlaybackSummary, PlaybackError> {
        let mut player = self.frames()?.with_stop(self.stop.clone());
        info!("Playing {} frames", player.total());

        let mut frames_delivered = 0;
        for frame in player.by_ref() {
            sink.accept(frame?)?;
            frames_delivered += 1;
        }

        let summary = PlaybackSummary {
            frames_delivered,
            stopped: player.was_stopped(),
        };
        if summary.stopped {
            info!("Playback stopped after {} frames", frames_delivered);
        } else {
            info!("Playback finished: {} frames", frames_delivered);
        }
        Ok(summary)
    }

    /// Render the whole sequence into an animation.
    ///
    /// Export is not interruptible by the stop flag. `progress` is called
    /// after every frame with monotonically increasing counts.
    pub fn export<F>(&mut self, progress: F) -> Result<AnimationExport, PlaybackError>
    where
        F: FnMut(ExportProgress),
    {
        self.state = SessionState::Exporting;
        let result = self.drive_export(progress);
        self.state = SessionState::Idle;
        result
    }

    fn drive_export<F>(&self, mut progress: F) -> Result<AnimationExport, PlaybackError>
    where
        F: FnMut(ExportProgress),
    {
        let player = self.frames()?;
        let expected = player.total();
        info!("Exporting {} frames", expected);

        let mut sink = ExportSink::with_capacity(self.config.pacing_delay, expected);
        for frame in player {
            sink.accept(frame?)?;
            let update = ExportProgress {
                completed: sink.len(),
                expected,
            };
            if self.progress_interval > 0
                && (update.completed % self.progress_interval == 0 || update.completed == expected)
            {
                info!(
                    "Export progress: {}/{} frames ({:.0}%)",
                    update.completed,
                    expected,
                    update.fraction() * 100.0
                );
            }
            progress(update);
        }

        sink.finalize()
    }

    /// Render the frame closest to `time` (manual mode)
    pub fn still(&self, time: f64) -> Result<Frame, PlaybackError> {
        let index = nearest_index(self.source.times(), time);
        debug!("Still frame at {} s resolves to sample {}", time, index);
        Ok(self.renderer.render(&self.source, index)?)
    }

    /// Run whatever the configuration asks for.
    ///
    /// Export takes precedence over playback; with neither requested a still
    /// frame at the start time is rendered.
    pub fn run<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunOutcome, PlaybackError> {
        if self.config.export_requested {
            self.export(|_| {}).map(RunOutcome::Exported)
        } else if self.config.play {
            self.play(sink).map(RunOutcome::Played)
        } else {
            let start = self.config.start_on(self.source.times());
            self.still(start).map(RunOutcome::Still)
        }
    }
}

fn check(source: &FrameSource, config: &PlaybackConfig) -> Result<(), PlaybackError> {
    config.validate()?;
    match (config.variant, source) {
        (Variant::Strip, FrameSource::Strip(_))
        | (Variant::Cross | Variant::CrossWithProfiles, FrameSource::Panels(_)) => Ok(()),
        (variant, _) => Err(PlaybackError::VariantMismatch(format!(
            "the {} variant needs {} input table(s)",
            variant,
            variant.input_count()
        ))),
    }
}
