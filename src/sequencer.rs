//! # Frame Sequencer
//!
//! Walks a time axis from a start point in fixed steps and resolves every step
//! to the nearest recorded sample.
//!
//! The cursor of step `k` is `start + k * step`. The sequence holds
//! `floor((times.last - start) / step) + 1` steps when `start <= times.last`
//! and is empty otherwise. The quotient is nudged by a relative
//! [`STEP_EPSILON`] before flooring, so a last sample that lies on the step grid
//! up to float error (0.7 with step 0.1) is always reached. It is lazy, finite and restartable: termination is a
//! property of the precomputed step count, so even a degenerate configuration
//! can never loop forever.

use crate::config::ConfigError;

/// Relative tolerance applied to `(last - start) / step` before flooring
pub const STEP_EPSILON: f64 = 1e-9;

/// Index of the entry of `times` closest to `time`.
///
/// `times` must be sorted ascending. Ties resolve to the smaller index. An
/// empty slice yields `0`.
pub fn nearest_index(times: &[f64], time: f64) -> usize {
    if times.is_empty() {
        return 0;
    }
    let upper = times.partition_point(|&t| t < time);
    if upper == 0 {
        return 0;
    }
    if upper == times.len() {
        return times.len() - 1;
    }
    let lower = upper - 1;
    if (time - times[lower]).abs() <= (times[upper] - time).abs() {
        lower
    } else {
        upper
    }
}

/// One resolved step of a [`FrameSequencer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceStep {
    /// Position of this step in the sequence (0-based)
    pub position: usize,
    /// Requested time for this step
    pub cursor: f64,
    /// Index of the closest recorded time point
    pub index: usize,
}

/// Lazy, restartable sequence of sample indices
#[derive(Debug, Clone)]
pub struct FrameSequencer<'a> {
    times: &'a [f64],
    start: f64,
    step: f64,
    count: usize,
    next: usize,
}

impl<'a> FrameSequencer<'a> {
    /// Create a sequence starting at `start` and advancing by `step`.
    ///
    /// Fails with [`ConfigError::InvalidConfiguration`] when `times` is empty,
    /// `step` is not strictly positive, or either value is not finite. A start
    /// past the last time point is valid and yields an empty sequence.
    pub fn new(times: &'a [f64], start: f64, step: f64) -> Result<Self, ConfigError> {
        if times.is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "cannot sequence an empty time axis".to_string(),
            ));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "time step must be a positive number, got {}",
                step
            )));
        }
        if !start.is_finite() {
            return Err(ConfigError::InvalidConfiguration(format!(
                "start time must be finite, got {}",
                start
            )));
        }

        let last = times[times.len() - 1];
        let count = if start > last {
            0
        } else {
            let quotient = (last - start) / step;
            // Absorb representation error so 0.7 / 0.1 still reaches the last sample
            let whole = (quotient + quotient.abs().max(1.0) * STEP_EPSILON).floor();
            if whole >= usize::MAX as f64 {
                return Err(too_many_steps(start, last, step));
            }
            (whole as usize)
                .checked_add(1)
                .ok_or_else(|| too_many_steps(start, last, step))?
        };

        Ok(Self {
            times,
            start,
            step,
            count,
            next: 0,
        })
    }

    /// Sweep the whole axis from its first time point
    pub fn full_sweep(times: &'a [f64], step: f64) -> Result<Self, ConfigError> {
        let start = times.first().copied().unwrap_or_default();
        Self::new(times, start, step)
    }

    /// Rewind to the first step
    pub fn restart(&mut self) {
        self.next = 0;
    }

    /// Total number of steps, independent of how many were consumed
    pub fn total(&self) -> usize {
        self.count
    }

    /// Cursor value of step `position`
    pub fn cursor_at(&self, position: usize) -> f64 {
        self.start + position as f64 * self.step
    }

    /// Resolve step `position` without advancing the sequence
    pub fn step_at(&self, position: usize) -> Option<SequenceStep> {
        if position >= self.count {
            return None;
        }
        let cursor = self.cursor_at(position);
        Some(SequenceStep {
            position,
            cursor,
            index: nearest_index(self.times, cursor),
        })
    }
}

impl Iterator for FrameSequencer<'_> {
    type Item = SequenceStep;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.step_at(self.next)?;
        self.next += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameSequencer<'_> {}

fn too_many_steps(start: f64, last: f64, step: f64) -> ConfigError {
    ConfigError::InvalidConfiguration(format!(
        "too many steps: {} .. {} in steps of {}",
        start, last, step
    ))
}
