//! # Playback Configuration
//!
//! The configuration snapshot a front end hands to the pipeline for one
//! playback or export run. It is immutable for the duration of a run; a new
//! snapshot restarts the sequence from scratch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::colormap::{Colormap, ValueRange};
use crate::render::RenderLayout;

/// Shortest accepted pause between live frames
pub const MIN_PACING_DELAY: Duration = Duration::from_millis(50);

/// Longest accepted pause between live frames
pub const MAX_PACING_DELAY: Duration = Duration::from_secs(1);

/// Errors raised by invalid configuration values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Allowed time granularities for stepping through a series
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeStep {
    /// 0.1 s
    #[default]
    Tenth,
    /// 0.2 s
    Fifth,
    /// 0.5 s
    Half,
    /// 1.0 s
    Whole,
}

impl TimeStep {
    /// Every allowed step, finest first
    pub const ALL: [TimeStep; 4] = [
        TimeStep::Tenth,
        TimeStep::Fifth,
        TimeStep::Half,
        TimeStep::Whole,
    ];

    /// Step length in seconds
    pub fn seconds(&self) -> f64 {
        match self {
            TimeStep::Tenth => 0.1,
            TimeStep::Fifth => 0.2,
            TimeStep::Half => 0.5,
            TimeStep::Whole => 1.0,
        }
    }
}

impl TryFrom<f64> for TimeStep {
    type Error = ConfigError;

    fn try_from(seconds: f64) -> Result<Self, Self::Error> {
        TimeStep::ALL
            .iter()
            .find(|s| (s.seconds() - seconds).abs() < 1e-9)
            .copied()
            .ok_or_else(|| {
                ConfigError::InvalidConfiguration(format!(
                    "time step {} s is not one of 0.1, 0.2, 0.5, 1.0",
                    seconds
                ))
            })
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.seconds())
    }
}

impl Serialize for TimeStep {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.seconds())
    }
}

impl<'de> Deserialize<'de> for TimeStep {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        TimeStep::try_from(seconds).map_err(serde::de::Error::custom)
    }
}

/// Rendering variant, replacing the separate single-strip and four-panel tools.
///
/// Each variant pre-configures the layout and the fixed colour range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// One horizontal colour strip.
    ///
    /// - Range: 35 .. 60 °C
    #[default]
    Strip,

    /// Four colour bands around a central time label.
    ///
    /// - Range: 40 .. 50 °C
    Cross,

    /// Four colour bands, each paired with a line plot of the raw profile.
    ///
    /// - Range: 40 .. 50 °C
    CrossWithProfiles,
}

impl Variant {
    /// Default colour normalization range for this variant
    pub fn default_range(&self) -> ValueRange {
        match self {
            Variant::Strip => ValueRange::from_bounds(35.0, 60.0),
            Variant::Cross | Variant::CrossWithProfiles => ValueRange::from_bounds(40.0, 50.0),
        }
    }

    /// Render layout for this variant
    pub fn layout(&self) -> RenderLayout {
        match self {
            Variant::Strip => RenderLayout::Strip,
            Variant::Cross => RenderLayout::Cross { profiles: false },
            Variant::CrossWithProfiles => RenderLayout::Cross { profiles: true },
        }
    }

    /// Number of input tables the variant consumes
    pub fn input_count(&self) -> usize {
        match self {
            Variant::Strip => 1,
            Variant::Cross | Variant::CrossWithProfiles => 4,
        }
    }

    /// Returns all variant names.
    pub fn variants() -> &'static [&'static str] {
        &["strip", "cross", "cross-with-profiles"]
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Strip => write!(f, "strip"),
            Variant::Cross => write!(f, "cross"),
            Variant::CrossWithProfiles => write!(f, "cross-with-profiles"),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strip" | "single" => Ok(Variant::Strip),
            "cross" | "panels" => Ok(Variant::Cross),
            "cross-with-profiles" | "profiles" => Ok(Variant::CrossWithProfiles),
            _ => Err(ConfigError::InvalidConfiguration(format!(
                "unknown variant '{}'. Valid options: {}",
                s,
                Variant::variants().join(", ")
            ))),
        }
    }
}

/// Configuration snapshot for one playback or export run
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// First time to show; `None` starts at the first recorded time point
    pub start_time: Option<f64>,

    /// Distance between successive frames on the time axis
    pub step: TimeStep,

    /// Pause after each live frame, also the exported per-frame duration
    pub pacing_delay: Duration,

    /// Colour scale
    pub colormap: Colormap,

    /// Fixed normalization range for the colour scale
    pub value_range: ValueRange,

    /// Layout variant
    pub variant: Variant,

    /// Whether live playback is requested
    pub play: bool,

    /// Whether an animation export is requested
    pub export_requested: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl PlaybackConfig {
    /// Defaults for a variant, including its colour range
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            start_time: None,
            step: TimeStep::default(),
            pacing_delay: Duration::from_millis(200),
            colormap: Colormap::default(),
            value_range: variant.default_range(),
            variant,
            play: false,
            export_requested: false,
        }
    }

    /// Set the start time
    pub fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set the time step
    pub fn with_step(mut self, step: TimeStep) -> Self {
        self.step = step;
        self
    }

    /// Set the pacing delay
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// Set the colour scale
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Set the colour normalization range
    pub fn with_value_range(mut self, range: ValueRange) -> Self {
        self.value_range = range;
        self
    }

    /// Request live playback
    pub fn with_play(mut self, play: bool) -> Self {
        self.play = play;
        self
    }

    /// Request an animation export
    pub fn with_export(mut self, export: bool) -> Self {
        self.export_requested = export;
        self
    }

    /// Check the values a front end can get wrong
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(start) = self.start_time {
            if !start.is_finite() {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "start time must be finite, got {}",
                    start
                )));
            }
        }
        if self.pacing_delay < MIN_PACING_DELAY || self.pacing_delay > MAX_PACING_DELAY {
            return Err(ConfigError::InvalidConfiguration(format!(
                "pacing delay {:?} outside {:?} ..= {:?}",
                self.pacing_delay, MIN_PACING_DELAY, MAX_PACING_DELAY
            )));
        }
        Ok(())
    }

    /// Start time resolved against a time axis
    pub fn start_on(&self, times: &[f64]) -> f64 {
        self.start_time
            .unwrap_or_else(|| times.first().copied().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_defaults() {
        let strip = Variant::default();
        assert_eq!(strip, Variant::Strip);
        assert_eq!(strip.default_range(), ValueRange::new(35.0, 60.0).unwrap());
        assert_eq!(strip.input_count(), 1);
        assert_eq!(
            Variant::CrossWithProfiles.layout(),
            RenderLayout::Cross { profiles: true }
        );
        assert_eq!(Variant::Cross.default_range().max(), 50.0);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("strip").unwrap(), Variant::Strip);
        assert_eq!(Variant::from_str("CROSS").unwrap(), Variant::Cross);
        assert_eq!(
            Variant::from_str("cross-with-profiles").unwrap(),
            Variant::CrossWithProfiles
        );
        assert!(Variant::from_str("hexagon").is_err());
    }

    #[test]
    fn test_time_step_conversion() {
        assert_eq!(TimeStep::try_from(0.5).unwrap(), TimeStep::Half);
        assert_eq!(TimeStep::try_from(0.1).unwrap().seconds(), 0.1);
        assert!(TimeStep::try_from(0.3).is_err());
        assert!(TimeStep::try_from(0.0).is_err());
        assert!(TimeStep::try_from(-1.0).is_err());
    }

    #[test]
    fn test_validate_pacing_bounds() {
        let config = PlaybackConfig::default();
        assert!(config.validate().is_ok());

        let too_fast = config.clone().with_pacing_delay(Duration::from_millis(10));
        assert!(matches!(
            too_fast.validate(),
            Err(ConfigError::InvalidConfiguration(_))
        ));

        let too_slow = config.clone().with_pacing_delay(Duration::from_secs(2));
        assert!(too_slow.validate().is_err());

        let bad_start = config.with_start_time(f64::NAN);
        assert!(bad_start.validate().is_err());
    }

    #[test]
    fn test_start_on_defaults_to_first_time() {
        let times = [2.0, 3.0];
        assert_eq!(PlaybackConfig::default().start_on(&times), 2.0);
        assert_eq!(
            PlaybackConfig::default().with_start_time(2.5).start_on(&times),
            2.5
        );
    }
}
