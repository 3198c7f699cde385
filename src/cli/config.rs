//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep their settings in a file:
//!
//! ```toml
//! # thermostrip.toml
//! [playback]
//! variant = "cross-with-profiles"
//! step = 0.5
//! start_time = 2.0
//! pacing_delay_ms = 150
//!
//! [render]
//! colormap = "inferno"
//! value_min = 40.0
//! value_max = 50.0
//! font = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
//! ```
//!
//! Explicit command-line flags override values from the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use thermostrip::colormap::Colormap;
use thermostrip::config::{TimeStep, Variant};

/// Root configuration structure for thermostrip.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sequencing and pacing settings.
    #[serde(default)]
    pub playback: PlaybackSection,

    /// Appearance settings.
    #[serde(default)]
    pub render: RenderSection,
}

/// The `[playback]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackSection {
    /// Layout variant.
    pub variant: Option<Variant>,

    /// Time step in seconds (0.1, 0.2, 0.5 or 1.0).
    pub step: Option<TimeStep>,

    /// First time to show, in seconds.
    pub start_time: Option<f64>,

    /// Pause between live frames, also the GIF frame duration.
    pub pacing_delay_ms: Option<u64>,
}

/// The `[render]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSection {
    /// Colour scale name.
    pub colormap: Option<Colormap>,

    /// Temperature mapped to the low end of the colour scale.
    pub value_min: Option<f64>,

    /// Temperature mapped to the high end of the colour scale.
    pub value_max: Option<f64>,

    /// TTF file used for labels.
    pub font: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [playback]
            variant = "cross-with-profiles"
            step = 0.5
            start_time = 2.0
            pacing_delay_ms = 150

            [render]
            colormap = "inferno"
            value_min = 40.0
            value_max = 50
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.playback.variant, Some(Variant::CrossWithProfiles));
        assert_eq!(config.playback.step, Some(TimeStep::Half));
        assert_eq!(config.playback.start_time, Some(2.0));
        assert_eq!(config.playback.pacing_delay_ms, Some(150));
        assert_eq!(config.render.colormap, Some(Colormap::Inferno));
        assert_eq!(config.render.value_min, Some(40.0));
        assert_eq!(config.render.value_max, Some(50.0));
        assert_eq!(config.render.font, None);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [render]
            colormap = "viridis"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.render.colormap, Some(Colormap::Viridis));
        assert_eq!(config.playback.step, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.playback.variant, None);
    }

    #[test]
    fn test_invalid_step_rejected() {
        assert!(Config::from_str("[playback]\nstep = 0.3\n").is_err());
        assert!(Config::from_str("[playback]\nspeed = 2\n").is_err());
    }
}
