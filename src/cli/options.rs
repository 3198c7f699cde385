use anyhow::{bail, Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use thermostrip::colormap::ValueRange;
use thermostrip::config::{PlaybackConfig, Variant};
use thermostrip::playback::PlaybackSession;
use thermostrip::render::FontSource;
use thermostrip::series::{FrameSource, PanelSet, SeriesTable};

use super::config::Config;
use super::{ColormapArg, StepArg, VariantArg};

/// Inputs and settings shared by play, export and still.
#[derive(Args, Debug, Clone)]
pub struct PlaybackArgs {
    /// Input CSV file, or four files (top, bottom, left, right) for the cross variants
    #[arg(value_name = "CSV", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Layout variant (inferred from the number of inputs when omitted)
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Colour scale
    #[arg(short, long, value_enum)]
    pub colormap: Option<ColormapArg>,

    /// Time step between frames, in seconds
    #[arg(short, long, value_enum)]
    pub step: Option<StepArg>,

    /// First time to show, in seconds (defaults to the first recorded time)
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub start: Option<f64>,

    /// Pause between live frames and GIF frame duration, in milliseconds (50-1000)
    #[arg(short, long, value_name = "MS")]
    pub delay: Option<u64>,

    /// Temperature mapped to the low end of the colour scale
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub vmin: Option<f64>,

    /// Temperature mapped to the high end of the colour scale
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub vmax: Option<f64>,

    /// TTF font for labels (searches system fonts when omitted)
    #[arg(long, value_name = "TTF")]
    pub font: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Settings after merging defaults, the config file and flags.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub config: PlaybackConfig,
    pub fonts: FontSource,
}

impl PlaybackArgs {
    /// Merge defaults, the optional config file and explicit flags, in that order.
    pub fn resolve(&self) -> Result<Resolved> {
        let file = match &self.config {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Config::from_file(path)?
            }
            None => Config::default(),
        };

        let variant = match self.variant.map(Variant::from).or(file.playback.variant) {
            Some(variant) => variant,
            None => match self.inputs.len() {
                4 => Variant::Cross,
                _ => Variant::Strip,
            },
        };
        if self.inputs.len() != variant.input_count() {
            bail!(
                "The {} variant needs {} input file(s), got {}",
                variant,
                variant.input_count(),
                self.inputs.len()
            );
        }

        let mut config = PlaybackConfig::for_variant(variant);
        if let Some(step) = self.step.map(Into::into).or(file.playback.step) {
            config = config.with_step(step);
        }
        if let Some(start) = self.start.or(file.playback.start_time) {
            config = config.with_start_time(start);
        }
        if let Some(ms) = self.delay.or(file.playback.pacing_delay_ms) {
            config = config.with_pacing_delay(Duration::from_millis(ms));
        }
        if let Some(colormap) = self.colormap.map(Into::into).or(file.render.colormap) {
            config = config.with_colormap(colormap);
        }

        let default_range = variant.default_range();
        let min = self.vmin.or(file.render.value_min).unwrap_or(default_range.min());
        let max = self.vmax.or(file.render.value_max).unwrap_or(default_range.max());
        config = config.with_value_range(ValueRange::new(min, max)?);
        config.validate()?;

        let fonts = match self.font.clone().or(file.render.font) {
            Some(path) => FontSource::file(path),
            None => FontSource::system(),
        };

        Ok(Resolved { config, fonts })
    }

    /// Load the input files in the shape the variant needs.
    pub fn load_source(&self, variant: Variant) -> Result<FrameSource> {
        match variant {
            Variant::Strip => {
                let [path] = self.inputs.as_slice() else {
                    bail!("The strip variant needs exactly one input file");
                };
                let table = SeriesTable::from_path(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                Ok(FrameSource::from(table))
            }
            Variant::Cross | Variant::CrossWithProfiles => {
                let panels =
                    PanelSet::from_paths(&self.inputs).context("Failed to load panel files")?;
                Ok(FrameSource::from(panels))
            }
        }
    }

    /// Resolve settings, load inputs and open a session.
    pub fn open_session(&self) -> Result<PlaybackSession> {
        let Resolved { config, fonts } = self.resolve()?;
        let source = self.load_source(config.variant)?;
        PlaybackSession::with_fonts(source, config, &fonts).context("Failed to start session")
    }

    /// Input file names, for reports.
    pub fn input_names(&self) -> Vec<String> {
        self.inputs.iter().map(|p| p.display().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use thermostrip::colormap::Colormap;
    use thermostrip::config::TimeStep;

    fn args(inputs: &[&str]) -> PlaybackArgs {
        PlaybackArgs {
            inputs: inputs.iter().map(PathBuf::from).collect(),
            variant: None,
            colormap: None,
            step: None,
            start: None,
            delay: None,
            vmin: None,
            vmax: None,
            font: None,
            config: None,
        }
    }

    #[test]
    fn test_variant_inferred_from_inputs() {
        let single = args(&["a.csv"]).resolve().unwrap();
        assert_eq!(single.config.variant, Variant::Strip);
        assert_eq!(single.config.value_range.min(), 35.0);

        let four = args(&["t.csv", "b.csv", "l.csv", "r.csv"]).resolve().unwrap();
        assert_eq!(four.config.variant, Variant::Cross);
        assert_eq!(four.config.value_range.max(), 50.0);
    }

    #[test]
    fn test_wrong_input_count_rejected() {
        let mut two = args(&["a.csv", "b.csv"]);
        assert!(two.resolve().is_err());
        two.variant = Some(VariantArg::Cross);
        assert!(two.resolve().is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[playback]\nstep = 1.0\npacing_delay_ms = 400\n[render]\ncolormap = \"jet\"\nvalue_min = 30.0"
        )
        .unwrap();

        let mut a = args(&["a.csv"]);
        a.config = Some(file.path().to_path_buf());
        a.colormap = Some(ColormapArg::Magma);

        let resolved = a.resolve().unwrap();
        assert_eq!(resolved.config.step, TimeStep::Whole);
        assert_eq!(resolved.config.pacing_delay, Duration::from_millis(400));
        assert_eq!(resolved.config.colormap, Colormap::Magma);
        assert_eq!(resolved.config.value_range.min(), 30.0);
        assert_eq!(resolved.config.value_range.max(), 60.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut a = args(&["a.csv"]);
        a.delay = Some(5);
        assert!(a.resolve().is_err());

        let mut b = args(&["a.csv"]);
        b.vmin = Some(70.0);
        assert!(b.resolve().is_err());
    }
}
