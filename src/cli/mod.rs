use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use thermostrip::colormap::Colormap;
use thermostrip::config::{TimeStep, Variant};

mod config;
mod demo;
mod export;
mod info;
mod options;
mod play;
mod still;

pub use options::PlaybackArgs;

/// thermostrip - Animated temperature strips from CSV measurements
#[derive(Parser)]
#[command(name = "thermostrip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Colour scale.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ColormapArg {
    /// Dark purple to yellow
    Plasma,
    /// Dark blue to yellow
    Viridis,
    /// Black to pale yellow through red
    Inferno,
    /// Black to pale pink through purple
    Magma,
    /// Blue to yellow, colour-vision friendly
    Cividis,
    /// Classic blue-cyan-yellow-red
    Jet,
    /// Full hue sweep
    Rainbow,
    /// Diverging blue-white-red
    Seismic,
    /// Improved rainbow
    Turbo,
    /// Black to white
    Grayscale,
}

impl From<ColormapArg> for Colormap {
    fn from(arg: ColormapArg) -> Self {
        match arg {
            ColormapArg::Plasma => Colormap::Plasma,
            ColormapArg::Viridis => Colormap::Viridis,
            ColormapArg::Inferno => Colormap::Inferno,
            ColormapArg::Magma => Colormap::Magma,
            ColormapArg::Cividis => Colormap::Cividis,
            ColormapArg::Jet => Colormap::Jet,
            ColormapArg::Rainbow => Colormap::Rainbow,
            ColormapArg::Seismic => Colormap::Seismic,
            ColormapArg::Turbo => Colormap::Turbo,
            ColormapArg::Grayscale => Colormap::Grayscale,
        }
    }
}

/// Layout variant.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum VariantArg {
    /// One horizontal strip (one input file, 35-60 °C)
    Strip,
    /// Four bands around the time label (four input files, 40-50 °C)
    Cross,
    /// Four bands plus raw profile plots (four input files, 40-50 °C)
    CrossWithProfiles,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Strip => Variant::Strip,
            VariantArg::Cross => Variant::Cross,
            VariantArg::CrossWithProfiles => Variant::CrossWithProfiles,
        }
    }
}

/// Time step between frames, in seconds.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StepArg {
    /// 0.1 s
    #[value(name = "0.1")]
    Tenth,
    /// 0.2 s
    #[value(name = "0.2")]
    Fifth,
    /// 0.5 s
    #[value(name = "0.5")]
    Half,
    /// 1.0 s
    #[value(name = "1.0", alias = "1")]
    Whole,
}

impl From<StepArg> for TimeStep {
    fn from(arg: StepArg) -> Self {
        match arg {
            StepArg::Tenth => TimeStep::Tenth,
            StepArg::Fifth => TimeStep::Fifth,
            StepArg::Half => TimeStep::Half,
            StepArg::Whole => TimeStep::Whole,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play frames live into a continuously rewritten preview PNG
    Play {
        #[command(flatten)]
        args: PlaybackArgs,

        /// Preview image rewritten for every frame
        #[arg(long, value_name = "PNG", default_value = "thermostrip-preview.png")]
        preview: PathBuf,

        /// Stop after this many frames
        #[arg(long, value_name = "N")]
        max_frames: Option<usize>,
    },

    /// Export the frame sequence as a looping GIF
    Export {
        #[command(flatten)]
        args: PlaybackArgs,

        /// Output GIF path
        #[arg(short, long, value_name = "GIF", default_value = "thermostrip.gif")]
        output: PathBuf,

        /// Also write a JSON manifest describing the export
        #[arg(long, value_name = "JSON")]
        manifest: Option<PathBuf>,
    },

    /// Render a single frame at a chosen time
    Still {
        #[command(flatten)]
        args: PlaybackArgs,

        /// Time to show (defaults to the start time)
        #[arg(short, long, value_name = "SECONDS")]
        time: Option<f64>,

        /// Output PNG path
        #[arg(short, long, value_name = "PNG", default_value = "thermostrip-still.png")]
        output: PathBuf,
    },

    /// Display information about measurement files
    Info {
        /// Input CSV files
        #[arg(value_name = "CSV", required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate synthetic measurement files for trying the tool
    Demo {
        /// Output directory
        #[arg(value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Write four panel files instead of one strip file
        #[arg(long)]
        panels: bool,

        /// Recorded duration in seconds
        #[arg(long, default_value = "10.0")]
        duration: f64,

        /// Number of distance columns
        #[arg(long, default_value = "12")]
        points: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Play {
            args,
            preview,
            max_frames,
        } => play::run(args, preview, max_frames),
        Commands::Export {
            args,
            output,
            manifest,
        } => export::run(args, output, manifest),
        Commands::Still { args, time, output } => still::run(args, time, output),
        Commands::Info { files, json } => info::run(files, json),
        Commands::Demo {
            output,
            panels,
            duration,
            points,
        } => demo::run(output, panels, duration, points),
    }
}
