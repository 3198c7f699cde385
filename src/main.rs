//! # thermostrip
//!
//! A command-line tool for turning temperature-vs-distance CSV recordings into
//! animated colour strips.
//!
//! ## Usage
//!
//! ```bash
//! # Generate sample data
//! thermostrip demo data/
//!
//! # Export a looping GIF
//! thermostrip export data/demo_strip.csv -o strip.gif --step 0.2
//!
//! # Four panels with raw profile plots
//! thermostrip export data/demo_{top,bottom,left,right}.csv --variant cross-with-profiles
//!
//! # Live playback into a preview PNG, stopping after 50 frames
//! thermostrip play data/demo_strip.csv --preview live.png --max-frames 50
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
