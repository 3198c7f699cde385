use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use super::PlaybackArgs;

/// Render the frame closest to `time` into a PNG
pub fn run(args: PlaybackArgs, time: Option<f64>, output: PathBuf) -> Result<()> {
    let session = args.open_session()?;
    let time = time.unwrap_or_else(|| session.config().start_on(session.source().times()));

    let frame = session.still(time).context("Failed to render frame")?;
    frame
        .save_png(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Requested {} s, showing sample {}", time, frame.index());
    println!("{} -> {}", frame.label(), output.display());
    Ok(())
}
