use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use thermostrip::playback::ExportProgress;

use super::PlaybackArgs;

/// Export the frame sequence as a looping GIF
pub fn run(args: PlaybackArgs, output: PathBuf, manifest: Option<PathBuf>) -> Result<()> {
    let mut session = args.open_session()?;

    let bar = ExportBar::new();
    let result = session.export(|progress| bar.update(progress));
    bar.finish();
    let animation = result.context("Export failed")?;

    animation
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(path) = manifest {
        animation
            .manifest(session.config(), args.input_names())
            .save(&path)
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
        info!("Manifest written to {}", path.display());
    }

    println!(
        "Exported {} frames ({} ms each) to {}",
        animation.len(),
        animation.frame_duration().as_millis(),
        output.display()
    );
    Ok(())
}

/// Terminal progress bar fed by export progress callbacks
#[cfg(feature = "colorized_output")]
struct ExportBar(indicatif::ProgressBar);

#[cfg(feature = "colorized_output")]
impl ExportBar {
    fn new() -> Self {
        let bar = indicatif::ProgressBar::new(0).with_message("Rendering");
        if let Ok(style) = indicatif::ProgressStyle::with_template(
            "{msg:.cyan.bold} [{bar:30}] {pos}/{len}",
        ) {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self(bar)
    }

    fn update(&self, progress: ExportProgress) {
        self.0.set_length(progress.expected as u64);
        self.0.set_position(progress.completed as u64);
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

#[cfg(not(feature = "colorized_output"))]
struct ExportBar;

#[cfg(not(feature = "colorized_output"))]
impl ExportBar {
    fn new() -> Self {
        Self
    }

    fn update(&self, _progress: ExportProgress) {}

    fn finish(&self) {}
}
