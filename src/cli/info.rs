use anyhow::{Context, Result};
use std::path::PathBuf;

use thermostrip::series::{SeriesSummary, SeriesTable, Side};

/// Display information about measurement files
pub fn run(files: Vec<PathBuf>, json: bool) -> Result<()> {
    let mut summaries = Vec::with_capacity(files.len());
    for file in &files {
        if !file.exists() {
            anyhow::bail!("File does not exist: {}", file.display());
        }
        let table = SeriesTable::from_path(file)
            .with_context(|| format!("Failed to load {}", file.display()))?;
        summaries.push(table.summary());
    }

    if json {
        let text =
            serde_json::to_string_pretty(&summaries).context("Failed to serialize summaries")?;
        println!("{}", text);
        return Ok(());
    }

    for (file, summary) in files.iter().zip(&summaries) {
        let side = file
            .file_name()
            .and_then(|name| Side::from_file_name(&name.to_string_lossy()));
        print_summary(&file.display().to_string(), side, summary);
    }
    Ok(())
}

#[cfg(feature = "colorized_output")]
fn print_summary(file: &str, side: Option<Side>, summary: &SeriesSummary) {
    use console::style;

    println!("{}", style("Measurement File").bold().cyan());
    println!("{}", style("================").cyan());
    println!("{}: {}", style("File").bold(), file);
    if let Some(side) = side {
        println!("{}: {}", style("Panel side").bold(), style(side).yellow());
    }
    print_rows(summary, |label| style(label).bold().to_string());
}

#[cfg(not(feature = "colorized_output"))]
fn print_summary(file: &str, side: Option<Side>, summary: &SeriesSummary) {
    println!("Measurement File");
    println!("================");
    println!("File: {}", file);
    if let Some(side) = side {
        println!("Panel side: {}", side);
    }
    print_rows(summary, str::to_string);
}

fn print_rows(summary: &SeriesSummary, label: impl Fn(&str) -> String) {
    println!(
        "  {}: {} ({:.2} .. {:.2} s)",
        label("Time points"),
        summary.time_points,
        summary.time_start,
        summary.time_end
    );
    println!(
        "  {}: {} ({:.2} .. {:.2} mm)",
        label("Distances"),
        summary.distance_points,
        summary.distance_min,
        summary.distance_max
    );
    println!(
        "  {}: {:.2} .. {:.2} °C",
        label("Temperature"),
        summary.temperature_min,
        summary.temperature_max
    );
    println!();
}
