//! Colour bands, legends and text shared by both layouts.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::error::drawing;
use super::font::FONT_FAMILY;
use super::geometry::PixelRect;
use super::RenderError;
use crate::colormap::{Colormap, ValueRange};
use crate::resample::Profile;

/// Axis and outline colour
pub(crate) const INK: RGBColor = RGBColor(40, 40, 40);

/// Run of pixels sharing one colour: `(start, end_exclusive, rgb)`
pub(crate) type ColorRun = (i32, i32, [u8; 3]);

/// Split `len` pixels into runs of identical colour
pub(crate) fn color_runs(len: i32, mut color_at: impl FnMut(i32) -> [u8; 3]) -> Vec<ColorRun> {
    let mut runs: Vec<ColorRun> = Vec::new();
    for j in 0..len.max(0) {
        let rgb = color_at(j);
        match runs.last_mut() {
            Some(run) if run.2 == rgb => run.1 = j + 1,
            _ => runs.push((j, j + 1, rgb)),
        }
    }
    runs
}

/// Sample of a `samples`-long profile shown at pixel `j` of `len`
pub(crate) fn sample_at(j: i32, len: i32, samples: usize) -> usize {
    if len <= 1 || samples <= 1 {
        return 0;
    }
    let t = f64::from(j) / f64::from(len - 1);
    ((t * (samples - 1) as f64).round() as usize).min(samples - 1)
}

/// Fill `rect` with `runs` along its long axis
fn fill_runs<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: PixelRect,
    horizontal: bool,
    runs: &[ColorRun],
) -> Result<(), RenderError> {
    for &(start, end, [r, g, b]) in runs {
        let corners = if horizontal {
            [(rect.x + start, rect.y), (rect.x + end, rect.bottom())]
        } else {
            [(rect.x, rect.y + start), (rect.right(), rect.y + end)]
        };
        area.draw(&Rectangle::new(corners, RGBColor(r, g, b).filled()))
            .map_err(drawing)?;
    }
    Ok(())
}

fn outline<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: PixelRect,
) -> Result<(), RenderError> {
    area.draw(&Rectangle::new(rect.corners(), INK.stroke_width(1)))
        .map_err(drawing)
}

/// Draw a resampled profile as a colour band.
///
/// Horizontal bands run left to right, vertical bands top to bottom, in order
/// of increasing distance.
pub(crate) fn draw_band<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: PixelRect,
    horizontal: bool,
    profile: &Profile,
    colormap: Colormap,
    range: &ValueRange,
) -> Result<(), RenderError> {
    let len = if horizontal { rect.width } else { rect.height };
    let values = profile.values();
    let runs = color_runs(len, |j| {
        colormap.color_of(values[sample_at(j, len, values.len())], range)
    });
    fill_runs(area, rect, horizontal, &runs)?;
    outline(area, rect)
}

/// Draw a horizontal colour legend spanning the whole colour scale
pub(crate) fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: PixelRect,
    colormap: Colormap,
) -> Result<(), RenderError> {
    let len = rect.width;
    let runs = color_runs(len, |j| {
        let t = if len > 1 {
            j as f32 / (len - 1) as f32
        } else {
            0.0
        };
        colormap.srgb(t)
    });
    fill_runs(area, rect, true, &runs)?;
    outline(area, rect)
}

/// Min/max annotations and caption around a legend
pub(crate) fn draw_legend_labels<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: PixelRect,
    range: &ValueRange,
) -> Result<(), RenderError> {
    let (_, cy) = rect.center();
    draw_text(
        area,
        &format!("{:.1}", range.min()),
        (rect.x - 8, cy),
        14,
        Pos::new(HPos::Right, VPos::Center),
    )?;
    draw_text(
        area,
        &format!("{:.1}", range.max()),
        (rect.right() + 8, cy),
        14,
        Pos::new(HPos::Left, VPos::Center),
    )?;
    draw_text(
        area,
        "Temperature (°C)",
        (rect.center().0, rect.bottom() + 12),
        14,
        Pos::new(HPos::Center, VPos::Center),
    )
}

/// Draw one line of text in the registered font
pub(crate) fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    at: (i32, i32),
    size: u32,
    anchor: Pos,
) -> Result<(), RenderError> {
    let style = (FONT_FAMILY, size)
        .into_font()
        .color(&INK)
        .pos(anchor);
    area.draw(&Text::new(text, at, style)).map_err(drawing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_runs_merge_equal_neighbours() {
        let runs = color_runs(6, |j| if j < 4 { [1, 2, 3] } else { [9, 9, 9] });
        assert_eq!(runs, vec![(0, 4, [1, 2, 3]), (4, 6, [9, 9, 9])]);
    }

    #[test]
    fn test_color_runs_cover_every_pixel() {
        let runs = color_runs(10, |j| [j as u8, 0, 0]);
        assert_eq!(runs.len(), 10);
        assert_eq!(runs.first().map(|r| r.0), Some(0));
        assert_eq!(runs.last().map(|r| r.1), Some(10));
        assert!(color_runs(0, |_| [0, 0, 0]).is_empty());
    }

    #[test]
    fn test_sample_at_spans_profile() {
        assert_eq!(sample_at(0, 880, 500), 0);
        assert_eq!(sample_at(879, 880, 500), 499);
        assert_eq!(sample_at(440, 881, 501), 250);
        assert_eq!(sample_at(3, 1, 500), 0);
    }
}
