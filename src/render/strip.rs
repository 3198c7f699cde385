use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::band::{draw_band, draw_legend, draw_legend_labels, draw_text, INK};
use super::error::drawing;
use super::geometry::{STRIP_BAND, STRIP_LEGEND, STRIP_SIZE};
use super::RenderError;
use crate::colormap::{Colormap, ValueRange};
use crate::resample::Profile;

/// Number of distance ticks under the band
const DISTANCE_TICKS: i32 = 5;

/// Tick length in pixels
const TICK_LENGTH: i32 = 6;

/// Draw the single-strip layout: title, band, distance ticks and legend
pub(crate) fn draw_strip<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    profile: &Profile,
    label: &str,
    colormap: Colormap,
    range: &ValueRange,
    text: bool,
) -> Result<(), RenderError> {
    draw_band(area, STRIP_BAND, true, profile, colormap, range)?;
    draw_legend(area, STRIP_LEGEND, colormap)?;

    let top = STRIP_BAND.bottom();
    for k in 0..DISTANCE_TICKS {
        let frac = f64::from(k) / f64::from(DISTANCE_TICKS - 1);
        let x = STRIP_BAND.x + (frac * f64::from(STRIP_BAND.width - 1)).round() as i32;
        area.draw(&PathElement::new(
            vec![(x, top), (x, top + TICK_LENGTH)],
            INK.stroke_width(1),
        ))
        .map_err(drawing)?;

        if text {
            let distance = profile.start() + frac * (profile.end() - profile.start());
            draw_text(
                area,
                &format!("{:.1}", distance),
                (x, top + TICK_LENGTH + 10),
                13,
                Pos::new(HPos::Center, VPos::Center),
            )?;
        }
    }

    if text {
        draw_text(
            area,
            label,
            (STRIP_SIZE.0 as i32 / 2, STRIP_BAND.y / 2),
            20,
            Pos::new(HPos::Center, VPos::Center),
        )?;
        draw_text(
            area,
            "Distance (mm)",
            (STRIP_BAND.right(), top + TICK_LENGTH + 26),
            13,
            Pos::new(HPos::Right, VPos::Center),
        )?;
        draw_legend_labels(area, STRIP_LEGEND, range)?;
    }

    Ok(())
}
