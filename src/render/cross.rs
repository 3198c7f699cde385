use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::band::{draw_band, draw_legend, draw_legend_labels, draw_text, INK};
use super::error::drawing;
use super::font::FONT_FAMILY;
use super::geometry::{band_rect, plot_rect, PixelRect, CENTER_CELL, CROSS_LEGEND};
use super::RenderError;
use crate::colormap::{Colormap, ValueRange};
use crate::resample::Profile;
use crate::series::Side;

/// Line colour of the raw profile plots
const PROFILE_LINE: RGBColor = RGBColor(31, 119, 180);

/// Everything drawn for one side of the cross
pub(crate) struct SidePanel<'a> {
    pub side: Side,
    pub profile: Profile,
    pub distance: &'a [f64],
    pub row: &'a [f64],
}

/// Draw the cross layout: four bands, optional raw profile plots, label and legend
pub(crate) fn draw_cross<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panels: &[SidePanel<'_>],
    label: &str,
    colormap: Colormap,
    range: &ValueRange,
    profiles: bool,
    text: bool,
) -> Result<(), RenderError> {
    for panel in panels {
        draw_band(
            area,
            band_rect(panel.side),
            panel.side.is_horizontal(),
            &panel.profile,
            colormap,
            range,
        )?;
        if profiles {
            draw_profile_plot(area, plot_rect(panel.side), panel.distance, panel.row, range, text)?;
        }
    }

    draw_legend(area, CROSS_LEGEND, colormap)?;

    if text {
        draw_text(
            area,
            label,
            CENTER_CELL.center(),
            30,
            Pos::new(HPos::Center, VPos::Center),
        )?;
        draw_legend_labels(area, CROSS_LEGEND, range)?;
    }

    Ok(())
}

/// Line plot of the raw (not resampled) temperatures against distance
fn draw_profile_plot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: PixelRect,
    distance: &[f64],
    row: &[f64],
    range: &ValueRange,
    text: bool,
) -> Result<(), RenderError> {
    let (Some(&first), Some(&last)) = (distance.first(), distance.last()) else {
        return Ok(());
    };
    let sub = area
        .clone()
        .shrink((rect.x, rect.y), (rect.width, rect.height));

    let mut builder = ChartBuilder::on(&sub);
    if text {
        builder
            .set_label_area_size(LabelAreaPosition::Left, 32)
            .set_label_area_size(LabelAreaPosition::Bottom, 22);
    }
    let mut chart = builder
        .build_cartesian_2d(first..last, range.min()..range.max())
        .map_err(drawing)?;

    if text {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(4)
            .y_labels(3)
            .label_style((FONT_FAMILY, 11).into_font().color(&INK))
            .axis_style(&INK)
            .draw()
            .map_err(drawing)?;
    } else {
        sub.draw(&Rectangle::new(
            [(0, 0), (rect.width - 1, rect.height - 1)],
            INK.stroke_width(1),
        ))
        .map_err(drawing)?;
    }

    // Keep the line inside the plot; the colour scale clips the same way
    let points = distance
        .iter()
        .zip(row)
        .map(|(&d, &v)| (d, v.clamp(range.min(), range.max())));
    chart
        .draw_series(LineSeries::new(points, PROFILE_LINE.stroke_width(2)))
        .map_err(drawing)?;

    Ok(())
}
