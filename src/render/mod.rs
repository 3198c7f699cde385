//! # Frame Rendering
//!
//! Turns one sample of a [`FrameSource`] into an RGB image.
//!
//! ## Layouts
//!
//! - **Strip**: one horizontal colour band with distance ticks, a title and a
//!   horizontal colour legend.
//! - **Cross**: four bands around a central time label (top and bottom
//!   horizontal, left and right vertical) sharing one legend, optionally with
//!   a line plot of each raw profile on the outer side of its band.
//!
//! Every frame is drawn with plotters into a pixel buffer owned by the render
//! call. The drawing context lives in an inner scope and is gone on every exit
//! path before the buffer becomes the frame image. Output is deterministic for
//! identical inputs.

mod band;
mod cross;
mod error;
mod font;
pub mod geometry;
mod strip;


use image::codecs::png::PngEncoder;
use image::{ImageError, ImageResult, RgbImage, RgbaImage};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub use error::RenderError;
pub use font::{text_available, FontSource, FONT_FAMILY};

use crate::colormap::{Colormap, ValueRange};
use crate::config::PlaybackConfig;
use crate::resample::resample;
use crate::series::{FrameSource, PanelSet, SeriesTable};
use cross::SidePanel;
use error::drawing;

/// Arrangement of bands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderLayout {
    /// One horizontal strip
    Strip,
    /// Four bands around a central label
    Cross {
        /// Draw a raw profile plot next to each band
        profiles: bool,
    },
}

/// Caption shown on every frame
pub fn format_time_label(time: f64) -> String {
    format!("Time = {:.1} s", time)
}

/// One rendered image and the time it represents
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbImage,
    label: String,
    time: f64,
    index: usize,
}

impl Frame {
    /// Rendered pixels
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Caption, e.g. `Time = 1.0 s`
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Recorded time of the sample shown
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Index of the sample shown
    pub fn index(&self) -> usize {
        self.index
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Take the pixels out of the frame
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Copy with an opaque alpha channel, as animation encoders expect
    pub fn to_rgba(&self) -> RgbaImage {
        image::DynamicImage::ImageRgb8(self.image.clone()).into_rgba8()
    }

    /// Encode as PNG
    pub fn write_png<W: Write>(&self, writer: W) -> ImageResult<()> {
        self.image.write_with_encoder(PngEncoder::new(writer))
    }

    /// Encode as PNG into a file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let file = File::create(path).map_err(ImageError::IoError)?;
        let mut writer = BufWriter::new(file);
        self.write_png(&mut writer)?;
        writer.flush().map_err(ImageError::IoError)
    }
}

/// Renders frames for one layout, colour scale and value range
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    layout: RenderLayout,
    colormap: Colormap,
    range: ValueRange,
    text: bool,
}

impl FrameRenderer {
    /// Create a renderer, drawing text if a font is already registered
    pub fn new(layout: RenderLayout, colormap: Colormap, range: ValueRange) -> Self {
        Self {
            layout,
            colormap,
            range,
            text: text_available(),
        }
    }

    /// Renderer for a playback configuration, registering a font from `fonts`
    pub fn from_config(config: &PlaybackConfig, fonts: &FontSource) -> Result<Self, RenderError> {
        let text = fonts.install()?;
        Ok(Self {
            layout: config.variant.layout(),
            colormap: config.colormap,
            range: config.value_range,
            text,
        })
    }

    /// Skip every text element
    pub fn without_text(mut self) -> Self {
        self.text = false;
        self
    }

    /// Layout this renderer draws
    pub fn layout(&self) -> RenderLayout {
        self.layout
    }

    /// Colour scale
    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    /// Colour normalization range
    pub fn value_range(&self) -> ValueRange {
        self.range
    }

    /// Whether text elements are drawn
    pub fn draws_text(&self) -> bool {
        self.text
    }

    /// Render sample `index` of `source`
    pub fn render(&self, source: &FrameSource, index: usize) -> Result<Frame, RenderError> {
        match (self.layout, source) {
            (RenderLayout::Strip, FrameSource::Strip(table)) => self.render_strip(table, index),
            (RenderLayout::Cross { .. }, FrameSource::Panels(panels)) => {
                self.render_panels(panels, index)
            }
            (RenderLayout::Strip, FrameSource::Panels(_)) => Err(RenderError::LayoutMismatch(
                "strip layout needs a single table, got four panels".to_string(),
            )),
            (RenderLayout::Cross { .. }, FrameSource::Strip(_)) => {
                Err(RenderError::LayoutMismatch(
                    "cross layout needs four panel tables, got one".to_string(),
                ))
            }
        }
    }

    /// Render sample `index` of one table as a strip
    pub fn render_strip(&self, table: &SeriesTable, index: usize) -> Result<Frame, RenderError> {
        let (time, row) = sample(table, index)?;
        let profile = resample(table.distance(), row)?;
        let label = format_time_label(time);

        let image = paint(geometry::STRIP_SIZE, |area| {
            strip::draw_strip(area, &profile, &label, self.colormap, &self.range, self.text)
        })?;

        debug!("Rendered strip frame {} ({})", index, label);
        Ok(Frame {
            image,
            label,
            time,
            index,
        })
    }

    /// Render sample `index` of four panels in the cross layout
    pub fn render_panels(&self, panels: &PanelSet, index: usize) -> Result<Frame, RenderError> {
        let profiles = matches!(self.layout, RenderLayout::Cross { profiles: true });

        let mut time = 0.0;
        let mut sides = Vec::with_capacity(4);
        for (side, table) in panels.iter() {
            let (t, row) = sample(table, index)?;
            time = t;
            sides.push(SidePanel {
                side,
                profile: resample(table.distance(), row)?,
                distance: table.distance(),
                row,
            });
        }
        let label = format_time_label(time);

        let image = paint(geometry::CROSS_SIZE, |area| {
            cross::draw_cross(
                area,
                &sides,
                &label,
                self.colormap,
                &self.range,
                profiles,
                self.text,
            )
        })?;

        debug!("Rendered cross frame {} ({})", index, label);
        Ok(Frame {
            image,
            label,
            time,
            index,
        })
    }
}

fn sample(table: &SeriesTable, index: usize) -> Result<(f64, &[f64]), RenderError> {
    let out_of_range = || RenderError::IndexOutOfRange {
        index,
        len: table.len(),
    };
    let time = table.times().get(index).copied().ok_or_else(out_of_range)?;
    let row = table.row(index).ok_or_else(out_of_range)?;
    Ok((time, row))
}

/// Run `draw` on a white canvas of `size` and return the pixels
fn paint<F>(size: (u32, u32), draw: F) -> Result<RgbImage, RenderError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), RenderError>,
{
    let (width, height) = size;
    let mut buffer = vec![255u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;
        draw(&root)?;
        root.present().map_err(drawing)?;
    }
    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::Drawing("pixel buffer does not match canvas size".to_string()))
}
