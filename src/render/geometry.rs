//! Fixed canvas geometry for both layouts.
//!
//! All rectangles are in pixels, origin at the top-left corner.

use crate::series::Side;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl PixelRect {
    /// Construct a rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre pixel
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Upper-left and lower-right corners, as plotters expects them
    pub fn corners(&self) -> [(i32, i32); 2] {
        [(self.x, self.y), (self.right(), self.bottom())]
    }
}

/// Strip canvas size
pub const STRIP_SIZE: (u32, u32) = (1000, 240);

/// Horizontal colour band of the strip layout
pub const STRIP_BAND: PixelRect = PixelRect::new(60, 40, 880, 90);

/// Colour legend of the strip layout
pub const STRIP_LEGEND: PixelRect = PixelRect::new(200, 185, 600, 18);

/// Cross canvas size: a 3x3 grid of square cells above the legend
pub const CROSS_SIZE: (u32, u32) = (900, 980);

/// Edge length of one grid cell
pub const CELL: i32 = 300;

/// Thickness of a cross band
pub const BAND_THICKNESS: i32 = 60;

/// Inner padding of a cell
pub const PAD: i32 = 10;

/// Colour legend of the cross layout
pub const CROSS_LEGEND: PixelRect = PixelRect::new(150, 920, 600, 24);

/// Central cell holding the time label
pub const CENTER_CELL: PixelRect = PixelRect::new(CELL, CELL, CELL, CELL);

/// Band of one side, hugging the central cell
pub(crate) fn band_rect(side: Side) -> PixelRect {
    let long = CELL - 2 * PAD;
    match side {
        Side::Top => PixelRect::new(CELL + PAD, CELL - PAD - BAND_THICKNESS, long, BAND_THICKNESS),
        Side::Bottom => PixelRect::new(CELL + PAD, 2 * CELL + PAD, long, BAND_THICKNESS),
        Side::Left => PixelRect::new(CELL - PAD - BAND_THICKNESS, CELL + PAD, BAND_THICKNESS, long),
        Side::Right => PixelRect::new(2 * CELL + PAD, CELL + PAD, BAND_THICKNESS, long),
    }
}

/// Line plot area of one side, on the outer part of the band's cell
pub(crate) fn plot_rect(side: Side) -> PixelRect {
    let long = CELL - 2 * PAD;
    let short = CELL - 3 * PAD - BAND_THICKNESS;
    match side {
        Side::Top => PixelRect::new(CELL + PAD, PAD, long, short),
        Side::Bottom => PixelRect::new(CELL + PAD, 2 * CELL + 2 * PAD + BAND_THICKNESS, long, short),
        Side::Left => PixelRect::new(PAD, CELL + PAD, short, long),
        Side::Right => PixelRect::new(2 * CELL + 2 * PAD + BAND_THICKNESS, CELL + PAD, short, long),
    }
}
