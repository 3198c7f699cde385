//! Colour scales mapping normalized values to sRGB.
//!
//! The matplotlib scales (viridis, plasma, magma, inferno) and turbo use
//! polynomial fits; jet, rainbow and seismic follow their analytic or
//! piecewise-linear definitions; cividis interpolates a handful of anchors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Named colour scale
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Perceptually uniform, dark purple to yellow
    #[default]
    Plasma,
    /// Perceptually uniform, dark blue to yellow
    Viridis,
    /// Perceptually uniform, black to pale yellow through red
    Inferno,
    /// Perceptually uniform, black to pale pink
    Magma,
    /// Colour-vision-deficiency friendly blue to yellow
    Cividis,
    /// Classic blue-cyan-yellow-red
    Jet,
    /// Purple through red rainbow
    Rainbow,
    /// Diverging dark blue, white, dark red
    Seismic,
    /// Improved rainbow
    Turbo,
    /// Black to white
    Grayscale,
}

impl Colormap {
    /// Every available scale
    pub const ALL: [Colormap; 10] = [
        Colormap::Plasma,
        Colormap::Viridis,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Cividis,
        Colormap::Jet,
        Colormap::Rainbow,
        Colormap::Seismic,
        Colormap::Turbo,
        Colormap::Grayscale,
    ];

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Plasma => "plasma",
            Colormap::Viridis => "viridis",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Cividis => "cividis",
            Colormap::Jet => "jet",
            Colormap::Rainbow => "rainbow",
            Colormap::Seismic => "seismic",
            Colormap::Turbo => "turbo",
            Colormap::Grayscale => "grayscale",
        }
    }

    /// Colour at normalized position `t`; values outside `[0, 1]` are clamped
    pub fn srgb(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let rgb = match self {
            Colormap::Plasma => polynomial(&PLASMA, t),
            Colormap::Viridis => polynomial(&VIRIDIS, t),
            Colormap::Inferno => polynomial(&INFERNO, t),
            Colormap::Magma => polynomial(&MAGMA, t),
            Colormap::Cividis => anchors(&CIVIDIS, t),
            Colormap::Jet => jet(t),
            Colormap::Rainbow => rainbow(t),
            Colormap::Seismic => anchors(&SEISMIC, t),
            Colormap::Turbo => turbo(t),
            Colormap::Grayscale => [t, t, t],
        };
        to_u8(rgb)
    }

    /// Colour of `value` after normalization through `range`
    pub fn color_of(&self, value: f64, range: &ValueRange) -> [u8; 3] {
        self.srgb(range.normalize(value))
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let wanted = if wanted == "greyscale" || wanted == "gray" {
            "grayscale".to_string()
        } else {
            wanted
        };
        Colormap::ALL
            .iter()
            .find(|c| c.name() == wanted)
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = Colormap::ALL.iter().map(|c| c.name()).collect();
                ConfigError::InvalidConfiguration(format!(
                    "unknown colormap '{}'. Valid options: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Fixed temperature range used to normalize values before colour mapping
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Create a range; `min` must be strictly below `max` and both finite
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidConfiguration(format!(
                "value range must satisfy min < max, got {} .. {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Range from constant bounds the caller guarantees to be ordered
    pub(crate) const fn from_bounds(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower bound, maps to colour position 0.0
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound, maps to colour position 1.0
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Position of `value` inside the range, clipped to `[0, 1]`
    pub fn normalize(&self, value: f64) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        (((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)) as f32
    }

    /// Value at normalized position `t`
    pub fn denormalize(&self, t: f32) -> f64 {
        self.min + f64::from(t) * (self.max - self.min)
    }
}

fn to_u8(rgb: [f32; 3]) -> [u8; 3] {
    // `as u8` saturates, which also absorbs small polynomial overshoot
    rgb.map(|c| (c * 255.0 + 0.5) as u8)
}

// Polynomials fitted to the matplotlib colormaps (CC0), degree 6, Horner form.
// Data fitted from https://github.com/BIDS/colormap (CC0).

type Poly = [[f32; 3]; 7];

const VIRIDIS: Poly = [
    [0.277_727_33, 0.005_407_344_5, 0.334_099_8],
    [0.105_093_04, 1.404_613_5, 1.384_590_2],
    [-0.330_861_83, 0.214_847_56, 0.095_095_16],
    [-4.634_230_5, -5.799_101, -19.332_441],
    [6.228_27, 14.179_933, 56.690_55],
    [4.776_385, -13.745_145, -65.353_03],
    [-5.435_456, 4.645_852_6, 26.312_435],
];

const PLASMA: Poly = [
    [0.058_732_344, 0.023_336_709, 0.543_340_2],
    [2.176_514_6, 0.238_383_42, 0.753_960_45],
    [-2.689_460_5, -7.455_851, 3.110_8],
    [6.130_348_4, 42.346_188, -28.518_855],
    [-11.107_436, -82.666_31, 60.139_847],
    [10.023_066, 71.413_62, -54.072_186],
    [-3.658_713_8, -22.931_534, 18.191_908],
];

const MAGMA: Poly = [
    [-0.002_136_485, -0.000_749_655, -0.005_386_128],
    [0.251_660_54, 0.677_523_2, 2.494_026_6],
    [8.353_717, -3.577_719_4, 0.314_467_9],
    [-27.668_733, 14.264_731, -13.649_213],
    [52.176_14, -27.943_607, 12.944_169],
    [-50.768_524, 29.046_583, 4.234_153],
    [18.655_705, -11.489_774, -5.601_961_6],
];

const INFERNO: Poly = [
    [0.000_218_940_37, 0.001_651_004_6, -0.019_480_899],
    [0.106_513_42, 0.563_956_4, 3.932_712_3],
    [11.602_493, -3.972_854, -15.942_394],
    [-41.703_995, 17.436_398, 44.354_145],
    [77.162_94, -33.402_36, -81.807_31],
    [-71.319_43, 32.626_064, 73.209_52],
    [25.131_126, -12.242_669, -23.070_325],
];

fn polynomial(c: &Poly, t: f32) -> [f32; 3] {
    let mut out = [0.0f32; 3];
    for (ch, value) in out.iter_mut().enumerate() {
        *value = c
            .iter()
            .rev()
            .fold(0.0, |acc, coefficients| acc * t + coefficients[ch]);
    }
    out
}

/// Polynomial approximation of Turbo (Anton Mikhailov, Apache-2.0)
fn turbo(t: f32) -> [f32; 3] {
    const R: [f32; 6] = [0.135_721_38, 4.615_392_6, -42.660_324, 132.131_08, -152.942_4, 59.286_38];
    const G: [f32; 6] = [0.091_402_61, 2.194_188_4, 4.842_966_6, -14.185_033, 4.277_298_6, 2.829_566];
    const B: [f32; 6] = [0.106_673_3, 12.641_946, -60.582_05, 110.362_77, -89.903_11, 27.348_25];
    let powers = [1.0, t, t * t, t * t * t, t * t * t * t, t * t * t * t * t];
    let dot = |c: &[f32; 6]| c.iter().zip(powers).map(|(a, b)| a * b).sum::<f32>();
    [dot(&R), dot(&G), dot(&B)]
}

fn jet(t: f32) -> [f32; 3] {
    let channel = |offset: f32| (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
    [channel(3.0), channel(2.0), channel(1.0)]
}

fn rainbow(t: f32) -> [f32; 3] {
    use std::f32::consts::PI;
    [
        (2.0 * t - 0.5).abs().min(1.0),
        (t * PI).sin().max(0.0),
        (t * PI / 2.0).cos().max(0.0),
    ]
}

type Anchor = (f32, [f32; 3]);

const SEISMIC: [Anchor; 5] = [
    (0.0, [0.0, 0.0, 0.3]),
    (0.25, [0.0, 0.0, 1.0]),
    (0.5, [1.0, 1.0, 1.0]),
    (0.75, [1.0, 0.0, 0.0]),
    (1.0, [0.5, 0.0, 0.0]),
];

const CIVIDIS: [Anchor; 5] = [
    (0.0, [0.0, 0.135, 0.305]),
    (0.25, [0.251, 0.302, 0.424]),
    (0.5, [0.486, 0.482, 0.471]),
    (0.75, [0.737, 0.686, 0.435]),
    (1.0, [0.996, 0.910, 0.220]),
];

fn anchors(points: &[Anchor], t: f32) -> [f32; 3] {
    let upper = points
        .iter()
        .position(|(at, _)| *at >= t)
        .unwrap_or(points.len() - 1);
    if upper == 0 {
        return points[0].1;
    }
    let (t0, c0) = points[upper - 1];
    let (t1, c1) = points[upper];
    let f = (t - t0) / (t1 - t0);
    [
        c0[0] + (c1[0] - c0[0]) * f,
        c0[1] + (c1[1] - c0[1]) * f,
        c0[2] + (c1[2] - c0[2]) * f,
    ]
}
