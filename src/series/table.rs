use serde::{Deserialize, Serialize};
use std::fmt;

use super::SeriesError;
use crate::sequencer::nearest_index;

/// One parsed measurement file: a temperature profile per time point
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    name: Option<String>,
    times: Vec<f64>,
    distance: Vec<f64>,
    /// Row-major, `times.len()` rows of `distance.len()` values
    temperature: Vec<f64>,
}

impl SeriesTable {
    /// Build a table from its axes and rows, validating the table invariants.
    ///
    /// - `times` must be non-empty, finite and strictly ascending
    /// - `distance` must be non-empty, finite and sorted ascending
    /// - every row must hold exactly `distance.len()` finite values
    pub fn new(
        times: Vec<f64>,
        distance: Vec<f64>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, SeriesError> {
        if distance.is_empty() {
            return Err(SeriesError::MalformedInput(
                "no distance columns after `time`".to_string(),
            ));
        }
        if times.is_empty() {
            return Err(SeriesError::DegenerateSeries(
                "table has no time points".to_string(),
            ));
        }
        if rows.len() != times.len() {
            return Err(SeriesError::MalformedInput(format!(
                "{} time points but {} temperature rows",
                times.len(),
                rows.len()
            )));
        }
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(SeriesError::MalformedInput(format!(
                "time value {} is not finite",
                t
            )));
        }
        if let Some(pos) = times.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SeriesError::MalformedInput(format!(
                "time column must be strictly ascending (row {}: {} then {})",
                pos + 2,
                times[pos],
                times[pos + 1]
            )));
        }
        if let Some(d) = distance.iter().find(|d| !d.is_finite()) {
            return Err(SeriesError::MalformedInput(format!(
                "distance {} is not finite",
                d
            )));
        }
        if distance.windows(2).any(|w| w[0] > w[1]) {
            return Err(SeriesError::MalformedInput(
                "distance columns must be sorted ascending".to_string(),
            ));
        }

        let width = distance.len();
        let mut temperature = Vec::with_capacity(width * rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(SeriesError::MalformedInput(format!(
                    "row {} has {} values, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
            if let Some(v) = row.iter().find(|v| !v.is_finite()) {
                return Err(SeriesError::MalformedInput(format!(
                    "row {} holds a non-finite temperature ({})",
                    i + 1,
                    v
                )));
            }
            temperature.extend(row);
        }

        Ok(Self {
            name: None,
            times,
            distance,
            temperature,
        })
    }

    /// Attach a display name (usually the file stem)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, if one was attached
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Time axis, strictly ascending
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Distance axis, sorted ascending
    pub fn distance(&self) -> &[f64] {
        &self.distance
    }

    /// Number of time points
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a validated table; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Temperature profile at time index `index`
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let width = self.distance.len();
        let start = index.checked_mul(width)?;
        self.temperature.get(start..start + width)
    }

    /// Iterate over all temperature profiles in time order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.temperature.chunks_exact(self.distance.len())
    }

    /// First and last time point
    pub fn time_span(&self) -> (f64, f64) {
        (self.times[0], self.times[self.times.len() - 1])
    }

    /// Smallest and largest distance
    pub fn distance_span(&self) -> (f64, f64) {
        (self.distance[0], self.distance[self.distance.len() - 1])
    }

    /// Smallest and largest temperature over the whole table
    pub fn temperature_span(&self) -> (f64, f64) {
        self.temperature
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Index of the time point closest to `time` (ties resolve to the lower index)
    pub fn nearest_index(&self, time: f64) -> usize {
        nearest_index(&self.times, time)
    }

    /// Compact description of the table
    pub fn summary(&self) -> SeriesSummary {
        let (time_start, time_end) = self.time_span();
        let (distance_min, distance_max) = self.distance_span();
        let (temperature_min, temperature_max) = self.temperature_span();
        SeriesSummary {
            name: self.name.clone(),
            time_points: self.times.len(),
            time_start,
            time_end,
            distance_points: self.distance.len(),
            distance_min,
            distance_max,
            temperature_min,
            temperature_max,
        }
    }
}

/// Summary statistics of a [`SeriesTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Table name, if known
    pub name: Option<String>,
    /// Number of time points
    pub time_points: usize,
    /// First time point
    pub time_start: f64,
    /// Last time point
    pub time_end: f64,
    /// Number of distance columns
    pub distance_points: usize,
    /// Smallest distance
    pub distance_min: f64,
    /// Largest distance
    pub distance_max: f64,
    /// Coldest reading
    pub temperature_min: f64,
    /// Hottest reading
    pub temperature_max: f64,
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} time points ({:.2} .. {:.2} s), {} distances ({:.2} .. {:.2} mm), {:.2} .. {:.2} °C",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.time_points,
            self.time_start,
            self.time_end,
            self.distance_points,
            self.distance_min,
            self.distance_max,
            self.temperature_min,
            self.temperature_max
        )
    }
}
