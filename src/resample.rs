//! Resampling of sparse temperature rows onto a dense, uniform distance grid.

use std::cmp::Ordering;

use crate::series::SeriesError;

/// Number of samples in a dense profile
pub const DENSE_SAMPLES: usize = 500;

/// Temperature profile on a uniform distance grid
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    start: f64,
    end: f64,
    values: Vec<f64>,
}

impl Profile {
    /// Distance of the first sample
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Distance of the last sample
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Sampled temperatures, evenly spaced from `start` to `end`
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the profile holds no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distance of sample `i`
    pub fn position(&self, i: usize) -> f64 {
        grid_point(self.start, self.end, i, self.values.len())
    }
}

/// Resample `row` (aligned to `distance`) onto [`DENSE_SAMPLES`] evenly spaced points
pub fn resample(distance: &[f64], row: &[f64]) -> Result<Profile, SeriesError> {
    resample_to(distance, row, DENSE_SAMPLES)
}

/// Resample `row` onto `samples` evenly spaced points spanning the distance range.
///
/// Piecewise-linear; no extrapolation is ever needed since the grid shares the
/// bounds of `distance`.
pub fn resample_to(distance: &[f64], row: &[f64], samples: usize) -> Result<Profile, SeriesError> {
    if distance.len() < 2 {
        return Err(SeriesError::DegenerateSeries(format!(
            "resampling needs at least 2 distance points, got {}",
            distance.len()
        )));
    }
    if row.len() != distance.len() {
        return Err(SeriesError::DegenerateSeries(format!(
            "row has {} values for {} distance points",
            row.len(),
            distance.len()
        )));
    }
    if samples < 2 {
        return Err(SeriesError::DegenerateSeries(format!(
            "cannot resample onto {} points",
            samples
        )));
    }
    if distance.windows(2).any(|w| w[0] > w[1]) {
        return Err(SeriesError::DegenerateSeries(
            "distance must be sorted ascending".to_string(),
        ));
    }

    let start = distance[0];
    let end = distance[distance.len() - 1];
    if end.partial_cmp(&start) != Some(Ordering::Greater) {
        return Err(SeriesError::DegenerateSeries(format!(
            "distance span is empty ({} .. {})",
            start, end
        )));
    }

    let mut values = Vec::with_capacity(samples);
    let mut k = 0;
    for i in 0..samples {
        let x = grid_point(start, end, i, samples);
        while k + 2 < distance.len() && distance[k + 1] < x {
            k += 1;
        }
        let (x0, x1) = (distance[k], distance[k + 1]);
        let (y0, y1) = (row[k], row[k + 1]);
        let v = if x1 > x0 {
            y0 + (y1 - y0) * ((x - x0) / (x1 - x0)).clamp(0.0, 1.0)
        } else {
            y1
        };
        values.push(v);
    }

    Ok(Profile { start, end, values })
}

fn grid_point(start: f64, end: f64, i: usize, samples: usize) -> f64 {
    if samples < 2 || i + 1 >= samples {
        return end;
    }
    start + (end - start) * i as f64 / (samples - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_length_and_bounds() {
        let profile = resample(&[0.0, 10.0], &[40.0, 60.0]).unwrap();
        assert_eq!(profile.len(), DENSE_SAMPLES);
        assert_eq!(profile.values()[0], 40.0);
        assert_eq!(profile.values()[DENSE_SAMPLES - 1], 60.0);
        assert_eq!(profile.position(0), 0.0);
        assert_eq!(profile.position(DENSE_SAMPLES - 1), 10.0);
    }

    #[test]
    fn test_linear_interpolation() {
        let profile = resample_to(&[0.0, 1.0, 3.0], &[10.0, 20.0, 0.0], 7).unwrap();
        // grid: 0, 0.5, 1, 1.5, 2, 2.5, 3
        let expected = [10.0, 15.0, 20.0, 15.0, 10.0, 5.0, 0.0];
        for (got, want) in profile.values().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
    }

    #[test]
    fn test_uniform_row_stays_uniform() {
        let profile = resample(&[0.0, 10.0], &[50.0, 50.0]).unwrap();
        assert!(profile.values().iter().all(|&v| v == 50.0));
    }

    #[test]
    fn test_idempotent_on_dense_grid() {
        let first = resample(&[0.0, 2.0, 7.0, 10.0], &[41.0, 47.5, 44.0, 58.0]).unwrap();
        let grid: Vec<f64> = (0..first.len()).map(|i| first.position(i)).collect();
        let second = resample(&grid, first.values()).unwrap();
        assert_eq!(second.len(), first.len());
        for (a, b) in first.values().iter().zip(second.values()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_distance_is_degenerate() {
        assert!(matches!(
            resample(&[5.0], &[42.0]),
            Err(SeriesError::DegenerateSeries(_))
        ));
    }

    #[test]
    fn test_zero_span_and_mismatch_rejected() {
        assert!(matches!(
            resample(&[3.0, 3.0], &[40.0, 41.0]),
            Err(SeriesError::DegenerateSeries(_))
        ));
        assert!(matches!(
            resample(&[0.0, 1.0], &[40.0]),
            Err(SeriesError::DegenerateSeries(_))
        ));
        assert!(matches!(
            resample(&[1.0, 0.0], &[40.0, 41.0]),
            Err(SeriesError::DegenerateSeries(_))
        ));
        assert!(resample(&[0.0, f64::NAN], &[40.0, 41.0]).is_err());
    }
}
