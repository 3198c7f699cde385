/// Errors that can occur while loading or validating measurement series
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// I/O error reading a measurement file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV transport error (bad quoting, invalid UTF-8, ...)
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The file does not have the shape of a measurement table
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The series is too small to be resampled or played back
    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),

    /// Panel inputs do not share one time axis
    #[error("Mismatched time axes: {0}")]
    MismatchedAxes(String),
}
