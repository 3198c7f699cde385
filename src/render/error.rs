use crate::series::SeriesError;

/// Errors that can occur while rendering a frame
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The drawing backend rejected an operation
    #[error("Drawing error: {0}")]
    Drawing(String),

    /// A font could not be loaded or registered
    #[error("Font error: {0}")]
    Font(String),

    /// The profile could not be prepared for drawing
    #[error("Series error: {0}")]
    SeriesError(#[from] SeriesError),

    /// The layout does not fit the kind of frame source
    #[error("Layout mismatch: {0}")]
    LayoutMismatch(String),

    /// Requested a sample index the source does not have
    #[error("Sample index {index} out of range for {len} time points")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of time points
        len: usize,
    },
}

/// Map any plotters error into [`RenderError::Drawing`]
pub(crate) fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}
