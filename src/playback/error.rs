use crate::config::ConfigError;
use crate::render::RenderError;
use crate::series::SeriesError;

/// Errors that can occur during playback or export
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// Export finished without a single frame
    #[error("Nothing to export: the sequence produced no frames")]
    EmptyExport,

    /// Invalid configuration snapshot
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// The frame source could not be sampled
    #[error("Series error: {0}")]
    SeriesError(#[from] SeriesError),

    /// A frame could not be rendered
    #[error("Render error: {0}")]
    RenderError(#[from] RenderError),

    /// Image encoding failed
    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error writing output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The display target refused a frame
    #[error("Display error: {0}")]
    Display(String),

    /// The configured variant does not fit the frame source
    #[error("Variant mismatch: {0}")]
    VariantMismatch(String),
}
