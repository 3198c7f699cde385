//! # Measurement Series
//!
//! In-memory representation of temperature-vs-distance measurement files.
//!
//! ## Input format
//!
//! ```text
//! time,0mm,12.5mm,25mm
//! 0.0,40.1,41.3,39.8
//! 0.1,40.4,41.9,40.0
//! ```
//!
//! The first column header must be exactly `time` and hold strictly ascending
//! values. Every other header is a numeric distance followed by a unit marker
//! (`mm`, `cm`, ...), which is stripped. All cells are temperatures.
//!
//! A [`SeriesTable`] is built once at load time and never mutated afterwards.
//! Four tables tagged top/bottom/left/right form a [`PanelSet`]; either kind
//! is wrapped in a [`FrameSource`] for playback.

mod csv_io;
mod error;
mod panels;
mod source;
mod table;

#[cfg(test)]
mod tests;

pub use csv_io::parse_distance_header;
pub use error::SeriesError;
pub use panels::{PanelSet, Side};
pub use source::FrameSource;
pub use table::{SeriesSummary, SeriesTable};
