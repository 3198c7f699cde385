use super::{PanelSet, SeriesTable};

/// The data a playback run draws frames from
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSource {
    /// One table rendered as a single colour strip
    Strip(SeriesTable),
    /// Four tables rendered in the cross layout
    Panels(PanelSet),
}

impl FrameSource {
    /// Time axis shared by every table of the source
    pub fn times(&self) -> &[f64] {
        match self {
            FrameSource::Strip(table) => table.times(),
            FrameSource::Panels(panels) => panels.times(),
        }
    }

    /// First and last time point
    pub fn time_span(&self) -> (f64, f64) {
        let times = self.times();
        (times[0], times[times.len() - 1])
    }

    /// Names of the underlying tables, in positional order
    pub fn names(&self) -> Vec<String> {
        let name = |t: &SeriesTable| t.name().unwrap_or("<unnamed>").to_string();
        match self {
            FrameSource::Strip(table) => vec![name(table)],
            FrameSource::Panels(panels) => panels.iter().map(|(_, t)| name(t)).collect(),
        }
    }
}

impl From<SeriesTable> for FrameSource {
    fn from(table: SeriesTable) -> Self {
        FrameSource::Strip(table)
    }
}

impl From<PanelSet> for FrameSource {
    fn from(panels: PanelSet) -> Self {
        FrameSource::Panels(panels)
    }
}
