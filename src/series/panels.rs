use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::{SeriesError, SeriesTable};

/// Tolerance when comparing time axes of panel inputs
const AXIS_TOLERANCE: f64 = 1e-9;

/// Position of a panel in the four-directional cross layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Band above the central label
    Top,
    /// Band below the central label
    Bottom,
    /// Vertical band left of the central label
    Left,
    /// Vertical band right of the central label
    Right,
}

impl Side {
    /// All sides, in positional input order
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// File-name token identifying this side
    pub fn token(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Top and bottom bands run horizontally, left and right vertically
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Detect a side from a file name such as `run3_left.csv`.
    ///
    /// The stem is split on non-alphabetic characters and each piece is compared
    /// case-insensitively against the side tokens. Returns `None` when no token
    /// or more than one distinct token is present.
    pub fn from_file_name(name: &str) -> Option<Side> {
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let mut found = None;
        for word in stem.split(|c: char| !c.is_alphabetic()) {
            if let Some(side) = Side::ALL.iter().find(|s| s.token() == word) {
                match found {
                    Some(existing) if existing != *side => return None,
                    _ => found = Some(*side),
                }
            }
        }
        found
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Side::ALL
            .iter()
            .find(|side| side.token() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Unknown side '{}'. Valid options: top, bottom, left, right", s))
    }
}

/// Four measurement tables sharing one time axis
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSet {
    top: SeriesTable,
    bottom: SeriesTable,
    left: SeriesTable,
    right: SeriesTable,
}

impl PanelSet {
    /// Combine four tables, checking that their time axes are identical
    pub fn new(
        top: SeriesTable,
        bottom: SeriesTable,
        left: SeriesTable,
        right: SeriesTable,
    ) -> Result<Self, SeriesError> {
        let panels = Self {
            top,
            bottom,
            left,
            right,
        };
        panels.check_axes()?;
        Ok(panels)
    }

    /// Load four CSV files.
    ///
    /// Files are matched to sides by the `top`/`bottom`/`left`/`right` tokens in
    /// their names. When none of the names carries a token, the files are taken
    /// positionally in the order top, bottom, left, right.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, SeriesError> {
        if paths.len() != Side::ALL.len() {
            return Err(SeriesError::MalformedInput(format!(
                "panel layout needs exactly 4 files, got {}",
                paths.len()
            )));
        }

        let names: Vec<String> = paths
            .iter()
            .map(|p| {
                p.as_ref()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect();
        let order = assign_sides(&names)?;

        let mut slots: [Option<SeriesTable>; 4] = [None, None, None, None];
        for (path, side) in paths.iter().zip(order) {
            debug!("Loading {} panel from {}", side, path.as_ref().display());
            slots[slot(side)] = Some(SeriesTable::from_path(path)?);
        }

        let [Some(top), Some(bottom), Some(left), Some(right)] = slots else {
            return Err(SeriesError::MalformedInput(
                "could not assign every panel side".to_string(),
            ));
        };
        let panels = Self::new(top, bottom, left, right)?;
        info!(
            "Loaded panel set: {} time points per side",
            panels.times().len()
        );
        Ok(panels)
    }

    /// Table for one side
    pub fn get(&self, side: Side) -> &SeriesTable {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Iterate over `(side, table)` in positional order
    pub fn iter(&self) -> impl Iterator<Item = (Side, &SeriesTable)> + '_ {
        Side::ALL.iter().map(move |&side| (side, self.get(side)))
    }

    /// The shared time axis
    pub fn times(&self) -> &[f64] {
        self.top.times()
    }

    fn check_axes(&self) -> Result<(), SeriesError> {
        let reference = self.top.times();
        for (side, table) in self.iter().skip(1) {
            let times = table.times();
            if times.len() != reference.len() {
                return Err(SeriesError::MismatchedAxes(format!(
                    "{} panel has {} time points, top panel has {}",
                    side,
                    times.len(),
                    reference.len()
                )));
            }
            if let Some(i) = times
                .iter()
                .zip(reference)
                .position(|(a, b)| (a - b).abs() > AXIS_TOLERANCE)
            {
                return Err(SeriesError::MismatchedAxes(format!(
                    "{} panel time {} differs from top panel time {} at row {}",
                    side,
                    times[i],
                    reference[i],
                    i + 1
                )));
            }
        }
        Ok(())
    }
}

fn slot(side: Side) -> usize {
    match side {
        Side::Top => 0,
        Side::Bottom => 1,
        Side::Left => 2,
        Side::Right => 3,
    }
}

/// Decide which side each named file feeds
fn assign_sides(names: &[String]) -> Result<Vec<Side>, SeriesError> {
    let detected: Vec<Option<Side>> = names.iter().map(|n| Side::from_file_name(n)).collect();

    if detected.iter().all(Option::is_none) {
        return Ok(Side::ALL.to_vec());
    }

    let mut sides = Vec::with_capacity(names.len());
    for (name, side) in names.iter().zip(&detected) {
        match side {
            Some(side) if !sides.contains(side) => sides.push(*side),
            Some(side) => {
                return Err(SeriesError::MalformedInput(format!(
                    "more than one file names the {} panel ('{}')",
                    side, name
                )))
            }
            None => {
                return Err(SeriesError::MalformedInput(format!(
                    "cannot tell which panel '{}' belongs to; name every file with top/bottom/left/right or none of them",
                    name
                )))
            }
        }
    }
    Ok(sides)
}
