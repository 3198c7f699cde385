use log::debug;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use super::{SeriesError, SeriesTable};

/// Header of the mandatory first column
pub const TIME_COLUMN: &str = "time";

/// Unit suffix written by [`SeriesTable::write_csv`]
pub const DISTANCE_UNIT: &str = "mm";

/// Parse a distance column header such as `"12.5mm"` into `12.5`.
///
/// Any trailing alphabetic unit marker is stripped before the number is parsed.
pub fn parse_distance_header(header: &str) -> Result<f64, SeriesError> {
    let trimmed = header.trim();
    let number = trimmed
        .trim_end_matches(|c: char| c.is_alphabetic())
        .trim_end();
    if number.is_empty() {
        return Err(SeriesError::MalformedInput(format!(
            "distance header '{}' has no numeric value",
            header
        )));
    }
    number.parse::<f64>().map_err(|_| {
        SeriesError::MalformedInput(format!(
            "cannot parse distance header '{}' as a number",
            header
        ))
    })
}

impl SeriesTable {
    /// Load a measurement table from a CSV file.
    ///
    /// The file stem becomes the table name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SeriesError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        Ok(match path.file_stem() {
            Some(stem) => table.with_name(stem.to_string_lossy()),
            None => table,
        })
    }

    /// Parse a measurement table from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeriesError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let first = headers
            .get(0)
            .map(|h| h.trim_start_matches('\u{feff}'))
            .unwrap_or_default();
        if first != TIME_COLUMN {
            return Err(SeriesError::MalformedInput(format!(
                "first column must be '{}', found '{}'",
                TIME_COLUMN, first
            )));
        }

        let distance = headers
            .iter()
            .skip(1)
            .map(parse_distance_header)
            .collect::<Result<Vec<_>, _>>()?;

        let mut times = Vec::new();
        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Blank trailing lines come through as a single empty field
            if record.len() == 1 && record.get(0).map_or(true, str::is_empty) {
                continue;
            }
            if record.len() != headers.len() {
                return Err(SeriesError::MalformedInput(format!(
                    "row {} has {} fields, header has {}",
                    i + 1,
                    record.len(),
                    headers.len()
                )));
            }

            let mut values = record.iter().map(|cell| {
                cell.parse::<f64>().map_err(|_| {
                    SeriesError::MalformedInput(format!(
                        "row {}: '{}' is not a number",
                        i + 1,
                        cell
                    ))
                })
            });
            // `record.len() == headers.len() >= 1`, so the time cell exists
            if let Some(time) = values.next() {
                times.push(time?);
            }
            rows.push(values.collect::<Result<Vec<_>, _>>()?);
        }

        debug!(
            "Parsed measurement table: {} time points x {} distances",
            times.len(),
            distance.len()
        );

        SeriesTable::new(times, distance, rows)
    }

    /// Write the table back out in the input CSV format
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), SeriesError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.distance().len() + 1);
        header.push(TIME_COLUMN.to_string());
        header.extend(
            self.distance()
                .iter()
                .map(|d| format!("{}{}", d, DISTANCE_UNIT)),
        );
        csv_writer.write_record(&header)?;

        for (time, row) in self.times().iter().zip(self.rows()) {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(time.to_string());
            record.extend(row.iter().map(|v| v.to_string()));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table to a CSV file
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), SeriesError> {
        let file = File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }
}
