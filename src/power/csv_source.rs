//! Power series loading from CSV files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::warn;

use super::PowerSourceError;
use crate::finance::types::PowerSeries;

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Deserialize)]
struct Row {
    timestamp: String,
    power_w: Option<f64>,
}

/// Reads a power series from a CSV file with a `timestamp,power_w` header.
///
/// # Errors
///
/// Returns a [`PowerSourceError`] if the file cannot be opened or any row is
/// malformed.
pub fn load_csv(path: &Path) -> Result<PowerSeries, PowerSourceError> {
    let file = File::open(path).map_err(|source| PowerSourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_csv(file)
}

/// Reads a power series as CSV from any reader.
///
/// Empty `power_w` cells are zero-filled; the number of filled cells is
/// logged as a warning.
///
/// # Errors
///
/// Returns a [`PowerSourceError`] on CSV syntax errors, unparseable
/// timestamps, or values rejected by [`PowerSeries::new`].
pub fn read_csv(reader: impl Read) -> Result<PowerSeries, PowerSourceError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut timestamps = Vec::new();
    let mut watts = Vec::new();
    let mut zero_filled = 0_usize;

    for (line, record) in rdr.deserialize::<Row>().enumerate() {
        let row = record?;
        timestamps.push(parse_timestamp(&row.timestamp, line + 2)?);
        watts.push(row.power_w.unwrap_or_else(|| {
            zero_filled += 1;
            0.0
        }));
    }

    if zero_filled > 0 {
        warn!(zero_filled, "missing power values replaced with 0 W");
    }

    Ok(PowerSeries::new(timestamps, watts)?)
}

fn parse_timestamp(raw: &str, line: usize) -> Result<NaiveDateTime, PowerSourceError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| PowerSourceError::Timestamp {
            line,
            value: raw.to_string(),
        })
}
