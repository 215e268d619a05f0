//! Power series sources standing in for the external power model.

/// CSV power series loader.
pub mod csv_source;
/// Seeded synthetic wind power.
pub mod synthetic;

use thiserror::Error;

use crate::finance::error::SeriesError;

pub use csv_source::{load_csv, read_csv};
pub use synthetic::SyntheticWind;

/// Failure while obtaining a power series.
#[derive(Debug, Error)]
pub enum PowerSourceError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed power csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("unparseable timestamp \"{value}\" on line {line}")]
    Timestamp { line: usize, value: String },

    #[error(transparent)]
    Series(#[from] SeriesError),
}
