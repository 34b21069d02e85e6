//! Reading the CSV tables that drive a run.
//!
//! Column names are the contract: a stations table needs `name`, a locations
//! table needs either `lon`/`lat` or `lon_min`/`lon_max`/`lat_min`/`lat_max`.

pub mod locations;
pub mod stations;

use csv::StringRecord;
use thiserror::Error;

pub use locations::{read_locations, Location};
pub use stations::{read_stations, StationRecord};

/// Input tables whose header lacks the columns a run needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("stations file must contain a `name` column")]
    MissingNameColumn,

    #[error(
        "locations file must contain `lon` and `lat` columns, \
         or `lon_min`, `lon_max`, `lat_min` and `lat_max` columns"
    )]
    MissingCoordinateColumns,
}

// True if every required column appears in the header
fn has_columns(headers: &StringRecord, required: &[&str]) -> bool {
    required
        .iter()
        .all(|column| headers.iter().any(|header| header == *column))
}

fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(reader)
}

// -- Tests -------------------------------------------------------------------
