//! Station tables: one station name per row under a `name` column.

use std::{fs::File, io::Read, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{csv_reader, has_columns, InputError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A station whose history file is fetched, e.g. `NO_TS_MO_6600366`.
pub struct StationRecord {
    pub name: String,
}

/// Reads the station table at `path`.
pub fn read_stations(path: &Path) -> Result<Vec<StationRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open stations file `{}`", path.display()))?;

    read_stations_from_reader(file)
        .with_context(|| format!("Failed to read stations file `{}`", path.display()))
}

/// Reads a station table, failing before any row is read if there is no
/// `name` column. Names are trimmed of surrounding whitespace.
pub fn read_stations_from_reader<R: Read>(reader: R) -> Result<Vec<StationRecord>> {
    let mut rdr = csv_reader(reader);

    if !has_columns(rdr.headers()?, &["name"]) {
        return Err(InputError::MissingNameColumn.into());
    }

    let mut stations = Vec::new();
    for record in rdr.deserialize() {
        let mut station: StationRecord = record?;
        station.name = station.name.trim().to_string();
        stations.push(station);
    }

    Ok(stations)
}

// -- Tests -------------------------------------------------------------------
