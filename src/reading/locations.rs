//! Location tables: either points (`lon`, `lat`) or areas (`lon_min`,
//! `lon_max`, `lat_min`, `lat_max`).

use std::{fmt, fs::File, io::Read, path::Path};

use anyhow::{Context, Result};
use csv::StringRecord;
use serde::Deserialize;

use super::{csv_reader, has_columns, InputError};
use crate::subsetter::BoundingBox;

const POINT_COLUMNS: [&str; 2] = ["lon", "lat"];
const AREA_COLUMNS: [&str; 4] = ["lon_min", "lon_max", "lat_min", "lat_max"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How every row of a locations table is read. Chosen once from the header.
pub enum LocationMode {
    Points,
    Areas,
}

impl LocationMode {
    /// Point columns are checked first, so a table carrying both column sets
    /// is read as points.
    pub fn detect(headers: &StringRecord) -> Result<Self, InputError> {
        if has_columns(headers, &POINT_COLUMNS) {
            Ok(LocationMode::Points)
        } else if has_columns(headers, &AREA_COLUMNS) {
            Ok(LocationMode::Areas)
        } else {
            Err(InputError::MissingCoordinateColumns)
        }
    }
}

impl fmt::Display for LocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationMode::Points => write!(f, "points"),
            LocationMode::Areas => write!(f, "areas"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Location {
    Point {
        lon: f64,
        lat: f64,
    },
    Area {
        lon_min: f64,
        lon_max: f64,
        lat_min: f64,
        lat_max: f64,
    },
}

impl Location {
    /// A point gives a box with equal minimum and maximum; an area is passed
    /// through as given.
    pub fn bounding_box(&self) -> BoundingBox {
        match *self {
            Location::Point { lon, lat } => BoundingBox::point(lon, lat),
            Location::Area {
                lon_min,
                lon_max,
                lat_min,
                lat_max,
            } => BoundingBox {
                minimum_longitude: lon_min,
                maximum_longitude: lon_max,
                minimum_latitude: lat_min,
                maximum_latitude: lat_max,
            },
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Point { lon, lat } => write!(f, "point: {lon}, {lat}"),
            Location::Area {
                lon_min,
                lon_max,
                lat_min,
                lat_max,
            } => write!(f, "area: {lon_min}-{lon_max}, {lat_min}-{lat_max}"),
        }
    }
}

#[derive(Deserialize)]
struct PointRow {
    lon: f64,
    lat: f64,
}

#[derive(Deserialize)]
struct AreaRow {
    lon_min: f64,
    lon_max: f64,
    lat_min: f64,
    lat_max: f64,
}

impl From<PointRow> for Location {
    fn from(row: PointRow) -> Self {
        Location::Point {
            lon: row.lon,
            lat: row.lat,
        }
    }
}

impl From<AreaRow> for Location {
    fn from(row: AreaRow) -> Self {
        Location::Area {
            lon_min: row.lon_min,
            lon_max: row.lon_max,
            lat_min: row.lat_min,
            lat_max: row.lat_max,
        }
    }
}

/// Reads the locations table at `path`.
pub fn read_locations(path: &Path) -> Result<(LocationMode, Vec<Location>)> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open locations file `{}`", path.display()))?;

    read_locations_from_reader(file)
        .with_context(|| format!("Failed to read locations file `{}`", path.display()))
}

/// Detects the mode from the header, then reads every row in that mode.
/// Every row is parsed before anything is returned.
pub fn read_locations_from_reader<R: Read>(reader: R) -> Result<(LocationMode, Vec<Location>)> {
    let mut rdr = csv_reader(reader);
    let mode = LocationMode::detect(rdr.headers()?)?;

    let locations = match mode {
        LocationMode::Points => rdr
            .deserialize::<PointRow>()
            .map(|row| row.map(Location::from))
            .collect::<Result<Vec<_>, _>>()?,
        LocationMode::Areas => rdr
            .deserialize::<AreaRow>()
            .map(|row| row.map(Location::from))
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok((mode, locations))
}

// -- Tests -------------------------------------------------------------------
