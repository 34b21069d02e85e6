//! Command line interface.

pub mod command;

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::download::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download in-situ station history files listed in a CSV
    Insitu(InsituArgs),
    /// Request a dataset subset for each point or area listed in a CSV
    Subset(SubsetArgs),
}

#[derive(Args, Debug)]
pub struct InsituArgs {
    /// CSV file with a `name` column of station names
    #[arg(long = "stations_file")]
    pub stations_file: PathBuf,

    /// Folder the files are saved to [default: the folder holding this executable]
    #[arg(long = "output_folder")]
    pub output_folder: Option<PathBuf>,

    /// Base URL of the data directory
    #[arg(long = "base_url", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Args, Debug)]
pub struct SubsetArgs {
    /// CSV file with `lon`, `lat` or `lon_min`, `lon_max`, `lat_min`, `lat_max` columns
    #[arg(long = "locations_file")]
    pub locations_file: PathBuf,

    #[arg(long = "dataset_id")]
    pub dataset_id: String,

    #[arg(long = "dataset_version")]
    pub dataset_version: String,

    /// Variables to download, e.g. `sla so thetao`
    #[arg(long = "variables", num_args = 1.., required = true)]
    pub variables: Vec<String>,

    /// ISO 8601 date or datetime, forwarded as given
    #[arg(long = "start_datetime", default_value = "1993-01-01T00:00:00", value_parser = parse_datetime)]
    pub start_datetime: String,

    /// ISO 8601 date or datetime, forwarded as given
    #[arg(long = "end_datetime", default_value = "2023-12-31T00:00:00", value_parser = parse_datetime)]
    pub end_datetime: String,

    #[arg(long = "min_depth", default_value_t = 0.51)]
    pub min_depth: f64,

    #[arg(long = "max_depth", default_value_t = 30.0)]
    pub max_depth: f64,

    /// Whether returned grid cells must lie strictly inside the requested bounds
    #[arg(long = "coordinates_selection_method", default_value = "strict-inside")]
    pub coordinates_selection_method: String,

    #[arg(long = "disable_progress_bar")]
    pub disable_progress_bar: bool,

    /// [default: ~/.copernicusmarine/.copernicusmarine-credentials]
    #[arg(long = "credentials_file")]
    pub credentials_file: Option<PathBuf>,

    /// Copernicus Marine Toolbox executable
    #[arg(long = "toolbox", default_value = "copernicusmarine")]
    pub toolbox: PathBuf,
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Checks that `s` is an ISO 8601 date or datetime (RFC 3339 offsets and
/// fractional seconds included) and returns it unchanged.
pub fn parse_datetime(s: &str) -> Result<String, String> {
    let is_datetime = DateTime::parse_from_rfc3339(s).is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok();

    if is_datetime {
        Ok(s.to_string())
    } else {
        Err(format!(
            "`{s}` is not an ISO 8601 date (YYYY-MM-DD) or datetime (YYYY-MM-DDTHH:MM[:SS][.f][Z|±HH:MM])"
        ))
    }
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}

// -- Tests -------------------------------------------------------------------
