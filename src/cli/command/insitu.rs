//! Download in-situ station history files and save them to disk.

use std::{
    fmt,
    fs,
    path::Path,
};

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    cli::{create_progress_bar, InsituArgs},
    download::{download_file, http_client, station_url, DownloadOutcome, DownloadTarget},
    reading::{read_stations, StationRecord},
};

use super::default_output_folder;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub saved: usize,
    pub failed: usize,
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} station files downloaded",
            self.saved,
            self.saved + self.failed
        )
    }
}

pub async fn insitu(args: &InsituArgs) -> Result<DownloadSummary> {
    let stations = read_stations(&args.stations_file)?;

    let output_folder = args
        .output_folder
        .clone()
        .unwrap_or_else(default_output_folder);
    fs::create_dir_all(&output_folder)
        .with_context(|| format!("Failed to create {}", output_folder.display()))?;

    let client = http_client()?;
    download_stations(&client, &stations, &args.base_url, &output_folder).await
}

/// Downloads each station's file in order. A station the server does not
/// answer with 200 is reported and skipped.
pub async fn download_stations(
    client: &Client,
    stations: &[StationRecord],
    base_url: &str,
    output_folder: &Path,
) -> Result<DownloadSummary> {
    let pb = create_progress_bar(stations.len() as u64, "Downloading station files...".to_string());
    let mut summary = DownloadSummary::default();

    for station in stations {
        let target = DownloadTarget::new(station_url(base_url, &station.name), output_folder);
        pb.suspend(|| info!("Downloading {} to {}", target.url, target.path.display()));

        match download_file(client, &target).await? {
            DownloadOutcome::Saved { .. } => summary.saved += 1,
            DownloadOutcome::Failed(status) => {
                pb.suspend(|| warn!("Failed to download {}, status: {}", target.url, status));
                summary.failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Station files downloaded");

    Ok(summary)
}

// -- Tests -------------------------------------------------------------------
