//! Downloads station history files over HTTP.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Error, Result};
use futures::StreamExt;
use reqwest::{Client, StatusCode};

/// Directory of the in-situ near-real-time history files.
pub const DEFAULT_BASE_URL: &str =
    "https://data-marineinsitu.ifremer.fr/glo_multiparameter_nrt/history/MO/";

const CHUNK_SIZE: usize = 8192;
const TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the client used for every station in a run.
pub fn http_client() -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(TIMEOUT)
        .read_timeout(TIMEOUT)
        .build()?;

    Ok(client)
}

/// URL of a station's history file. Plain concatenation: `base_url` is
/// expected to end with `/`.
pub fn station_url(base_url: &str, station_name: &str) -> String {
    format!("{}{}.nc", base_url, station_name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A URL and where its body is written.
pub struct DownloadTarget {
    pub url: String,
    pub path: PathBuf,
}

impl DownloadTarget {
    /// The file is named after the last path segment of the URL.
    pub fn new(url: String, output_folder: &Path) -> Self {
        let file_name = url.rsplit('/').next().unwrap_or_default();
        let path = output_folder.join(file_name);

        DownloadTarget { url, path }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { bytes: u64 },
    Failed(StatusCode),
}

/// Streams the target URL to its path if the server answers 200, replacing
/// any existing file. Any other status leaves the filesystem untouched.
pub async fn download_file(client: &Client, target: &DownloadTarget) -> Result<DownloadOutcome, Error> {
    let response = client
        .get(&target.url)
        .send()
        .await
        .with_context(|| format!("Failed to request {}", target.url))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Ok(DownloadOutcome::Failed(status));
    }

    let file = File::create(&target.path)
        .with_context(|| format!("Failed to create {}", target.path.display()))?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut bytes = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("Error reading body of {}", target.url))?;
        writer.write_all(&chunk)?;
        bytes += chunk.len() as u64;
    }
    writer.flush()?;

    Ok(DownloadOutcome::Saved { bytes })
}

// -- Tests -------------------------------------------------------------------
