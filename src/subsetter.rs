//! Requests dataset subsets from the Copernicus Marine service.
//!
//! The service is reached through the Copernicus Marine Toolbox command line
//! client, which owns authentication, subsetting and writing the output files.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Geographic bounds of one request, in degrees.
pub struct BoundingBox {
    pub minimum_longitude: f64,
    pub maximum_longitude: f64,
    pub minimum_latitude: f64,
    pub maximum_latitude: f64,
}

impl BoundingBox {
    pub fn point(lon: f64, lat: f64) -> Self {
        BoundingBox {
            minimum_longitude: lon,
            maximum_longitude: lon,
            minimum_latitude: lat,
            maximum_latitude: lat,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Everything about a subset request except its bounds. Fixed for a run.
pub struct SubsetSettings {
    pub dataset_id: String,
    pub dataset_version: String,
    pub variables: Vec<String>,
    pub start_datetime: String,
    pub end_datetime: String,
    pub minimum_depth: f64,
    pub maximum_depth: f64,
    pub coordinates_selection_method: String,
    pub disable_progress_bar: bool,
    pub credentials_file: PathBuf,
}

impl SubsetSettings {
    pub fn request_for(&self, bounds: BoundingBox) -> SubsetRequest<'_> {
        SubsetRequest {
            settings: self,
            bounds,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SubsetRequest<'a> {
    pub settings: &'a SubsetSettings,
    pub bounds: BoundingBox,
}

/// Something that can fulfil a subset request.
pub trait Subsetter {
    async fn subset(&self, request: &SubsetRequest<'_>) -> Result<()>;
}

/// Runs `copernicusmarine subset` once per request and waits for it to exit.
#[derive(Debug, Clone)]
pub struct CopernicusMarineToolbox {
    program: PathBuf,
}

impl CopernicusMarineToolbox {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CopernicusMarineToolbox {
            program: program.into(),
        }
    }
}

impl Subsetter for CopernicusMarineToolbox {
    async fn subset(&self, request: &SubsetRequest<'_>) -> Result<()> {
        let status = Command::new(&self.program)
            .args(toolbox_args(request))
            .status()
            .await
            .with_context(|| {
                format!(
                    "Failed to launch `{}`; is the Copernicus Marine Toolbox installed?",
                    self.program.display()
                )
            })?;

        if !status.success() {
            bail!("`{} subset` failed: {}", self.program.display(), status);
        }

        Ok(())
    }
}

/// Command line for one `copernicusmarine subset` call.
pub fn toolbox_args(request: &SubsetRequest<'_>) -> Vec<String> {
    let settings = request.settings;
    let bounds = request.bounds;

    let mut args = vec![
        "subset".to_string(),
        "--dataset-id".to_string(),
        settings.dataset_id.clone(),
        "--dataset-version".to_string(),
        settings.dataset_version.clone(),
    ];

    for variable in &settings.variables {
        args.push("--variable".to_string());
        args.push(variable.clone());
    }

    args.extend([
        "--minimum-longitude".to_string(),
        bounds.minimum_longitude.to_string(),
        "--maximum-longitude".to_string(),
        bounds.maximum_longitude.to_string(),
        "--minimum-latitude".to_string(),
        bounds.minimum_latitude.to_string(),
        "--maximum-latitude".to_string(),
        bounds.maximum_latitude.to_string(),
        "--start-datetime".to_string(),
        settings.start_datetime.clone(),
        "--end-datetime".to_string(),
        settings.end_datetime.clone(),
        "--minimum-depth".to_string(),
        settings.minimum_depth.to_string(),
        "--maximum-depth".to_string(),
        settings.maximum_depth.to_string(),
        "--coordinates-selection-method".to_string(),
        settings.coordinates_selection_method.clone(),
        "--credentials-file".to_string(),
        settings.credentials_file.display().to_string(),
    ]);

    if settings.disable_progress_bar {
        args.push("--disable-progress-bar".to_string());
    }

    args
}

// -- Tests -------------------------------------------------------------------
