//! Request a dataset subset for every location in a table.

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    cli::SubsetArgs,
    reading::{read_locations, Location},
    subsetter::{SubsetSettings, Subsetter},
};

use super::default_credentials_file;

pub async fn subset<S: Subsetter>(args: &SubsetArgs, subsetter: &S) -> Result<usize> {
    let (mode, locations) = read_locations(&args.locations_file)?;
    let settings = settings_from_args(args)?;

    info!(
        "Requesting {} {} from {} ({})",
        locations.len(),
        mode,
        settings.dataset_id,
        settings.dataset_version
    );

    request_subsets(&settings, &locations, subsetter).await
}

/// Run-wide request parameters, resolved once.
pub fn settings_from_args(args: &SubsetArgs) -> Result<SubsetSettings> {
    let credentials_file = match &args.credentials_file {
        Some(path) => path.clone(),
        None => default_credentials_file()?,
    };

    Ok(SubsetSettings {
        dataset_id: args.dataset_id.clone(),
        dataset_version: args.dataset_version.clone(),
        variables: args.variables.clone(),
        start_datetime: args.start_datetime.clone(),
        end_datetime: args.end_datetime.clone(),
        minimum_depth: args.min_depth,
        maximum_depth: args.max_depth,
        coordinates_selection_method: args.coordinates_selection_method.clone(),
        disable_progress_bar: args.disable_progress_bar,
        credentials_file,
    })
}

/// Requests each location in order. The first failure ends the run.
pub async fn request_subsets<S: Subsetter>(
    settings: &SubsetSettings,
    locations: &[Location],
    subsetter: &S,
) -> Result<usize> {
    for location in locations {
        info!("Downloading {}", location);

        subsetter
            .subset(&settings.request_for(location.bounding_box()))
            .await
            .with_context(|| format!("Subset request failed for {}", location))?;
    }

    Ok(locations.len())
}

// -- Tests -------------------------------------------------------------------
