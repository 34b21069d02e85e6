pub mod insitu;
pub mod subset;

use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};
pub use insitu::insitu;
pub use subset::subset;

/// The folder holding the running executable, or the working directory if
/// that cannot be found.
pub fn default_output_folder() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_credentials_file() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;

    Ok(home
        .join(".copernicusmarine")
        .join(".copernicusmarine-credentials"))
}

// -- Tests -------------------------------------------------------------------
