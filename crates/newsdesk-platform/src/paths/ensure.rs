use std::fs;

use newsdesk_common::PlatformError;

use super::resolve::{cache_dir, config_dir};

/// Creates the config and cache directories if they do not already exist.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    fs::create_dir_all(config_dir()?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    fs::create_dir_all(cache_dir()?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    tracing::debug!("platform directories ensured");
    Ok(())
}
