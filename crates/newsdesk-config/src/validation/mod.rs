//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod cache;
mod helpers;
mod webview;


use crate::schema::NewsdeskConfig;
use newsdesk_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &NewsdeskConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    webview::validate_webview(&mut errors, config);
    cache::validate_cache(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
