//! Newsdesk configuration system.
//!
//! Provides TOML-based configuration for the web-content runtime: renderer
//! pooling, the content cache, and logging. Every section uses defaults so
//! partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use newsdesk_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("pool size: {}", config.webview.pool_size);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    CacheSettings, LogLevel, LoggingConfig, NewsdeskConfig, WebViewSettings,
    CONFIG_SCHEMA_VERSION,
};

use newsdesk_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a default `config.toml` if none exists.
pub fn load_config() -> Result<NewsdeskConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &NewsdeskConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
