//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod cache;
mod logging;
mod webview;

pub use cache::*;
pub use logging::*;
pub use webview::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NewsdeskConfig {
    pub webview: WebViewSettings,
    pub cache: CacheSettings,
    pub logging: LoggingConfig,
}
