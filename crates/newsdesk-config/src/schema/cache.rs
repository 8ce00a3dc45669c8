//! Content cache configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Content cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Subdirectory of the platform cache dir holding the entry files.
    pub category: String,
    /// Lifetime of an entry stored without an explicit expiry
    /// (valid range: 1-604800).
    pub default_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            category: "html".to_string(),
            default_ttl_secs: 3600,
        }
    }
}

impl CacheSettings {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}
