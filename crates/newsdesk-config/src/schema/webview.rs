//! Renderer pool and web view configuration types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Web view and renderer pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSettings {
    /// Maximum number of idle renderers kept for reuse (valid range: 0-16).
    pub pool_size: usize,
    /// Idle renderers older than this are dropped on memory pressure
    /// (valid range: 10-3600).
    pub idle_timeout_secs: u64,
    pub user_agent: Option<String>,
    pub devtools: bool,
    pub transparent: bool,
    /// URL prefixes a renderer may navigate to.
    pub allowed_nav_prefixes: Vec<String>,
    /// Directory holding the engine's HTTP cache, purged on memory pressure.
    pub page_cache_dir: Option<PathBuf>,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            pool_size: 3,
            idle_timeout_secs: 300,
            user_agent: Some("Newsdesk/0.1".to_string()),
            devtools: cfg!(debug_assertions),
            transparent: false,
            allowed_nav_prefixes: vec![
                "https://".to_string(),
                "about:blank".to_string(),
            ],
            page_cache_dir: None,
        }
    }
}

impl WebViewSettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
