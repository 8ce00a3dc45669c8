//! Navigation allowlist shared by the manager and renderer navigation handlers.

use std::sync::Arc;

use newsdesk_config::WebViewSettings;

/// URL prefixes a renderer may navigate to. Everything else is blocked.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    prefixes: Arc<[String]>,
}

impl NavigationPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_settings(settings: &WebViewSettings) -> Self {
        Self::new(settings.allowed_nav_prefixes.iter().cloned())
    }

    /// Check whether a URL is allowed by the allowlist.
    pub fn is_allowed(&self, url: &str) -> bool {
        self.prefixes.iter().any(|prefix| url.starts_with(prefix.as_str()))
    }
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self::from_settings(&WebViewSettings::default())
    }
}
