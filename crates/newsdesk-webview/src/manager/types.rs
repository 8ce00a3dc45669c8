use newsdesk_config::WebViewSettings;

/// Configuration for building a new renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct WebViewConfig {
    /// Initial URL to load (mutually exclusive with `html`).
    pub url: Option<String>,
    /// Initial HTML content to render (mutually exclusive with `url`).
    pub html: Option<String>,
    /// Whether the background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools.
    pub devtools: bool,
    pub user_agent: Option<String>,
    pub clipboard: bool,
    /// Whether media may autoplay. Off by default for article pages.
    pub autoplay: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some("Newsdesk/0.1".to_string()),
            clipboard: true,
            autoplay: false,
        }
    }
}

impl WebViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Create a config that renders inline HTML.
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    /// Default preferences taken from the `[webview]` config section.
    pub fn from_settings(settings: &WebViewSettings) -> Self {
        Self {
            transparent: settings.transparent,
            devtools: settings.devtools,
            user_agent: settings.user_agent.clone(),
            ..Default::default()
        }
    }
}
