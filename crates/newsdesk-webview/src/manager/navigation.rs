use newsdesk_common::WebViewError;
use tracing::{debug, warn};
use url::Url;

use crate::renderer::{Renderer, RendererFactory};

use super::WebViewManager;

impl<F: RendererFactory> WebViewManager<F> {
    /// Start navigating `renderer` to `url`.
    ///
    /// Returns whether the navigation was issued. `true` does not mean the
    /// page loaded; completion arrives later as `WebViewEvent::PageLoad`.
    /// Unparseable and non-allowlisted URLs are rejected with `false`.
    pub fn load_url(&self, url: &str, renderer: &mut F::Renderer) -> bool {
        match self.try_load_url(url, renderer) {
            Ok(()) => true,
            Err(e) => {
                warn!(renderer = %renderer.id(), url = %url, error = %e, "navigation rejected");
                false
            }
        }
    }

    /// `load_url` with the rejection reason.
    pub fn try_load_url(&self, url: &str, renderer: &mut F::Renderer) -> Result<(), WebViewError> {
        let parsed = Url::parse(url).map_err(|e| WebViewError::InvalidUrl(format!("{url}: {e}")))?;

        if !self.navigation.is_allowed(parsed.as_str()) {
            return Err(WebViewError::NavigationBlocked(parsed.to_string()));
        }

        let cookies = self.cookies.cookies_for_navigation(&parsed);
        renderer.load_url(parsed.as_str(), &cookies)?;
        debug!(renderer = %renderer.id(), url = %parsed, cookies = cookies.len(), "navigation issued");
        Ok(())
    }
}
