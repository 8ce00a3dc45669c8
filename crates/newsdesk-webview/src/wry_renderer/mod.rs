//! `Renderer` backed by a native `wry` web view.

mod factory;
mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cookie::Cookie;
use newsdesk_common::{RendererId, WebViewError};
use tracing::debug;
use wry::http::header::{HeaderValue, COOKIE};
use wry::http::HeaderMap;
use wry::WebView;

use crate::renderer::{Renderer, ScriptCallback};

pub use factory::WryRendererFactory;

/// Handle to one native web view.
pub struct WryRenderer {
    webview: WebView,
    id: RendererId,
    /// Current URL (best-effort tracking).
    current_url: String,
    /// Shared with the delegate callbacks; events are dropped while false.
    attached: Arc<AtomicBool>,
}

impl WryRenderer {
    /// Set the web view bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), WebViewError> {
        self.webview.set_bounds(bounds).map_err(wry_error)
    }
}

impl Renderer for WryRenderer {
    fn id(&self) -> RendererId {
        self.id
    }

    fn current_url(&self) -> &str {
        &self.current_url
    }

    fn load_url(&mut self, url: &str, cookies: &[Cookie<'static>]) -> Result<(), WebViewError> {
        match cookie_header(cookies) {
            Some(header) => {
                let value = HeaderValue::from_str(&header)
                    .map_err(|e| WebViewError::Renderer(format!("cookie header: {e}")))?;
                let mut headers = HeaderMap::new();
                headers.insert(COOKIE, value);
                self.webview
                    .load_url_with_headers(url, headers)
                    .map_err(wry_error)?;
            }
            None => self.webview.load_url(url).map_err(wry_error)?,
        }
        self.current_url = url.to_string();
        Ok(())
    }

    fn load_html(&mut self, html: &str) -> Result<(), WebViewError> {
        self.webview.load_html(html).map_err(wry_error)?;
        self.current_url = "about:blank".to_string();
        Ok(())
    }

    fn reload(&self) -> Result<(), WebViewError> {
        self.evaluate_script("window.location.reload();")
    }

    fn stop_loading(&self) -> Result<(), WebViewError> {
        self.evaluate_script("window.stop();")
    }

    fn evaluate_script(&self, js: &str) -> Result<(), WebViewError> {
        self.webview.evaluate_script(js).map_err(wry_error)
    }

    fn evaluate_script_with_callback(
        &self,
        js: &str,
        callback: ScriptCallback,
    ) -> Result<(), WebViewError> {
        self.webview
            .evaluate_script_with_callback(js, callback)
            .map_err(wry_error)
    }

    fn attach_handlers(&mut self) {
        self.attached.store(true, Ordering::SeqCst);
        debug!(renderer = %self.id, "handlers attached");
    }

    fn detach_handlers(&mut self) {
        self.attached.store(false, Ordering::SeqCst);
        debug!(renderer = %self.id, "handlers detached");
    }

    fn clear_browsing_data(&self) -> Result<(), WebViewError> {
        self.webview.clear_all_browsing_data().map_err(wry_error)
    }
}

pub(crate) fn wry_error(e: wry::Error) -> WebViewError {
    WebViewError::Renderer(e.to_string())
}

/// `Cookie` request header value for a navigation, if any cookies apply.
fn cookie_header(cookies: &[Cookie<'static>]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|c| c.stripped().to_string())
            .collect::<Vec<_>>()
            .join("; "),
    )
}
