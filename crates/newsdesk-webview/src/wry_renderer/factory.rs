use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use newsdesk_common::{RendererId, WebViewError};
use tracing::{debug, info, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::WebViewBuilder;

use crate::bridge::BRIDGE_INIT_SCRIPT;
use crate::events::EventSink;
use crate::manager::WebViewConfig;
use crate::navigation::NavigationPolicy;
use crate::renderer::{RendererFactory, BLANK_DOCUMENT};

use super::handlers::{
    attach_ipc_handler, attach_navigation_handler, attach_page_load_handler,
    attach_title_handler, HandlerContext,
};
use super::{wry_error, WryRenderer};

/// Builds `WryRenderer`s as children of one parent window.
pub struct WryRendererFactory<W: HasWindowHandle> {
    window: Arc<W>,
    bounds: RefCell<wry::Rect>,
    navigation: NavigationPolicy,
    page_cache_dir: Option<PathBuf>,
}

impl<W: HasWindowHandle> WryRendererFactory<W> {
    pub fn new(window: Arc<W>, bounds: wry::Rect, navigation: NavigationPolicy) -> Self {
        Self {
            window,
            bounds: RefCell::new(bounds),
            navigation,
            page_cache_dir: None,
        }
    }

    /// Directory emptied by `purge_page_caches`.
    pub fn with_page_cache_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.page_cache_dir = dir;
        self
    }

    /// Bounds used for renderers built from now on.
    pub fn set_bounds(&self, bounds: wry::Rect) {
        *self.bounds.borrow_mut() = bounds;
    }
}

impl<W: HasWindowHandle> RendererFactory for WryRendererFactory<W> {
    type Renderer = WryRenderer;

    fn create(
        &self,
        config: &WebViewConfig,
        events: EventSink,
    ) -> Result<WryRenderer, WebViewError> {
        let id = RendererId::new();
        let attached = Arc::new(AtomicBool::new(true));
        let ctx = HandlerContext {
            id,
            events,
            attached: Arc::clone(&attached),
        };

        // Incognito gives every renderer its own cookie store.
        let mut builder = WebViewBuilder::new()
            .with_bounds(self.bounds.borrow().clone())
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_incognito(true)
            .with_focused(false)
            .with_initialization_script(BRIDGE_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = attach_ipc_handler(builder, ctx.clone());
        builder = attach_page_load_handler(builder, ctx.clone());
        builder = attach_title_handler(builder, ctx.clone());
        builder = attach_navigation_handler(builder, ctx, self.navigation.clone());

        let initial_url = match (&config.url, &config.html) {
            (Some(url), _) if self.navigation.is_allowed(url) => {
                builder = builder.with_url(url);
                url.clone()
            }
            (Some(url), html) => {
                warn!(renderer = %id, url = %url, "initial url blocked by allowlist");
                builder = builder.with_html(html.as_deref().unwrap_or(BLANK_DOCUMENT));
                "about:blank".to_string()
            }
            (None, Some(html)) => {
                builder = builder.with_html(html);
                "about:blank".to_string()
            }
            (None, None) => {
                builder = builder.with_html(BLANK_DOCUMENT);
                "about:blank".to_string()
            }
        };

        let webview = builder.build_as_child(&*self.window).map_err(wry_error)?;
        debug!(renderer = %id, url = %initial_url, "web view created");

        Ok(WryRenderer {
            webview,
            id,
            current_url: initial_url,
            attached,
        })
    }

    fn purge_page_caches(&self) -> Result<(), WebViewError> {
        let Some(dir) = &self.page_cache_dir else {
            return Ok(());
        };
        if dir.exists() {
            std::fs::remove_dir_all(dir).map_err(|e| {
                WebViewError::Renderer(format!("purge {}: {e}", dir.display()))
            })?;
        }
        std::fs::create_dir_all(dir)
            .map_err(|e| WebViewError::Renderer(format!("recreate {}: {e}", dir.display())))?;
        info!(path = %dir.display(), "page cache purged");
        Ok(())
    }
}
