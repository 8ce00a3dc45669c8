//! Window creation and article view setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use newsdesk_webview::{NavigationPolicy, WebViewConfig, WebViewManager, WryRendererFactory};

use super::bounds::article_bounds;
use super::bridge_handlers;
use super::core::NewsdeskApp;

/// Shown when no article URL was given.
const WELCOME_HTML: &str = "<!DOCTYPE html><html><head><title>Newsdesk</title></head>\
<body style=\"font-family: sans-serif; margin: 3em;\">\
<h1>Newsdesk</h1><p>Pass an article URL on the command line to open it.</p>\
</body></html>";

// =============================================================================
// INITIALIZATION
// =============================================================================

impl NewsdeskApp {
    /// Create the window and the renderer manager.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("Newsdesk")
            .with_inner_size(winit::dpi::LogicalSize::new(1100.0, 800.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let size = window.inner_size();
        let settings = &self.config.webview;
        let factory = WryRendererFactory::new(
            Arc::clone(&window),
            article_bounds(size.width, size.height),
            NavigationPolicy::from_settings(settings),
        )
        .with_page_cache_dir(settings.page_cache_dir.clone());

        self.manager = Some(WebViewManager::new(factory, settings));
        self.window = Some(window);
        tracing::info!(pool_size = settings.pool_size, "Window created and web view manager ready");

        match self.initial_url.take() {
            Some(url) => self.open_article(&url),
            None => self.show_welcome(),
        }
        true
    }

    /// Point the article view at `url`, recycling the previous renderer.
    pub(super) fn open_article(&mut self, url: &str) {
        let Some(manager) = &self.manager else {
            return;
        };
        if let Some(previous) = self.article.take() {
            manager.recycle(previous);
        }

        let mut renderer = match manager.create_or_reuse(None) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(url = %url, "Failed to create article view: {e}");
                return;
            }
        };
        bridge_handlers::register_all(manager, &renderer, self.cache.clone());

        if !manager.load_url(url, &mut renderer) {
            tracing::warn!(url = %url, "Article URL rejected");
        }
        self.article = Some(renderer);
    }

    fn show_welcome(&mut self) {
        let Some(manager) = &self.manager else {
            return;
        };
        let config = WebViewConfig {
            html: Some(WELCOME_HTML.to_string()),
            ..WebViewConfig::from_settings(&self.config.webview)
        };
        match manager.create_or_reuse(Some(&config)) {
            Ok(renderer) => {
                bridge_handlers::register_all(manager, &renderer, self.cache.clone());
                self.article = Some(renderer);
            }
            Err(e) => tracing::error!("Failed to create welcome view: {e}"),
        }
    }
}
