use std::sync::Arc;

use newsdesk_common::WebViewError;
use tracing::{debug, info, warn};

use crate::events::{push_event, WebViewEvent};
use crate::renderer::{Renderer, RendererFactory, BLANK_DOCUMENT};

use super::types::WebViewConfig;
use super::WebViewManager;

impl<F: RendererFactory> WebViewManager<F> {
    /// Hand out a renderer, reusing an idle one when the pool has any.
    ///
    /// A reused renderer reloads its current content; `config` only applies
    /// when a new renderer has to be built.
    pub fn create_or_reuse(
        &self,
        config: Option<&WebViewConfig>,
    ) -> Result<F::Renderer, WebViewError> {
        if let Some(mut renderer) = self.pool.acquire() {
            renderer.attach_handlers();
            if let Err(e) = renderer.reload() {
                warn!(renderer = %renderer.id(), error = %e, "reload of pooled renderer failed");
            }
            debug!(renderer = %renderer.id(), "reusing pooled renderer");
            return Ok(renderer);
        }

        let config = config.unwrap_or(&self.default_config);
        let renderer = self.factory.create(config, Arc::clone(&self.events))?;
        info!(renderer = %renderer.id(), "renderer created");
        Ok(renderer)
    }

    /// Release the page a renderer holds and return it to the pool.
    pub fn recycle(&self, mut renderer: F::Renderer) {
        let id = renderer.id();
        if let Err(e) = renderer.stop_loading() {
            debug!(renderer = %id, error = %e, "recycle: stop_loading failed");
        }
        // Cookies are read from the live document, so flush before blanking it.
        self.cookies.flush(&renderer);
        if let Err(e) = renderer.load_html(BLANK_DOCUMENT) {
            debug!(renderer = %id, error = %e, "recycle: clearing content failed");
        }
        self.pool.release(renderer);
        debug!(renderer = %id, "renderer recycled");
    }

    /// Tear a renderer down for good without pooling it.
    pub fn dispose(&self, mut renderer: F::Renderer) {
        let id = renderer.id();
        if let Err(e) = renderer.stop_loading() {
            debug!(renderer = %id, error = %e, "dispose: stop_loading failed");
        }
        self.cookies.flush(&renderer);
        if let Err(e) = renderer.load_html(BLANK_DOCUMENT) {
            debug!(renderer = %id, error = %e, "dispose: clearing content failed");
        }
        renderer.detach_handlers();
        self.bridge.remove_handlers(id);
        drop(renderer);

        push_event(&self.events, WebViewEvent::Closed { renderer: id });
        info!(renderer = %id, "renderer disposed");
    }

    /// React to a system low-memory notification.
    ///
    /// Drops renderers idle longer than the configured timeout and purges the
    /// engine's page-load cache. Returns the number of renderers dropped.
    pub fn handle_memory_pressure(&self) -> usize {
        let removed = self.pool.clear_unused(self.idle_timeout);
        if let Err(e) = self.factory.purge_page_caches() {
            warn!(error = %e, "failed to purge page caches");
        }
        info!(removed, "memory pressure handled");
        removed
    }

    /// Hard reset: tear down every pooled renderer.
    pub fn reset(&self) -> usize {
        let removed = self.pool.clear_all();
        info!(removed, "renderer pool reset");
        removed
    }
}
