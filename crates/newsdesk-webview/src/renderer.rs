//! The seam between the runtime and a concrete web view.
//!
//! Renderer operations must run on the UI thread that owns the web view.
//! Nothing here re-marshals calls; `WryRenderer` is `!Send`, so the compiler
//! keeps it on the thread that built it.

use cookie::Cookie;
use newsdesk_common::{RendererId, WebViewError};

use crate::events::EventSink;
use crate::manager::WebViewConfig;

/// Document loaded into a renderer to release the previous page.
pub const BLANK_DOCUMENT: &str = "<html><body></body></html>";

/// Callback receiving the raw, engine-serialized result of a script.
pub type ScriptCallback = Box<dyn Fn(String) + Send + 'static>;

/// A live instance that can display web content and run JavaScript.
pub trait Renderer {
    /// Identity issued at creation; stable for the renderer's lifetime.
    fn id(&self) -> RendererId;

    /// Last URL handed to `load_url` (or `about:blank`).
    fn current_url(&self) -> &str;

    /// Navigate to `url`, sending `cookies` with the initial request.
    fn load_url(&mut self, url: &str, cookies: &[Cookie<'static>]) -> Result<(), WebViewError>;

    fn load_html(&mut self, html: &str) -> Result<(), WebViewError>;

    fn reload(&self) -> Result<(), WebViewError>;

    /// Stop any in-flight navigation or resource loads.
    fn stop_loading(&self) -> Result<(), WebViewError>;

    /// Fire-and-forget script evaluation.
    fn evaluate_script(&self, js: &str) -> Result<(), WebViewError>;

    fn evaluate_script_with_callback(
        &self,
        js: &str,
        callback: ScriptCallback,
    ) -> Result<(), WebViewError>;

    /// Route delegate callbacks (load, title, bridge, navigation) to the sink.
    fn attach_handlers(&mut self);

    /// Null out delegate callbacks so nothing further reaches the host.
    fn detach_handlers(&mut self);

    /// Drop this renderer's cookie and session state.
    fn clear_browsing_data(&self) -> Result<(), WebViewError>;
}

/// Builds renderers for the manager.
pub trait RendererFactory {
    type Renderer: Renderer;

    fn create(
        &self,
        config: &WebViewConfig,
        events: EventSink,
    ) -> Result<Self::Renderer, WebViewError>;

    /// Purge the engine's HTTP/disk cache used by page loads.
    fn purge_page_caches(&self) -> Result<(), WebViewError> {
        Ok(())
    }
}

/// Full teardown for a renderer that will not be reused.
///
/// Failures are logged and ignored; the renderer is being discarded anyway.
pub(crate) fn teardown<R: Renderer>(renderer: &mut R) {
    let id = renderer.id();
    if let Err(e) = renderer.stop_loading() {
        tracing::debug!(renderer = %id, error = %e, "teardown: stop_loading failed");
    }
    renderer.detach_handlers();
    if let Err(e) = renderer.clear_browsing_data() {
        tracing::debug!(renderer = %id, error = %e, "teardown: clear_browsing_data failed");
    }
}
