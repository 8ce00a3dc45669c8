//! Facade over the pool, bridge and cookie sync.
//!
//! `WebViewManager` is the single entry point the UI layer uses to get a
//! renderer, point it at an article, talk to its scripts, and hand it back.
//! It is constructed explicitly by the composition root; nothing here is
//! global.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use newsdesk_config::WebViewSettings;

use crate::bridge::ScriptBridge;
use crate::cookies::{CookieSync, SharedCookieJar};
use crate::events::{EventSink, WebViewEvent};
use crate::navigation::NavigationPolicy;
use crate::pool::RendererPool;
use crate::renderer::RendererFactory;

mod lifecycle;
mod navigation;
mod script;
mod types;

#[cfg(test)]
mod tests;

pub use types::WebViewConfig;

pub struct WebViewManager<F: RendererFactory> {
    factory: F,
    pool: RendererPool<F::Renderer>,
    bridge: Arc<ScriptBridge>,
    cookies: CookieSync,
    navigation: NavigationPolicy,
    /// Event sink: renderer callbacks push here for the host loop to drain.
    events: EventSink,
    default_config: WebViewConfig,
    idle_timeout: Duration,
}

impl<F: RendererFactory> WebViewManager<F> {
    /// Build a manager with a fresh cookie jar.
    pub fn new(factory: F, settings: &WebViewSettings) -> Self {
        Self::with_cookie_jar(factory, settings, SharedCookieJar::new())
    }

    /// Build a manager sharing an existing cookie jar.
    pub fn with_cookie_jar(factory: F, settings: &WebViewSettings, jar: SharedCookieJar) -> Self {
        let bridge = Arc::new(ScriptBridge::new());
        let evict_bridge = Arc::clone(&bridge);
        let pool = RendererPool::new(settings.pool_size).with_evict_hook(move |id| {
            evict_bridge.remove_handlers(id);
        });

        Self {
            factory,
            pool,
            bridge,
            cookies: CookieSync::new(jar),
            navigation: NavigationPolicy::from_settings(settings),
            events: Arc::new(Mutex::new(Vec::new())),
            default_config: WebViewConfig::from_settings(settings),
            idle_timeout: settings.idle_timeout(),
        }
    }

    /// Drain all pending renderer events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn pool(&self) -> &RendererPool<F::Renderer> {
        &self.pool
    }

    pub fn bridge(&self) -> &ScriptBridge {
        &self.bridge
    }

    pub fn cookies(&self) -> &CookieSync {
        &self.cookies
    }

    pub fn navigation(&self) -> &NavigationPolicy {
        &self.navigation
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
