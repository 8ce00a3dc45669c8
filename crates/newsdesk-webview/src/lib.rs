//! Embedded web content runtime for article pages.
//!
//! Wraps the `wry` crate to provide:
//! - A bounded pool of reusable renderers
//! - A two-way script bridge (native handlers <-> page JavaScript)
//! - Cookie synchronization between a shared jar and each renderer
//! - A manager facade for create/recycle/dispose, navigation and scripts

pub mod bridge;
pub mod cookies;
pub mod events;
pub mod manager;
pub mod navigation;
pub mod pool;
pub mod renderer;
pub mod wry_renderer;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{BridgeMessage, Dispatch, ScriptBridge};
pub use cookies::{CookieSync, SharedCookieJar};
pub use events::{EventSink, PageLoadState, WebViewEvent};
pub use manager::{WebViewConfig, WebViewManager};
pub use navigation::NavigationPolicy;
pub use pool::RendererPool;
pub use renderer::{Renderer, RendererFactory, BLANK_DOCUMENT};
pub use wry_renderer::{WryRenderer, WryRendererFactory};
