//! Renderer event types.

use std::sync::{Arc, Mutex};

use newsdesk_common::RendererId;
use serde::{Deserialize, Serialize};

/// Queue shared between renderer callbacks and the host event loop.
pub type EventSink = Arc<Mutex<Vec<WebViewEvent>>>;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a renderer while its handlers are attached.
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad {
        renderer: RendererId,
        state: PageLoadState,
        url: String,
    },
    /// Document title changed.
    TitleChanged { renderer: RendererId, title: String },
    /// A bridge message was posted by page script. The host hands `body`
    /// to `WebViewManager::handle_ipc` together with the renderer.
    BridgeMessage { renderer: RendererId, body: String },
    /// A navigation passed the allowlist.
    NavigationRequested { renderer: RendererId, url: String },
    /// Renderer was disposed.
    Closed { renderer: RendererId },
}

impl WebViewEvent {
    /// The renderer this event originated from.
    pub fn renderer(&self) -> RendererId {
        match self {
            Self::PageLoad { renderer, .. }
            | Self::TitleChanged { renderer, .. }
            | Self::BridgeMessage { renderer, .. }
            | Self::NavigationRequested { renderer, .. }
            | Self::Closed { renderer } => *renderer,
        }
    }
}

/// Push an event, ignoring a poisoned queue.
pub(crate) fn push_event(events: &EventSink, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}
