use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use newsdesk_common::RendererId;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{push_event, EventSink, PageLoadState, WebViewEvent};
use crate::navigation::NavigationPolicy;

/// What every delegate callback of one renderer shares.
#[derive(Clone)]
pub(super) struct HandlerContext {
    pub id: RendererId,
    pub events: EventSink,
    pub attached: Arc<AtomicBool>,
}

impl HandlerContext {
    fn emit(&self, event: WebViewEvent) {
        if self.attached.load(Ordering::SeqCst) {
            push_event(&self.events, event);
        }
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    ctx: HandlerContext,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        // Validate that the body is valid JSON before forwarding
        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(
                renderer = %ctx.id,
                body_len = body.len(),
                "bridge message rejected: invalid JSON"
            );
            return;
        }

        debug!(renderer = %ctx.id, body_len = body.len(), "bridge message from page");
        ctx.emit(WebViewEvent::BridgeMessage {
            renderer: ctx.id,
            body,
        });
    })
}

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    ctx: HandlerContext,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(renderer = %ctx.id, ?state, url = %url, "page load");
        ctx.emit(WebViewEvent::PageLoad {
            renderer: ctx.id,
            state,
            url,
        });
    })
}

pub(super) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    ctx: HandlerContext,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(renderer = %ctx.id, title = %title, "title changed");
        ctx.emit(WebViewEvent::TitleChanged {
            renderer: ctx.id,
            title,
        });
    })
}

/// The allowlist applies even while detached; only the event is suppressed.
pub(super) fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    ctx: HandlerContext,
    policy: NavigationPolicy,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        if !policy.is_allowed(&url) {
            warn!(
                renderer = %ctx.id,
                url = %url,
                "navigation blocked: URL not in allowlist"
            );
            return false;
        }

        debug!(renderer = %ctx.id, url = %url, "navigation allowed");
        ctx.emit(WebViewEvent::NavigationRequested {
            renderer: ctx.id,
            url,
        });
        true
    })
}
