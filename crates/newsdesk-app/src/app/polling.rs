//! Periodic work: renderer events and cache sweeps.

use std::time::Instant;

use newsdesk_webview::{Dispatch, PageLoadState, Renderer, WebViewEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::{NewsdeskApp, CACHE_SWEEP_INTERVAL, POLL_INTERVAL};

impl NewsdeskApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
        }

        if now.duration_since(self.last_cache_sweep) >= CACHE_SWEEP_INTERVAL {
            self.last_cache_sweep = now;
            self.sweep_cache();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Drain renderer events and route bridge messages to their handlers.
    fn poll_webview_events(&mut self) {
        let events: Vec<WebViewEvent> = match &self.manager {
            Some(manager) => manager.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::BridgeMessage { renderer, body } => {
                    let (Some(manager), Some(article)) = (&self.manager, &self.article) else {
                        continue;
                    };
                    if article.id() != renderer {
                        tracing::debug!(renderer = %renderer, "bridge message from inactive renderer dropped");
                        continue;
                    }
                    if manager.handle_ipc(article, &body) == Dispatch::Rejected {
                        tracing::debug!(renderer = %renderer, "bridge message rejected");
                    }
                }
                WebViewEvent::PageLoad {
                    renderer,
                    state,
                    url,
                } => {
                    tracing::debug!(renderer = %renderer, ?state, url = %url, "page load event");
                    if state == PageLoadState::Finished {
                        tracing::info!(url = %url, "article loaded");
                    }
                }
                WebViewEvent::TitleChanged { renderer, title } => {
                    tracing::debug!(renderer = %renderer, title = %title, "title changed");
                    if let Some(window) = &self.window {
                        window.set_title(&window_title(&title));
                    }
                }
                WebViewEvent::NavigationRequested { renderer, url } => {
                    tracing::debug!(renderer = %renderer, url = %url, "navigation");
                }
                WebViewEvent::Closed { renderer } => {
                    tracing::debug!(renderer = %renderer, "renderer closed");
                }
            }
        }
    }

    /// Start an expired-entry sweep and log its outcome when done.
    pub(super) fn sweep_cache(&self) {
        let (Some(cache), Some(runtime)) = (&self.cache, &self.tokio_runtime) else {
            return;
        };
        let eviction = cache.evict_expired();
        runtime.spawn(async move {
            let report = eviction.finished().await;
            tracing::debug!(
                memory_removed = report.memory_removed,
                disk_removed = report.disk_removed,
                "cache sweep finished"
            );
        });
    }
}

fn window_title(page_title: &str) -> String {
    let page_title = page_title.trim();
    if page_title.is_empty() {
        "Newsdesk".to_string()
    } else {
        format!("{page_title} - Newsdesk")
    }
}
