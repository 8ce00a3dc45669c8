//! Two-way message channel between native code and page JavaScript.
//!
//! Messages flow in both directions:
//! - **JS -> native**: page script calls `window.newsdesk.bridge.call(...)`,
//!   which posts a [`BridgeMessage`] through `window.ipc.postMessage`. The
//!   host hands the body to [`ScriptBridge::handle_message`], which runs the
//!   handler registered for (renderer, handler name) and, when the page
//!   asked for a reply, evaluates `_resolve(callbackId, error, data)`.
//! - **native -> JS**: [`ScriptBridge::emit`] evaluates `_emit(name, data)`.
//!
//! Registrations are keyed by [`RendererId`]. They must be dropped with
//! [`ScriptBridge::remove_handlers`] when a renderer goes away; the manager
//! does this on dispose and on pool eviction.

mod message;
mod script;


use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use newsdesk_common::{BridgeError, RendererId};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::renderer::Renderer;

pub use message::BridgeMessage;
pub use script::{js_emit_event, js_resolve_callback, BRIDGE_INIT_SCRIPT};

/// A native function callable from page script.
pub type NativeHandler = Arc<dyn Fn(Value) -> Result<Value, BridgeError> + Send + Sync>;

/// Outcome of handling one inbound bridge message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler ran. `replied` is true if a callback script was evaluated.
    Handled { replied: bool },
    /// No handler registered under that name for this renderer.
    Unregistered,
    /// The body was not a valid bridge message.
    Rejected,
}

#[derive(Default)]
pub struct ScriptBridge {
    handlers: Mutex<HashMap<RendererId, HashMap<String, NativeHandler>>>,
}

impl ScriptBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name` for one renderer. Last registration wins.
    pub fn register<F>(&self, name: impl Into<String>, renderer: RendererId, handler: F)
    where
        F: Fn(Value) -> Result<Value, BridgeError> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .lock()
            .entry(renderer)
            .or_default()
            .insert(name.clone(), Arc::new(handler))
            .is_some();
        debug!(renderer = %renderer, handler = %name, replaced, "bridge handler registered");
    }

    /// Drop every registration for a renderer. Returns how many were removed.
    pub fn remove_handlers(&self, renderer: RendererId) -> usize {
        let removed = self
            .lock()
            .remove(&renderer)
            .map(|handlers| handlers.len())
            .unwrap_or(0);
        if removed > 0 {
            debug!(renderer = %renderer, removed, "bridge handlers removed");
        }
        removed
    }

    /// Number of handlers registered for a renderer.
    pub fn handler_count(&self, renderer: RendererId) -> usize {
        self.lock().get(&renderer).map_or(0, HashMap::len)
    }

    /// Number of renderers with at least one registration.
    pub fn renderer_count(&self) -> usize {
        self.lock().len()
    }

    /// Deliver a native event to page listeners.
    ///
    /// If `data` cannot be serialized the event is dropped with a warning.
    /// Returns whether the event script was handed to the renderer.
    pub fn emit<R, T>(&self, event_name: &str, data: &T, renderer: &R) -> bool
    where
        R: Renderer,
        T: Serialize + ?Sized,
    {
        let value = match serde_json::to_value(data) {
            Ok(v) => v,
            Err(e) => {
                warn!(
                    renderer = %renderer.id(),
                    event = %event_name,
                    error = %e,
                    "bridge event dropped: payload not serializable"
                );
                return false;
            }
        };

        match renderer.evaluate_script(&js_emit_event(event_name, &value)) {
            Ok(()) => true,
            Err(e) => {
                warn!(renderer = %renderer.id(), event = %event_name, error = %e, "bridge event dropped");
                false
            }
        }
    }

    /// Handle a raw message body posted by page script in `renderer`.
    pub fn handle_message<R: Renderer>(&self, renderer: &R, raw: &str) -> Dispatch {
        let id = renderer.id();
        let msg = match BridgeMessage::from_json(raw) {
            Some(m) => m,
            None => {
                warn!(renderer = %id, body_len = raw.len(), "bridge message rejected: malformed");
                return Dispatch::Rejected;
            }
        };

        // Clone the handler out so it runs without the registry lock held.
        let handler = self
            .lock()
            .get(&id)
            .and_then(|handlers| handlers.get(&msg.handler_name))
            .cloned();
        let Some(handler) = handler else {
            debug!(renderer = %id, handler = %msg.handler_name, "no bridge handler registered");
            return Dispatch::Unregistered;
        };

        let outcome = handler(msg.data);
        if let Err(e) = &outcome {
            debug!(renderer = %id, handler = %msg.handler_name, error = %e, "bridge handler failed");
        }

        let Some(callback_id) = msg.callback_id else {
            return Dispatch::Handled { replied: false };
        };

        let replied = match renderer.evaluate_script(&js_resolve_callback(&callback_id, &outcome)) {
            Ok(()) => true,
            Err(e) => {
                warn!(renderer = %id, handler = %msg.handler_name, error = %e, "bridge callback not delivered");
                false
            }
        };
        Dispatch::Handled { replied }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RendererId, HashMap<String, NativeHandler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
