//! Page-side half of the bridge and the scripts native code evaluates.
//!
//! Every value interpolated into a script goes through `serde_json`, so a
//! handler result or callback id can never break out of its literal.

use newsdesk_common::BridgeError;
use serde_json::{json, Value};

/// Injected as an initialization script into every renderer.
///
/// Page code calls `window.newsdesk.bridge.call(name, data)` (returns a
/// Promise), `post(name, data)` (no reply) and `on(event, listener)`.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    if (window.newsdesk && window.newsdesk.bridge) {
        return;
    }
    var callbacks = {};
    var listeners = {};
    var nextId = 0;

    function send(handlerName, data, callbackId) {
        var msg = { handlerName: handlerName, data: data === undefined ? null : data };
        if (callbackId) {
            msg.callbackId = callbackId;
        }
        window.ipc.postMessage(JSON.stringify(msg));
    }

    window.newsdesk = window.newsdesk || {};
    window.newsdesk.bridge = {
        call: function(handlerName, data) {
            return new Promise(function(resolve, reject) {
                var callbackId = 'cb_' + (++nextId) + '_' + Date.now();
                callbacks[callbackId] = function(error, result) {
                    if (error) {
                        reject(error);
                    } else {
                        resolve(result);
                    }
                };
                send(handlerName, data, callbackId);
            });
        },
        post: function(handlerName, data) {
            send(handlerName, data, null);
        },
        on: function(eventName, listener) {
            (listeners[eventName] = listeners[eventName] || []).push(listener);
        },
        off: function(eventName, listener) {
            var list = listeners[eventName] || [];
            listeners[eventName] = list.filter(function(l) { return l !== listener; });
        },
        _resolve: function(callbackId, error, data) {
            var callback = callbacks[callbackId];
            if (!callback) {
                return;
            }
            delete callbacks[callbackId];
            callback(error, data);
        },
        _emit: function(eventName, data) {
            (listeners[eventName] || []).slice().forEach(function(listener) {
                try {
                    listener(data);
                } catch (e) {
                    console.error('newsdesk bridge listener failed', e);
                }
            });
        }
    };
})();
"#;

/// Script delivering a native event to page listeners.
pub fn js_emit_event(event_name: &str, data: &Value) -> String {
    format!(
        "window.newsdesk.bridge._emit({}, {});",
        Value::from(event_name),
        data
    )
}

/// Script resolving a pending page-side call with `(error, data)`.
///
/// Success yields `(null, value)`; failure yields `({message}, null)`.
pub fn js_resolve_callback(callback_id: &str, outcome: &Result<Value, BridgeError>) -> String {
    let (error, data) = callback_args(outcome);
    format!(
        "window.newsdesk.bridge._resolve({}, {}, {});",
        Value::from(callback_id),
        error,
        data
    )
}

/// The `(error, data)` pair handed to a page callback.
fn callback_args(outcome: &Result<Value, BridgeError>) -> (Value, Value) {
    match outcome {
        Ok(value) => (Value::Null, value.clone()),
        Err(e) => (json!({ "message": e.message }), Value::Null),
    }
}
