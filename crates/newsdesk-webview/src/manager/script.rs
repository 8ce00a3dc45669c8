use std::sync::{Mutex, PoisonError};

use newsdesk_common::{BridgeError, WebViewError};
use serde::Serialize;
use serde_json::Value;

use crate::bridge::Dispatch;
use crate::renderer::{Renderer, RendererFactory};

use super::WebViewManager;

impl<F: RendererFactory> WebViewManager<F> {
    /// Run `script` in the renderer's page and deliver its value to
    /// `on_complete`.
    ///
    /// A script that throws completes with `WebViewError::ScriptExecution`
    /// carrying the thrown message. If the engine refuses the call outright
    /// the error is returned here and `on_complete` never runs.
    pub fn evaluate_script<C>(
        &self,
        script: &str,
        renderer: &F::Renderer,
        on_complete: C,
    ) -> Result<(), WebViewError>
    where
        C: FnOnce(Result<Value, WebViewError>) + Send + 'static,
    {
        let slot = Mutex::new(Some(on_complete));
        renderer
            .evaluate_script_with_callback(
                &wrap_for_result(script),
                Box::new(move |raw| {
                    let callback = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
                    if let Some(callback) = callback {
                        callback(decode_result(&raw));
                    }
                }),
            )
            .map_err(|e| WebViewError::ScriptExecution(e.to_string()))
    }

    /// Register a native handler callable from `renderer`'s page script.
    pub fn register_handler<H>(&self, name: impl Into<String>, renderer: &F::Renderer, handler: H)
    where
        H: Fn(Value) -> Result<Value, BridgeError> + Send + Sync + 'static,
    {
        self.bridge.register(name, renderer.id(), handler);
    }

    /// Send a native event to page listeners.
    pub fn emit<T: Serialize + ?Sized>(
        &self,
        event_name: &str,
        data: &T,
        renderer: &F::Renderer,
    ) -> bool {
        self.bridge.emit(event_name, data, renderer)
    }

    /// Dispatch a `WebViewEvent::BridgeMessage` body from `renderer`.
    pub fn handle_ipc(&self, renderer: &F::Renderer, body: &str) -> Dispatch {
        self.bridge.handle_message(renderer, body)
    }
}

/// Wrap a script so it always returns `{"ok": value}` or `{"error": message}`
/// as a JSON string, whatever the script does.
pub(crate) fn wrap_for_result(script: &str) -> String {
    format!(
        "(function() {{ try {{ var __v = (0, eval)({}); \
         return JSON.stringify({{ ok: __v === undefined ? null : __v }}); }} \
         catch (e) {{ return JSON.stringify({{ error: String(e && e.message ? e.message : e) }}); }} }})()",
        Value::from(script)
    )
}

/// Decode the engine's report of a wrapped script's return value.
///
/// Engines serialize the returned string once more, so a JSON string is
/// unwrapped before reading the envelope.
pub(crate) fn decode_result(raw: &str) -> Result<Value, WebViewError> {
    let outer: Value = serde_json::from_str(raw).map_err(|e| {
        WebViewError::ScriptExecution(format!("unreadable script result: {e}"))
    })?;
    let envelope = match outer {
        Value::String(inner) => serde_json::from_str(&inner).map_err(|e| {
            WebViewError::ScriptExecution(format!("unreadable script result: {e}"))
        })?,
        other => other,
    };

    match envelope {
        Value::Object(mut map) => {
            if let Some(error) = map.remove("error") {
                let message = match error {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                return Err(WebViewError::ScriptExecution(message));
            }
            Ok(map.remove("ok").unwrap_or(Value::Null))
        }
        other => Err(WebViewError::ScriptExecution(format!(
            "unexpected script result: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_script_embeds_source_as_string_literal() {
        let wrapped = wrap_for_result("document.title");
        assert!(wrapped.contains(r#"(0, eval)("document.title")"#));
        assert!(wrapped.starts_with("(function() {"));
        assert!(wrapped.ends_with("})()"));
    }

    #[test]
    fn wrapped_script_escapes_quotes() {
        let wrapped = wrap_for_result(r#"alert("x")"#);
        assert!(wrapped.contains(r#""alert(\"x\")""#));
    }

    #[test]
    fn decode_double_encoded_ok() {
        let raw = serde_json::to_string(r#"{"ok":{"count":3}}"#).unwrap();
        assert_eq!(decode_result(&raw).unwrap(), json!({"count": 3}));
    }

    #[test]
    fn decode_single_encoded_ok() {
        assert_eq!(decode_result(r#"{"ok":"Headline"}"#).unwrap(), json!("Headline"));
    }

    #[test]
    fn decode_missing_ok_is_null() {
        let raw = serde_json::to_string("{}").unwrap();
        assert_eq!(decode_result(&raw).unwrap(), Value::Null);
    }

    #[test]
    fn decode_thrown_error() {
        let raw = serde_json::to_string(r#"{"error":"foo is not defined"}"#).unwrap();
        assert_eq!(
            decode_result(&raw).unwrap_err(),
            WebViewError::ScriptExecution("foo is not defined".into())
        );
    }

    #[test]
    fn decode_garbage_is_script_error() {
        assert!(matches!(
            decode_result(""),
            Err(WebViewError::ScriptExecution(_))
        ));
        assert!(matches!(
            decode_result("42"),
            Err(WebViewError::ScriptExecution(_))
        ));
    }
}
