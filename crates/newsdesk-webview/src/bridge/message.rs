//! Wire format of a JS -> native bridge call.

use serde::{Deserialize, Serialize};

/// A call posted by page script via `window.ipc.postMessage`.
///
/// ```json
/// { "handlerName": "share", "data": { "id": 42 }, "callbackId": "cb_1_1700000000000" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeMessage {
    pub handler_name: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,
}

impl BridgeMessage {
    /// Parse a message from the raw postMessage body.
    ///
    /// Returns `None` for malformed JSON or an empty handler name.
    pub fn from_json(raw: &str) -> Option<Self> {
        let msg: Self = serde_json::from_str(raw).ok()?;
        if msg.handler_name.is_empty() {
            return None;
        }
        Some(msg)
    }
}
