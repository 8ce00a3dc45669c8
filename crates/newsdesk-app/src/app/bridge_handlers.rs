//! Native functions exposed to article pages through the script bridge.
//!
//! Pages call them with `window.newsdesk.bridge.call(name, data)`:
//! - `cache.get` `{ key }` -> cached content or `null`
//! - `cache.put` `{ key, content, ttlSecs? }` -> `true`
//! - `app.info` -> `{ name, version }`

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use newsdesk_cache::ContentCache;
use newsdesk_common::BridgeError;
use newsdesk_webview::WryRenderer;
use serde::Deserialize;
use serde_json::{json, Value};

use super::core::ArticleManager;

#[derive(Debug, Deserialize)]
struct GetRequest {
    key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutRequest {
    key: String,
    content: String,
    ttl_secs: Option<i64>,
}

/// Register every page-callable handler for `renderer`.
pub(super) fn register_all(
    manager: &ArticleManager,
    renderer: &WryRenderer,
    cache: Option<Arc<ContentCache>>,
) {
    let get_cache = cache.clone();
    manager.register_handler("cache.get", renderer, move |data| {
        cache_get(get_cache.as_deref(), data)
    });
    manager.register_handler("cache.put", renderer, move |data| {
        cache_put(cache.as_deref(), data)
    });
    manager.register_handler("app.info", renderer, |_| Ok(app_info()));
}

// =============================================================================
// HANDLERS
// =============================================================================

fn cache_get(cache: Option<&ContentCache>, data: Value) -> Result<Value, BridgeError> {
    let cache = cache.ok_or_else(unavailable)?;
    let req: GetRequest = parse(data)?;
    Ok(cache.get(&req.key).map_or(Value::Null, Value::String))
}

fn cache_put(cache: Option<&ContentCache>, data: Value) -> Result<Value, BridgeError> {
    let cache = cache.ok_or_else(unavailable)?;
    let req: PutRequest = parse(data)?;
    let expires_at = match req.ttl_secs {
        Some(secs) if secs <= 0 => {
            return Err(BridgeError::new("ttlSecs must be positive"));
        }
        Some(secs) => {
            let ttl = TimeDelta::try_seconds(secs)
                .ok_or_else(|| BridgeError::new("ttlSecs out of range"))?;
            Some(
                Utc::now()
                    .checked_add_signed(ttl)
                    .ok_or_else(|| BridgeError::new("ttlSecs out of range"))?,
            )
        }
        None => None,
    };
    cache
        .put(&req.key, &req.content, expires_at)
        .map_err(|e| BridgeError::new(e.to_string()))?;
    Ok(Value::Bool(true))
}

fn app_info() -> Value {
    json!({
        "name": "newsdesk",
        "version": env!("CARGO_PKG_VERSION"),
    })
}

fn parse<T: for<'de> Deserialize<'de>>(data: Value) -> Result<T, BridgeError> {
    serde_json::from_value(data).map_err(|e| BridgeError::new(format!("invalid arguments: {e}")))
}

fn unavailable() -> BridgeError {
    BridgeError::new("content cache unavailable")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::runtime::Handle;

    fn cache(dir: &TempDir) -> ContentCache {
        ContentCache::with_dir(dir.path(), Duration::from_secs(60), Handle::current()).unwrap()
    }

    #[tokio::test]
    async fn put_then_get_through_handlers() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);

        let stored = cache_put(
            Some(&cache),
            json!({ "key": "sidebar", "content": "<aside/>", "ttlSecs": 30 }),
        )
        .unwrap();
        assert_eq!(stored, json!(true));
        assert_eq!(
            cache_get(Some(&cache), json!({ "key": "sidebar" })).unwrap(),
            json!("<aside/>")
        );
    }

    #[tokio::test]
    async fn get_of_missing_key_is_null() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);
        assert_eq!(
            cache_get(Some(&cache), json!({ "key": "nope" })).unwrap(),
            Value::Null
        );
    }

    #[tokio::test]
    async fn bad_arguments_are_reported() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);

        let err = cache_get(Some(&cache), json!({ "id": 1 })).unwrap_err();
        assert!(err.message.starts_with("invalid arguments"));

        let err = cache_put(
            Some(&cache),
            json!({ "key": "k", "content": "c", "ttlSecs": 0 }),
        )
        .unwrap_err();
        assert_eq!(err.message, "ttlSecs must be positive");
    }

    #[test]
    fn missing_cache_is_an_error() {
        let err = cache_get(None, json!({ "key": "k" })).unwrap_err();
        assert_eq!(err.message, "content cache unavailable");
    }

    #[test]
    fn app_info_reports_version() {
        let info = app_info();
        assert_eq!(info["name"], "newsdesk");
        assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    }
}
