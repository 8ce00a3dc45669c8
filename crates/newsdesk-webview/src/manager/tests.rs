//! Manager tests against the in-memory renderer.

use std::sync::{Arc, Mutex};

use cookie::Cookie;
use newsdesk_common::WebViewError;
use newsdesk_config::WebViewSettings;
use serde_json::{json, Value};

use super::*;
use crate::bridge::Dispatch;
use crate::renderer::{Renderer, BLANK_DOCUMENT};
use crate::testing::{FakeFactory, FakeRenderer};

fn manager(pool_size: usize) -> WebViewManager<FakeFactory> {
    let settings = WebViewSettings {
        pool_size,
        ..Default::default()
    };
    WebViewManager::new(FakeFactory::default(), &settings)
}

// =============================================================================
// CREATE / REUSE
// =============================================================================

#[test]
fn empty_pool_builds_with_requested_config() {
    let mgr = manager(2);
    let config = WebViewConfig::with_url("https://news.example.com/a/1");

    let renderer = mgr.create_or_reuse(Some(&config)).unwrap();
    assert_eq!(mgr.factory().created(), 1);
    assert_eq!(
        mgr.factory().last_config.lock().unwrap().as_ref(),
        Some(&config)
    );
    assert_eq!(renderer.log.lock().unwrap().reloads, 0);
}

#[test]
fn empty_pool_without_config_uses_settings_defaults() {
    let settings = WebViewSettings {
        user_agent: Some("Reader/2".into()),
        ..Default::default()
    };
    let mgr = WebViewManager::new(FakeFactory::default(), &settings);

    mgr.create_or_reuse(None).unwrap();
    let used = mgr.factory().last_config.lock().unwrap().clone().unwrap();
    assert_eq!(used.user_agent.as_deref(), Some("Reader/2"));
    assert!(used.url.is_none());
}

#[test]
fn pooled_renderer_is_reused_and_reloaded() {
    let mgr = manager(2);
    let first = mgr.create_or_reuse(None).unwrap();
    let id = first.id();
    let observer = first.clone();
    mgr.recycle(first);

    let again = mgr.create_or_reuse(None).unwrap();
    assert_eq!(again.id(), id);
    assert_eq!(mgr.factory().created(), 1, "no new renderer built");
    assert_eq!(observer.log.lock().unwrap().reloads, 1);
    assert!(observer.is_attached());
    assert!(mgr.pool().is_empty());
}

// =============================================================================
// RECYCLE / DISPOSE
// =============================================================================

#[test]
fn recycle_stops_blanks_and_pools() {
    let mgr = manager(2);
    let mut renderer = mgr.create_or_reuse(None).unwrap();
    assert!(mgr.load_url("https://news.example.com/a/1", &mut renderer));
    let observer = renderer.clone();

    mgr.recycle(renderer);
    assert_eq!(observer.stops(), 1);
    assert_eq!(observer.log.lock().unwrap().html, vec![BLANK_DOCUMENT.to_string()]);
    assert!(mgr.pool().contains(observer.id()));
    assert_eq!(observer.cleared(), 0, "recycled renderers keep their data");
}

#[test]
fn recycle_flushes_page_cookies_into_jar() {
    let mgr = manager(2);
    let mut renderer = mgr
        .create_or_reuse(None)
        .unwrap()
        .with_script_result(r#""session=abc; region=eu""#);
    assert!(mgr.load_url("https://news.example.com/a/1", &mut renderer));

    mgr.recycle(renderer);
    assert_eq!(mgr.cookies().jar().len(), 2);

    let url = url::Url::parse("https://news.example.com/a/2").unwrap();
    let mut names: Vec<String> = mgr
        .cookies()
        .cookies_for_navigation(&url)
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["region", "session"]);
}

#[test]
fn dispose_detaches_and_drops_handlers() {
    let mgr = manager(2);
    let renderer = mgr.create_or_reuse(None).unwrap();
    let id = renderer.id();
    let observer = renderer.clone();
    mgr.register_handler("share", &renderer, |_| Ok(Value::Null));
    assert_eq!(mgr.bridge().handler_count(id), 1);

    mgr.dispose(renderer);
    assert!(!observer.is_attached());
    assert_eq!(observer.stops(), 1);
    assert_eq!(mgr.bridge().handler_count(id), 0);
    assert!(!mgr.pool().contains(id));

    let events = mgr.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], WebViewEvent::Closed { renderer } if renderer == id));
    assert!(mgr.drain_events().is_empty());
}

#[test]
fn pool_eviction_drops_bridge_handlers() {
    let mgr = manager(1);
    let older = mgr.create_or_reuse(None).unwrap();
    let newer = mgr.create_or_reuse(None).unwrap();
    let (older_id, newer_id) = (older.id(), newer.id());
    let older_observer = older.clone();
    mgr.register_handler("share", &older, |_| Ok(json!(1)));
    mgr.register_handler("share", &newer, |_| Ok(json!(2)));

    mgr.recycle(older);
    mgr.recycle(newer);

    assert_eq!(mgr.pool().len(), 1);
    assert!(mgr.pool().contains(newer_id));
    assert_eq!(mgr.bridge().handler_count(older_id), 0);
    assert_eq!(mgr.bridge().handler_count(newer_id), 1);
    assert!(!older_observer.is_attached());
    assert_eq!(older_observer.cleared(), 1);
}

#[test]
fn zero_capacity_pool_tears_down_on_recycle() {
    let mgr = manager(0);
    let renderer = mgr.create_or_reuse(None).unwrap();
    let observer = renderer.clone();
    mgr.register_handler("share", &renderer, |_| Ok(Value::Null));

    mgr.recycle(renderer);
    assert!(mgr.pool().is_empty());
    assert_eq!(observer.cleared(), 1);
    assert_eq!(mgr.bridge().handler_count(observer.id()), 0);

    mgr.create_or_reuse(None).unwrap();
    assert_eq!(mgr.factory().created(), 2);
}

// =============================================================================
// MEMORY PRESSURE / RESET
// =============================================================================

#[test]
fn memory_pressure_keeps_fresh_renderers_and_purges_page_cache() {
    let mgr = manager(3);
    let renderer = mgr.create_or_reuse(None).unwrap();
    mgr.recycle(renderer);

    assert_eq!(mgr.handle_memory_pressure(), 0);
    assert_eq!(mgr.pool().len(), 1);
    assert_eq!(mgr.factory().purges(), 1);
}

#[test]
fn reset_tears_down_everything() {
    let mgr = manager(3);
    let a = mgr.create_or_reuse(None).unwrap();
    let b = mgr.create_or_reuse(None).unwrap();
    let observers = [a.clone(), b.clone()];
    mgr.recycle(a);
    mgr.recycle(b);

    assert_eq!(mgr.reset(), 2);
    assert!(mgr.pool().is_empty());
    for observer in &observers {
        assert_eq!(observer.cleared(), 1);
        assert!(!observer.is_attached());
    }
    assert_eq!(mgr.reset(), 0);
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[test]
fn load_url_rejects_unparseable_url() {
    let mgr = manager(1);
    let mut renderer = mgr.create_or_reuse(None).unwrap();
    assert!(!mgr.load_url("not a url", &mut renderer));
    assert!(renderer.log.lock().unwrap().loads.is_empty());
}

#[test]
fn load_url_rejects_disallowed_scheme() {
    let mgr = manager(1);
    let mut renderer = mgr.create_or_reuse(None).unwrap();
    assert!(!mgr.load_url("http://news.example.com/", &mut renderer));
    assert!(!mgr.load_url("file:///etc/passwd", &mut renderer));
    assert!(renderer.log.lock().unwrap().loads.is_empty());
}

#[test]
fn try_load_url_reports_reason() {
    let mgr = manager(1);
    let mut renderer = mgr.create_or_reuse(None).unwrap();

    assert!(matches!(
        mgr.try_load_url("::nope", &mut renderer),
        Err(WebViewError::InvalidUrl(_))
    ));
    assert_eq!(
        mgr.try_load_url("javascript:alert(1)", &mut renderer),
        Err(WebViewError::NavigationBlocked("javascript:alert(1)".into()))
    );
    assert_eq!(mgr.try_load_url("about:blank", &mut renderer), Ok(()));
}

#[test]
fn load_url_sends_matching_jar_cookies() {
    let mgr = manager(1);
    mgr.cookies().jar().set(
        Cookie::build(("session", "abc"))
            .domain("example.com")
            .path("/")
            .build(),
    );
    mgr.cookies().jar().set(
        Cookie::build(("other", "x"))
            .domain("elsewhere.org")
            .path("/")
            .build(),
    );

    let mut renderer = mgr.create_or_reuse(None).unwrap();
    assert!(mgr.load_url("https://news.example.com/world", &mut renderer));
    assert_eq!(renderer.current_url(), "https://news.example.com/world");

    let loads = renderer.log.lock().unwrap().loads.clone();
    assert_eq!(
        loads,
        vec![(
            "https://news.example.com/world".to_string(),
            vec!["session=abc".to_string()]
        )]
    );
}

// =============================================================================
// SCRIPTS AND BRIDGE
// =============================================================================

fn capture() -> (
    Arc<Mutex<Option<Result<Value, WebViewError>>>>,
    impl FnOnce(Result<Value, WebViewError>) + Send + 'static,
) {
    let slot = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&slot);
    (slot, move |result| {
        *sink.lock().unwrap() = Some(result);
    })
}

#[test]
fn evaluate_script_delivers_value() {
    let mgr = manager(1);
    let renderer = FakeRenderer::new().with_script_result(r#""{\"ok\":\"Headline\"}""#);
    let (slot, on_complete) = capture();

    mgr.evaluate_script("document.title", &renderer, on_complete).unwrap();
    assert_eq!(slot.lock().unwrap().take().unwrap().unwrap(), json!("Headline"));
    assert!(renderer.scripts()[0].contains(r#"(0, eval)("document.title")"#));
}

#[test]
fn evaluate_script_delivers_thrown_error() {
    let mgr = manager(1);
    let renderer =
        FakeRenderer::new().with_script_result(r#""{\"error\":\"boom is not defined\"}""#);
    let (slot, on_complete) = capture();

    mgr.evaluate_script("boom()", &renderer, on_complete).unwrap();
    assert_eq!(
        slot.lock().unwrap().take().unwrap().unwrap_err(),
        WebViewError::ScriptExecution("boom is not defined".into())
    );
}

#[test]
fn evaluate_script_engine_failure_is_returned_directly() {
    let mgr = manager(1);
    let renderer = FakeRenderer::new();
    renderer.log.lock().unwrap().fail_scripts = true;
    let (slot, on_complete) = capture();

    let err = mgr.evaluate_script("1 + 1", &renderer, on_complete).unwrap_err();
    assert!(matches!(err, WebViewError::ScriptExecution(_)));
    assert!(slot.lock().unwrap().is_none());
}

#[test]
fn handle_ipc_routes_to_registered_handler() {
    let mgr = manager(1);
    let renderer = mgr.create_or_reuse(None).unwrap();
    mgr.register_handler("articleMeta", &renderer, |data| Ok(json!({ "id": data["id"] })));

    let outcome = mgr.handle_ipc(
        &renderer,
        r#"{"handlerName":"articleMeta","data":{"id":4},"callbackId":"cb_2"}"#,
    );
    assert_eq!(outcome, Dispatch::Handled { replied: true });
    assert!(renderer.scripts()[0].starts_with(r#"window.newsdesk.bridge._resolve("cb_2""#));
}

#[test]
fn emit_goes_through_bridge() {
    let mgr = manager(1);
    let renderer = mgr.create_or_reuse(None).unwrap();
    assert!(mgr.emit("fontSize", &json!(18), &renderer));
    assert_eq!(
        renderer.scripts(),
        vec![r#"window.newsdesk.bridge._emit("fontSize", 18);"#.to_string()]
    );
}
