//! Cookie synchronization between a shared jar and per-renderer stores.
//!
//! Renderers are built with isolated (incognito) data stores, so the
//! shared jar is the only place cookies outlive a renderer. The jar feeds
//! each navigation through the request's `Cookie` header, and script-visible
//! cookies are read back from `document.cookie` when a renderer is
//! recycled or disposed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cookie::Cookie;
use time::OffsetDateTime;
use tracing::{debug, warn};
use url::Url;

use crate::renderer::Renderer;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CookieKey {
    name: String,
    domain: String,
    path: String,
}

#[derive(Debug, Clone)]
struct StoredCookie {
    cookie: Cookie<'static>,
    /// Sent to the exact host only, never to its subdomains.
    host_only: bool,
}

impl StoredCookie {
    fn visible_to(&self, key: &CookieKey, host: &str, url: &Url, now: OffsetDateTime) -> bool {
        let domain_ok = if self.host_only {
            key.domain == host
        } else {
            domain_matches(&key.domain, host)
        };
        domain_ok
            && path_matches(&key.path, url.path())
            && (url.scheme() == "https" || !self.cookie.secure().unwrap_or(false))
            && !is_expired(&self.cookie, now)
    }
}

/// Process-wide cookie jar shared by every renderer.
///
/// Clones share storage. Cookies are keyed by (name, domain, path); storing
/// a cookie with the same key replaces the previous one. Cookies stored
/// with `set` are domain cookies and also match subdomains; cookies first
/// seen through `document.cookie` are host-only.
#[derive(Debug, Clone, Default)]
pub struct SharedCookieJar {
    inner: Arc<Mutex<HashMap<CookieKey, StoredCookie>>>,
}

impl SharedCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cookie. A cookie without a domain is rejected; an already
    /// expired cookie deletes any stored twin.
    pub fn set(&self, mut cookie: Cookie<'static>) -> bool {
        let Some(domain) = cookie.domain().map(normalize_domain) else {
            debug!(name = %cookie.name(), "cookie without domain ignored");
            return false;
        };
        let path = cookie.path().unwrap_or("/").to_string();
        let key = CookieKey {
            name: cookie.name().to_string(),
            domain: domain.clone(),
            path: path.clone(),
        };

        let now = OffsetDateTime::now_utc();
        if let Some(max_age) = cookie.max_age() {
            cookie.set_expires(now + max_age);
        }
        cookie.set_domain(domain);
        cookie.set_path(path);

        let mut store = self.lock();
        if is_expired(&cookie, now) {
            store.remove(&key);
            return false;
        }
        store.insert(
            key,
            StoredCookie {
                cookie,
                host_only: false,
            },
        );
        true
    }

    pub fn remove(&self, name: &str, domain: &str, path: &str) -> bool {
        let key = CookieKey {
            name: name.to_string(),
            domain: normalize_domain(domain),
            path: path.to_string(),
        };
        self.lock().remove(&key).is_some()
    }

    /// Unexpired cookies that a request to `url` should carry, most
    /// specific path first.
    pub fn cookies_for_url(&self, url: &Url) -> Vec<Cookie<'static>> {
        let Some(host) = url.host_str().map(str::to_ascii_lowercase) else {
            return Vec::new();
        };
        let now = OffsetDateTime::now_utc();

        let mut matches: Vec<Cookie<'static>> = self
            .lock()
            .iter()
            .filter(|(key, stored)| stored.visible_to(key, &host, url, now))
            .map(|(_, stored)| stored.cookie.clone())
            .collect();
        matches.sort_by_key(|c| std::cmp::Reverse(c.path().map_or(0, str::len)));
        matches
    }

    /// Merge a `document.cookie` string (`a=1; b=2`) observed on `url`.
    ///
    /// A name already visible to `url` has its most specific jar entry
    /// updated in place. Unknown names become host-only cookies for the
    /// URL's host. Returns the number of cookies stored.
    pub fn absorb_document_cookies(&self, url: &Url, document_cookie: &str) -> usize {
        let Some(host) = url.host_str().map(str::to_ascii_lowercase) else {
            return 0;
        };
        let now = OffsetDateTime::now_utc();
        let mut store = self.lock();
        let mut stored = 0;

        for (name, value) in parse_document_cookie(document_cookie) {
            let existing = store
                .iter_mut()
                .filter(|(key, entry)| key.name == name && entry.visible_to(key, &host, url, now))
                .max_by_key(|(key, entry)| (key.path.len(), entry.host_only, key.domain.len()));
            match existing {
                Some((_, entry)) => entry.cookie.set_value(value.to_string()),
                None => {
                    let cookie = Cookie::build((name.to_string(), value.to_string()))
                        .domain(host.clone())
                        .path("/")
                        .build();
                    store.insert(
                        CookieKey {
                            name: name.to_string(),
                            domain: host.clone(),
                            path: "/".to_string(),
                        },
                        StoredCookie {
                            cookie,
                            host_only: true,
                        },
                    );
                }
            }
            stored += 1;
        }
        stored
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CookieKey, StoredCookie>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Moves cookies between the shared jar and individual renderers.
#[derive(Debug, Clone, Default)]
pub struct CookieSync {
    jar: SharedCookieJar,
}

impl CookieSync {
    pub fn new(jar: SharedCookieJar) -> Self {
        Self { jar }
    }

    pub fn jar(&self) -> &SharedCookieJar {
        &self.jar
    }

    /// Cookies to attach to a navigation of `url`.
    pub fn cookies_for_navigation(&self, url: &Url) -> Vec<Cookie<'static>> {
        self.jar.cookies_for_url(url)
    }

    /// Best-effort pull of the renderer's script-visible cookies into the jar.
    ///
    /// The read completes asynchronously; a failure is logged and ignored.
    pub fn flush<R: Renderer>(&self, renderer: &R) {
        let id = renderer.id();
        let url = match Url::parse(renderer.current_url()) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => u,
            _ => return,
        };

        let jar = self.jar.clone();
        let result = renderer.evaluate_script_with_callback(
            "document.cookie",
            Box::new(move |raw| {
                let cookies = decode_script_string(&raw);
                let stored = jar.absorb_document_cookies(&url, &cookies);
                debug!(renderer = %id, stored, "cookies flushed to shared jar");
            }),
        );
        if let Err(e) = result {
            warn!(renderer = %id, error = %e, "cookie flush failed");
        }
    }
}

/// Engines hand script results back JSON-encoded; unwrap a string result.
fn decode_script_string(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => s,
        _ => raw.to_string(),
    }
}

/// `name=value` pairs of a `document.cookie` string; pairs without a name
/// are skipped.
fn parse_document_cookie(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.split(';').filter_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        let name = name.trim();
        (!name.is_empty()).then(|| (name, value.trim()))
    })
}

fn normalize_domain(domain: &str) -> String {
    domain.trim_start_matches('.').to_ascii_lowercase()
}

fn is_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    cookie.expires_datetime().is_some_and(|at| at <= now)
}

/// `host` equals `domain` or is a subdomain of it.
fn domain_matches(domain: &str, host: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// RFC 6265 path-match.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if cookie_path == request_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/')
            || request_path[cookie_path.len()..].starts_with('/'))
}
