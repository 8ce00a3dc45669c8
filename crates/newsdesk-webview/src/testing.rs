//! In-memory renderer used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cookie::Cookie;
use newsdesk_common::{RendererId, WebViewError};

use crate::events::EventSink;
use crate::manager::WebViewConfig;
use crate::renderer::{Renderer, RendererFactory, ScriptCallback};

/// Everything a `FakeRenderer` was asked to do.
#[derive(Debug, Default)]
pub(crate) struct FakeLog {
    pub scripts: Vec<String>,
    /// (url, cookie pairs sent with the request)
    pub loads: Vec<(String, Vec<String>)>,
    pub html: Vec<String>,
    pub reloads: usize,
    pub stops: usize,
    pub cleared: usize,
    pub attached: bool,
    /// Raw result handed to every script callback, if set.
    pub script_result: Option<String>,
    /// Make every evaluation fail synchronously.
    pub fail_scripts: bool,
}

/// Clones share the same log and identity, standing in for two handles
/// to one underlying web view.
#[derive(Debug, Clone)]
pub(crate) struct FakeRenderer {
    id: RendererId,
    current_url: String,
    pub log: Arc<Mutex<FakeLog>>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self {
            id: RendererId::new(),
            current_url: "about:blank".to_string(),
            log: Arc::new(Mutex::new(FakeLog {
                attached: true,
                ..Default::default()
            })),
        }
    }

    pub fn with_script_result(self, raw: &str) -> Self {
        self.log.lock().unwrap().script_result = Some(raw.to_string());
        self
    }

    pub fn scripts(&self) -> Vec<String> {
        self.log.lock().unwrap().scripts.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.log.lock().unwrap().attached
    }

    pub fn stops(&self) -> usize {
        self.log.lock().unwrap().stops
    }

    pub fn cleared(&self) -> usize {
        self.log.lock().unwrap().cleared
    }
}

impl Renderer for FakeRenderer {
    fn id(&self) -> RendererId {
        self.id
    }

    fn current_url(&self) -> &str {
        &self.current_url
    }

    fn load_url(&mut self, url: &str, cookies: &[Cookie<'static>]) -> Result<(), WebViewError> {
        self.current_url = url.to_string();
        let pairs = cookies
            .iter()
            .map(|c| format!("{}={}", c.name(), c.value()))
            .collect();
        self.log.lock().unwrap().loads.push((url.to_string(), pairs));
        Ok(())
    }

    fn load_html(&mut self, html: &str) -> Result<(), WebViewError> {
        self.current_url = "about:blank".to_string();
        self.log.lock().unwrap().html.push(html.to_string());
        Ok(())
    }

    fn reload(&self) -> Result<(), WebViewError> {
        self.log.lock().unwrap().reloads += 1;
        Ok(())
    }

    fn stop_loading(&self) -> Result<(), WebViewError> {
        self.log.lock().unwrap().stops += 1;
        Ok(())
    }

    fn evaluate_script(&self, js: &str) -> Result<(), WebViewError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_scripts {
            return Err(WebViewError::Renderer("script engine unavailable".into()));
        }
        log.scripts.push(js.to_string());
        Ok(())
    }

    fn evaluate_script_with_callback(
        &self,
        js: &str,
        callback: ScriptCallback,
    ) -> Result<(), WebViewError> {
        let result = {
            let mut log = self.log.lock().unwrap();
            if log.fail_scripts {
                return Err(WebViewError::Renderer("script engine unavailable".into()));
            }
            log.scripts.push(js.to_string());
            log.script_result.clone()
        };
        if let Some(raw) = result {
            callback(raw);
        }
        Ok(())
    }

    fn attach_handlers(&mut self) {
        self.log.lock().unwrap().attached = true;
    }

    fn detach_handlers(&mut self) {
        self.log.lock().unwrap().attached = false;
    }

    fn clear_browsing_data(&self) -> Result<(), WebViewError> {
        self.log.lock().unwrap().cleared += 1;
        Ok(())
    }
}

/// Factory producing `FakeRenderer`s and counting calls.
#[derive(Default)]
pub(crate) struct FakeFactory {
    pub created: AtomicUsize,
    pub purges: AtomicUsize,
    pub last_config: Mutex<Option<WebViewConfig>>,
}

impl FakeFactory {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn purges(&self) -> usize {
        self.purges.load(Ordering::SeqCst)
    }
}

impl RendererFactory for FakeFactory {
    type Renderer = FakeRenderer;

    fn create(
        &self,
        config: &WebViewConfig,
        _events: EventSink,
    ) -> Result<FakeRenderer, WebViewError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock().unwrap() = Some(config.clone());
        Ok(FakeRenderer::new())
    }

    fn purge_page_caches(&self) -> Result<(), WebViewError> {
        self.purges.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
