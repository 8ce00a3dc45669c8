use std::sync::Arc;
use std::time::{Duration, Instant};

use newsdesk_cache::ContentCache;
use newsdesk_config::NewsdeskConfig;
use newsdesk_webview::{WebViewManager, WryRenderer, WryRendererFactory};
use tokio::runtime::Runtime;
use winit::window::Window;

/// How often renderer events are drained.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// How often expired cache entries are swept.
pub(super) const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

pub(super) type ArticleManager = WebViewManager<WryRendererFactory<Window>>;

pub struct NewsdeskApp {
    pub(super) config: NewsdeskConfig,
    /// URL given on the command line, opened once the window exists.
    pub(super) initial_url: Option<String>,
    pub(super) window: Option<Arc<Window>>,
    pub(super) manager: Option<ArticleManager>,
    /// The renderer currently showing an article.
    pub(super) article: Option<WryRenderer>,
    pub(super) cache: Option<Arc<ContentCache>>,
    pub(super) tokio_runtime: Option<Runtime>,
    pub(super) last_poll: Instant,
    pub(super) last_cache_sweep: Instant,
}

impl NewsdeskApp {
    pub fn new(
        config: NewsdeskConfig,
        initial_url: Option<String>,
        runtime: Runtime,
        cache: Option<Arc<ContentCache>>,
    ) -> Self {
        let now = Instant::now();
        Self {
            config,
            initial_url,
            window: None,
            manager: None,
            article: None,
            cache,
            tokio_runtime: Some(runtime),
            last_poll: now,
            last_cache_sweep: now,
        }
    }
}
