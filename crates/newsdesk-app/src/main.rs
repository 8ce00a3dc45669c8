mod app;
mod cli;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use newsdesk_cache::ContentCache;
use newsdesk_common::NewsdeskError;
use newsdesk_config::{toml_loader, NewsdeskConfig};
use winit::event_loop::EventLoop;

fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging so `[logging] level` can apply.
    let loaded = match &args.config {
        Some(path) => toml_loader::load_from_path(path),
        None => newsdesk_config::load_config(),
    };
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();

    let rejected = logging::init(&logging::directives(args.log_level.as_deref(), level));
    for directive in rejected {
        tracing::warn!(directive = %directive, "ignoring unparseable log directive");
    }

    tracing::info!("Newsdesk v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        NewsdeskConfig::default()
    });
    tracing::debug!(
        schema = newsdesk_config::CONFIG_SCHEMA_VERSION,
        "Effective config: {}",
        newsdesk_config::config_to_json(&config)
    );

    match run(config, args.url) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: NewsdeskConfig, url: Option<String>) -> Result<(), NewsdeskError> {
    if let Err(e) = newsdesk_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("newsdesk-io")
        .enable_all()
        .build()?;

    let cache = match ContentCache::open(&config.cache, runtime.handle().clone()) {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            tracing::warn!("Content cache unavailable: {e}");
            None
        }
    };

    let event_loop = EventLoop::new().map_err(|e| NewsdeskError::Other(e.to_string()))?;
    let mut app = app::NewsdeskApp::new(config, url, runtime, cache);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| NewsdeskError::Other(format!("event loop error: {e}")))
}
