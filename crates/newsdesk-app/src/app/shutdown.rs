//! Graceful shutdown: dispose renderers, stop background work.

use std::time::Duration;

use super::core::NewsdeskApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl NewsdeskApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Dispose the article view (flushes its cookies)
    /// 2. Tear down pooled renderers
    /// 3. Shut down the tokio runtime (pending cache sweeps are abandoned)
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(manager) = &self.manager {
            if let Some(article) = self.article.take() {
                manager.dispose(article);
            }
            let removed = manager.reset();
            tracing::debug!(removed, "renderer pool cleared");
        }
        self.manager = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.window = None;
        tracing::info!("Shutdown sequence complete");
    }
}
