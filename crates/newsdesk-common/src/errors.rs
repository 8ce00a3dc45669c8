use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),
}

/// Failures surfaced by renderer operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebViewError {
    /// The underlying web view rejected the call.
    #[error("renderer error: {0}")]
    Renderer(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("navigation blocked: {0}")]
    NavigationBlocked(String),

    /// A script threw, or the engine failed to evaluate it.
    #[error("script execution error: {0}")]
    ScriptExecution(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error returned by a native bridge handler. Relayed to the page as the
/// `error` argument of the callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BridgeError {
    pub message: String,
}

impl BridgeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NewsdeskError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    WebView(#[from] WebViewError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
