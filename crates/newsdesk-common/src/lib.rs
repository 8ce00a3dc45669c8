pub mod errors;
pub mod id;

pub use errors::{BridgeError, CacheError, ConfigError, NewsdeskError, PlatformError, WebViewError};
pub use id::RendererId;
