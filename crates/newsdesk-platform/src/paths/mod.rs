mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{cache_dir, config_dir, content_cache_dir};
