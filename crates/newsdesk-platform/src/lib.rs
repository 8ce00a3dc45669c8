pub mod paths;

pub use paths::{cache_dir, config_dir, content_cache_dir, ensure_dirs};
