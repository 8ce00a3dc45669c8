use std::path::PathBuf;

use newsdesk_common::PlatformError;

pub(super) const APP_NAME: &str = "newsdesk";

/// Returns the platform-specific configuration directory.
///
/// - macOS: `~/Library/Application Support/newsdesk`
/// - Linux: `$XDG_CONFIG_HOME/newsdesk` (defaults to `~/.config/newsdesk`)
/// - Windows: `%APPDATA%\newsdesk`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific cache directory.
///
/// - macOS: `~/Library/Caches/newsdesk`
/// - Linux: `$XDG_CACHE_HOME/newsdesk` (defaults to `~/.cache/newsdesk`)
/// - Windows: `%LOCALAPPDATA%\newsdesk`
pub fn cache_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::cache_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine cache directory".into()))?
        .join(APP_NAME))
}

/// Returns the directory holding cached content files for one category.
///
/// Located at `cache_dir()/content/<category>`. The category must be a
/// single plain path component.
pub fn content_cache_dir(category: &str) -> Result<PathBuf, PlatformError> {
    let plain = !category.is_empty()
        && category != "."
        && category != ".."
        && !category.contains(['/', '\\']);
    if !plain {
        return Err(PlatformError::PathError(format!(
            "invalid cache category '{category}'"
        )));
    }
    Ok(cache_dir()?.join("content").join(category))
}
