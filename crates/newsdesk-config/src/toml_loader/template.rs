/// Default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r#"# Newsdesk Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[webview]
# pool_size = 3                # 0-16 idle renderers kept for reuse
# idle_timeout_secs = 300      # 10-3600, idle renderers dropped on memory pressure
# user_agent = "Newsdesk/0.1"
# devtools = false
# transparent = false
# allowed_nav_prefixes = ["https://", "about:blank"]
# page_cache_dir = "/path/to/engine/cache"

[cache]
# category = "html"
# default_ttl_secs = 3600      # 1-604800

[logging]
# level = "INFO"               # TRACE, DEBUG, INFO, WARNING, ERROR
"#
}
