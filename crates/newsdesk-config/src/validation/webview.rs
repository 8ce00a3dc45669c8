//! Web view and pool validation.

use crate::schema::NewsdeskConfig;

use super::helpers::validate_range;

pub(crate) fn validate_webview(errors: &mut Vec<String>, config: &NewsdeskConfig) {
    let webview = &config.webview;
    validate_range(errors, "webview.pool_size", webview.pool_size as u64, 0, 16);
    validate_range(
        errors,
        "webview.idle_timeout_secs",
        webview.idle_timeout_secs,
        10,
        3600,
    );

    if webview.allowed_nav_prefixes.is_empty() {
        errors.push("webview.allowed_nav_prefixes must not be empty".to_string());
    }
    for prefix in &webview.allowed_nav_prefixes {
        if !prefix.contains(':') {
            errors.push(format!(
                "webview.allowed_nav_prefixes entry '{prefix}' has no scheme"
            ));
        }
    }
}
