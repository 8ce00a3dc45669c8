//! Content cache validation.

use crate::schema::NewsdeskConfig;

use super::helpers::validate_range;

pub(crate) fn validate_cache(errors: &mut Vec<String>, config: &NewsdeskConfig) {
    let cache = &config.cache;
    validate_range(
        errors,
        "cache.default_ttl_secs",
        cache.default_ttl_secs,
        1,
        604_800,
    );

    let plain = !cache.category.is_empty()
        && cache.category != "."
        && cache.category != ".."
        && !cache.category.contains(['/', '\\']);
    if !plain {
        errors.push(format!(
            "cache.category '{}' must be a single directory name",
            cache.category
        ));
    }
}
