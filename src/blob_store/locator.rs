//! # Locator Parsing
//!
//! Turns a public locator back into the storage key it was issued for.
//! Locators normally carry the configured public URL prefix, but records
//! written by older deployments may hold arbitrary URLs, so extraction falls
//! through a prioritized chain instead of assuming one shape.

/// Extract the storage key from a locator.
///
/// Fallback chain, first match wins:
/// 1. strip the configured public URL prefix;
/// 2. treat the locator as a URL and take its path component;
/// 3. split on the last path separator.
///
/// Returns `None` when no non-empty key can be determined. Callers treat
/// that as an explicit unknown-key outcome, not an error.
pub fn extract_storage_key(locator: &str, public_url: &str) -> Option<String> {
    if locator.is_empty() {
        return None;
    }

    let prefix = public_url.trim_end_matches('/');
    if !prefix.is_empty() && locator.starts_with(prefix) {
        let key = locator[prefix.len()..].trim_start_matches('/');
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }

    if let Some(path) = url_path(locator) {
        let key = path.trim_start_matches('/');
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }

    // A URL that survived the first two steps has no path, so there is no
    // key to recover from it.
    if locator.contains("://") {
        return None;
    }

    let tail = locator.rsplit('/').next().unwrap_or("");
    if tail.is_empty() {
        None
    } else {
        Some(tail.to_string())
    }
}

/// Path component of `scheme://host/path` locators, without a URL crate.
fn url_path(locator: &str) -> Option<&str> {
    let rest = locator.split_once("://")?.1;
    let slash = rest.find('/')?;
    Some(&rest[slash..])
}
