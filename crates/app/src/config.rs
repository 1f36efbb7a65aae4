//! Configuration discovery from the host page.

use tracker_core::{ConfigError, TrackerConfig};
use web_sys::Document;

/// Id of the optional `<script type="application/json">` element holding a
/// `TrackerConfig` document.
pub const CONFIG_ELEMENT_ID: &str = "resource-tracker-config";

/// Configuration for this page. An absent or blank config element means
/// defaults.
///
/// # Errors
///
/// Returns `ConfigError` when the element's JSON is malformed or invalid.
pub fn discover(document: &Document) -> Result<TrackerConfig, ConfigError> {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    resolve(raw.as_deref())
}

/// Parse an optional raw config document.
///
/// # Errors
///
/// Returns `ConfigError` when `raw` is present but invalid.
pub fn resolve(raw: Option<&str>) -> Result<TrackerConfig, ConfigError> {
    match raw.map(str::trim) {
        Some(json) if !json.is_empty() => TrackerConfig::from_json(json),
        _ => Ok(TrackerConfig::default()),
    }
}
