//! Response normalization.

use http::StatusCode;
use serde_json::{Map, Value, json};

use crate::config::defaults;

/// Converts a raw response into `(status, body)`.
///
/// - blank body: `{}`
/// - valid JSON: the parsed value
/// - anything else: `{"raw": <first 2000 characters>}`
///
/// The status passes through unchanged. Never fails.
#[must_use]
pub fn normalize(status: StatusCode, body_text: &str) -> (StatusCode, Value) {
    (status, normalize_body(body_text))
}

fn normalize_body(body_text: &str) -> Value {
    if body_text.trim().is_empty() {
        return Value::Object(Map::new());
    }

    serde_json::from_str(body_text).unwrap_or_else(|_| {
        let raw: String = body_text.chars().take(defaults::RAW_BODY_LIMIT).collect();
        json!({ "raw": raw })
    })
}
