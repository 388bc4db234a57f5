//! Redacting wrapper for the personal access token.

use std::fmt;

/// Placeholder printed in place of secret material.
pub const REDACTED: &str = "[REDACTED]";

/// A personal access token that never prints its value.
///
/// `Debug` always renders [`REDACTED`] and there is no `Display` impl, so
/// the token cannot end up in logs or error messages through formatting.
/// The value is only reachable through [`expose_secret`](Self::expose_secret).
///
/// # Example
///
/// ```
/// use azdo_trigger::secret::AccessToken;
///
/// let pat = AccessToken::new("abc123");
/// assert_eq!(format!("{pat:?}"), "[REDACTED]");
/// assert_eq!(pat.expose_secret(), "abc123");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken {
    inner: String,
}

impl AccessToken {
    /// Wraps a token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Returns the raw token value.
    ///
    /// Only the transport should need this.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Returns true if no token was supplied (empty or whitespace only).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }

    /// Replaces every occurrence of the token in `text` with [`REDACTED`].
    ///
    /// Blank tokens leave the text untouched.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        if self.inner.is_empty() {
            return text.to_string();
        }
        text.replace(&self.inner, REDACTED)
    }

    /// Redacts the token from every string inside a JSON value, keys included.
    pub fn redact_json(&self, value: &mut serde_json::Value) {
        if self.inner.is_empty() {
            return;
        }
        match value {
            serde_json::Value::String(s) => {
                if s.contains(&self.inner) {
                    *s = self.redact(s);
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    self.redact_json(item);
                }
            }
            serde_json::Value::Object(map) => {
                if map.keys().any(|k| k.contains(&self.inner)) {
                    let entries = std::mem::take(map);
                    for (key, item) in entries {
                        map.insert(self.redact(&key), item);
                    }
                }
                for item in map.values_mut() {
                    self.redact_json(item);
                }
            }
            serde_json::Value::Null | serde_json::Value::Bool(_) | serde_json::Value::Number(_) => {}
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
