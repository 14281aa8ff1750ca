//! Key/value rows used for params, headers and form bodies.

use serde::{Deserialize, Serialize};

/// A single editable key/value row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Row key (header name, param name, form field).
    #[serde(default)]
    pub key: String,
    /// Row value. May contain `{{variables}}`.
    #[serde(default)]
    pub value: String,
    /// Whether this row is sent.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl KeyValue {
    /// Creates a new enabled row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates the blank trailing row editors show for new input.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_defaults_to_true() {
        let row: KeyValue = serde_json::from_str(r#"{"key": "Accept"}"#).unwrap_or_default();
        assert_eq!(row.key, "Accept");
        assert!(row.value.is_empty());
        assert!(row.enabled);
    }
}
