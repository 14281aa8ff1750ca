//! JSON helpers for stable output and lenient input.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Parses JSON into an untyped value, for input that needs repair before
/// it can be decoded into domain types.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON.
pub fn parse_json_value(json: &str) -> Result<Value, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Decodes a typed value out of an already parsed JSON value.
///
/// # Errors
///
/// Returns an error if the value does not match the expected type.
pub fn from_json_value<T: DeserializeOwned>(value: Value) -> Result<T, SerializationError> {
    serde_json::from_value(value).map_err(SerializationError::Deserialize)
}
