//! JSON content checks for data files

use crate::core::error::{AtlasError, Result};
use serde_json::Value;

/// A parsed data document and its shape
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedJson {
    pub parsed: Value,
    pub is_array: bool,
    pub item_count: usize,
}

/// Parse content that must be a JSON object or array
pub fn validate_json(content: &str) -> Result<ValidatedJson> {
    if content.trim().is_empty() {
        return Err(AtlasError::InvalidJson("Content must be a non-empty string".into()));
    }

    let parsed: Value = serde_json::from_str(content)
        .map_err(|e| AtlasError::InvalidJson(format!("Invalid JSON: {}", e)))?;

    if !parsed.is_object() && !parsed.is_array() {
        return Err(AtlasError::InvalidJson(
            "JSON content must be an object or array".into(),
        ));
    }

    Ok(ValidatedJson {
        is_array: parsed.is_array(),
        item_count: item_count(&parsed),
        parsed,
    })
}

/// Number of records in a data document
///
/// Arrays count their elements. Objects with an `items` array, or with a
/// single key wrapping an array (`{"weapons": [...]}`), count that array.
/// Any other object counts its keys; scalars count zero.
pub fn item_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("items") {
                return items.len();
            }
            if map.len() == 1 {
                if let Some(Value::Array(items)) = map.values().next() {
                    return items.len();
                }
            }
            map.len()
        }
        _ => 0,
    }
}

/// Pretty-print with two-space indentation
pub fn pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
