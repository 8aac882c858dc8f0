//! Data file name validation
//!
//! Only flat `name.json` files inside the data directory are addressable:
//! letters, digits, `_` and `-` followed by `.json`, 6 to 100 characters.

use crate::core::error::{AtlasError, Result};
use serde::Serialize;
use std::fmt;

pub const JSON_EXTENSION: &str = ".json";
pub const MAX_FILENAME_LEN: usize = 100;

/// A validated data file name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DataFileName(String);

impl DataFileName {
    /// Validate an exact file name (must already end in `.json`)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AtlasError::InvalidFilename(
                "Filename must be a non-empty string".into(),
            ));
        }

        let stem = trimmed.strip_suffix(JSON_EXTENSION).unwrap_or("");
        if stem.is_empty() || !stem.chars().all(is_allowed_char) {
            return Err(AtlasError::InvalidFilename(
                "Filename must contain only letters, numbers, underscores, hyphens, and end with .json".into(),
            ));
        }

        if trimmed.len() > MAX_FILENAME_LEN {
            return Err(AtlasError::InvalidFilename(format!(
                "Filename too long (maximum {} characters)",
                MAX_FILENAME_LEN
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Like [`parse`](Self::parse), but a bare stem such as `weapons` gets `.json` appended
    pub fn normalize(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && !trimmed.ends_with(JSON_EXTENSION) && trimmed.chars().all(is_allowed_char) {
            return Self::parse(&format!("{}{}", trimmed, JSON_EXTENSION));
        }
        Self::parse(trimmed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DataFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
