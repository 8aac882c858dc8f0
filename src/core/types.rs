//! Core type definitions used throughout the codebase

use serde::{Deserialize, Deserializer, Serialize};

/// Lower bound of a virtue score
pub const VIRTUE_MIN: f64 = 0.0;
/// Upper bound of a virtue score
pub const VIRTUE_MAX: f64 = 100.0;

/// The three build axes a player allocates points across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Virtue {
    Courage,
    Grace,
    Spirit,
}

impl Virtue {
    pub fn all() -> &'static [Virtue] {
        &[Virtue::Courage, Virtue::Grace, Virtue::Spirit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Virtue::Courage => "Courage",
            Virtue::Grace => "Grace",
            Virtue::Spirit => "Spirit",
        }
    }
}

/// A build's allocation across courage, grace and spirit (0-100 each)
///
/// Values are stored as supplied. Consumers clamp them with
/// [`VirtueProfile::clamped`]; deserialization coerces anything that is not
/// a number (missing, null, text) to 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VirtueProfile {
    #[serde(default, deserialize_with = "lenient_number")]
    pub courage: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub grace: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub spirit: f64,
}

impl VirtueProfile {
    pub fn new(courage: f64, grace: f64, spirit: f64) -> Self {
        Self {
            courage,
            grace,
            spirit,
        }
    }

    pub fn get(&self, virtue: Virtue) -> f64 {
        match virtue {
            Virtue::Courage => self.courage,
            Virtue::Grace => self.grace,
            Virtue::Spirit => self.spirit,
        }
    }

    /// Copy with every value clamped to [0, 100]; NaN becomes 0
    pub fn clamped(&self) -> Self {
        Self {
            courage: clamp_virtue(self.courage),
            grace: clamp_virtue(self.grace),
            spirit: clamp_virtue(self.spirit),
        }
    }

    pub fn total(&self) -> f64 {
        self.courage + self.grace + self.spirit
    }
}

/// Clamp a raw virtue score into [0, 100]
pub fn clamp_virtue(value: f64) -> f64 {
    if value.is_nan() {
        return VIRTUE_MIN;
    }
    value.clamp(VIRTUE_MIN, VIRTUE_MAX)
}

/// Accept numbers and numeric strings; everything else reads as 0
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Accept strings and numbers as text; everything else reads as absent
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
