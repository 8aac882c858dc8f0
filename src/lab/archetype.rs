//! Archetype classification
//!
//! Pacts and weapons carry only free-text identity fields. Each is reduced
//! to a closed style key by scanning one search string for keyword groups
//! in a fixed order; the first group with a hit wins.

use crate::core::types::lenient_text;
use serde::{Deserialize, Serialize};

/// A pact as it appears in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PactArchetype {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A weapon as it appears in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponArchetype {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub weapon_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl PactArchetype {
    /// Fields consulted for classification, highest priority first
    pub fn identity_fields(&self) -> [Option<&str>; 3] {
        [self.role.as_deref(), self.name.as_deref(), self.id.as_deref()]
    }
}

impl WeaponArchetype {
    /// Fields consulted for classification, highest priority first
    pub fn identity_fields(&self) -> [Option<&str>; 5] {
        [
            self.weapon_type.as_deref(),
            self.category.as_deref(),
            self.role.as_deref(),
            self.name.as_deref(),
            self.id.as_deref(),
        ]
    }
}

/// Coarse pact play style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PactStyle {
    Defender,
    Vanguard,
    Mystic,
    Neutral,
}

/// Coarse weapon play style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponStyle {
    SwordShield,
    Heavy,
    Spirit,
    Finesse,
    Ranged,
    Balanced,
}

/// Pact keyword groups in match order
const PACT_KEYWORDS: &[(PactStyle, &[&str])] = &[
    (PactStyle::Defender, &["defend", "warden", "tank"]),
    (PactStyle::Vanguard, &["vanguard", "aggress", "assault"]),
    (PactStyle::Mystic, &["mystic", "spirit", "caster"]),
];

/// Weapon keyword groups in match order
///
/// Spirit is checked before heavy so "spirit hammer" reads as a focus.
const WEAPON_KEYWORDS: &[(WeaponStyle, &[&str])] = &[
    (WeaponStyle::Spirit, &["staff", "wand", "spirit", "rod"]),
    (WeaponStyle::Finesse, &["rapier", "dagger", "finesse", "duelist"]),
    (WeaponStyle::Ranged, &["bow", "ranged", "crossbow"]),
    (WeaponStyle::Heavy, &["greatsword", "heavy", "hammer", "axe"]),
    (WeaponStyle::SwordShield, &["shield", "sword & shield", "sword_shield"]),
];

impl PactStyle {
    pub fn all() -> &'static [PactStyle] {
        &[
            PactStyle::Defender,
            PactStyle::Vanguard,
            PactStyle::Mystic,
            PactStyle::Neutral,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            PactStyle::Defender => "defender",
            PactStyle::Vanguard => "vanguard",
            PactStyle::Mystic => "mystic",
            PactStyle::Neutral => "neutral",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }
}

impl WeaponStyle {
    pub fn all() -> &'static [WeaponStyle] {
        &[
            WeaponStyle::SwordShield,
            WeaponStyle::Heavy,
            WeaponStyle::Spirit,
            WeaponStyle::Finesse,
            WeaponStyle::Ranged,
            WeaponStyle::Balanced,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            WeaponStyle::SwordShield => "sword_shield",
            WeaponStyle::Heavy => "heavy",
            WeaponStyle::Spirit => "spirit",
            WeaponStyle::Finesse => "finesse",
            WeaponStyle::Ranged => "ranged",
            WeaponStyle::Balanced => "balanced",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for PactStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::fmt::Display for WeaponStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Lowercased first non-empty field, or "" when every field is empty
fn search_text(fields: &[Option<&str>]) -> String {
    fields
        .iter()
        .flatten()
        .find(|f| !f.is_empty())
        .map(|f| f.to_lowercase())
        .unwrap_or_default()
}

fn first_match<S: Copy>(text: &str, groups: &[(S, &[&str])]) -> Option<S> {
    groups
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(style, _)| *style)
}

/// Classify a pact; a missing pact is neutral
pub fn classify_pact(pact: Option<&PactArchetype>) -> PactStyle {
    let Some(pact) = pact else {
        return PactStyle::Neutral;
    };
    let text = search_text(&pact.identity_fields());
    first_match(&text, PACT_KEYWORDS).unwrap_or(PactStyle::Neutral)
}

/// Classify a weapon; a missing weapon is balanced
pub fn classify_weapon(weapon: Option<&WeaponArchetype>) -> WeaponStyle {
    let Some(weapon) = weapon else {
        return WeaponStyle::Balanced;
    };
    let text = search_text(&weapon.identity_fields());
    first_match(&text, WEAPON_KEYWORDS).unwrap_or(WeaponStyle::Balanced)
}
