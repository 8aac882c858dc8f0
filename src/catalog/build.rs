//! Named builds and the catalog that holds them
//!
//! The catalog mirrors `builds.json`: three arrays of builds, pacts and
//! weapons. Missing arrays read as empty.

use crate::core::types::{lenient_text, VirtueProfile};
use crate::lab::archetype::{PactArchetype, WeaponArchetype};
use serde::{Deserialize, Serialize};

/// Placeholder shown when an archetype has no descriptive text
pub const NO_ROLE_TEXT: &str = "–";

/// A curated build from the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub pact_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub weapon_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtues: Option<VirtueProfile>,
}

/// Builds, pacts and weapons read from the catalog file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildCatalog {
    #[serde(default)]
    pub builds: Vec<Build>,
    #[serde(default)]
    pub pacts: Vec<PactArchetype>,
    #[serde(default)]
    pub weapons: Vec<WeaponArchetype>,
}

impl BuildCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_build(&self, id: &str) -> Option<&Build> {
        self.builds.iter().find(|b| b.id.as_deref() == Some(id))
    }

    pub fn find_pact(&self, id: &str) -> Option<&PactArchetype> {
        self.pacts.iter().find(|p| p.id.as_deref() == Some(id))
    }

    pub fn find_weapon(&self, id: &str) -> Option<&WeaponArchetype> {
        self.weapons.iter().find(|w| w.id.as_deref() == Some(id))
    }

    pub fn first_build(&self) -> Option<&Build> {
        self.builds.first()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty() && self.pacts.is_empty() && self.weapons.is_empty()
    }
}

fn first_non_empty<'a>(fields: &[Option<&'a str>]) -> Option<&'a str> {
    fields.iter().flatten().copied().find(|f| !f.is_empty())
}

/// Text describing a pact's role: role, else name
pub fn pact_role_text(pact: Option<&PactArchetype>) -> &str {
    pact.and_then(|p| first_non_empty(&[p.role.as_deref(), p.name.as_deref()]))
        .unwrap_or(NO_ROLE_TEXT)
}

/// Text describing a weapon's role: type, else category, else name
pub fn weapon_role_text(weapon: Option<&WeaponArchetype>) -> &str {
    weapon
        .and_then(|w| {
            first_non_empty(&[
                w.weapon_type.as_deref(),
                w.category.as_deref(),
                w.name.as_deref(),
            ])
        })
        .unwrap_or(NO_ROLE_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "builds": [
            {
                "id": "bulwark",
                "name": "Bulwark",
                "summary": "Hold the line.",
                "tags": ["tank", "beginner"],
                "tips": ["Block first"],
                "pactId": "warden",
                "weaponId": "sns",
                "virtues": {"courage": 70, "grace": 10, "spirit": 20}
            },
            {"id": "glass", "name": "Glass Cannon"}
        ],
        "pacts": [{"id": "warden", "name": "Warden Pact", "role": "Defender"}],
        "weapons": [{"id": "sns", "name": "Oathblade", "type": "Sword & Shield"}]
    }"#;

    #[test]
    fn test_parse_and_lookup() {
        let catalog: BuildCatalog = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(catalog.builds.len(), 2);

        let bulwark = catalog.find_build("bulwark").unwrap();
        assert_eq!(bulwark.pact_id.as_deref(), Some("warden"));
        assert_eq!(bulwark.virtues, Some(VirtueProfile::new(70.0, 10.0, 20.0)));
        assert_eq!(bulwark.tags, vec!["tank", "beginner"]);

        let glass = catalog.find_build("glass").unwrap();
        assert!(glass.virtues.is_none());
        assert!(glass.tips.is_empty());

        assert!(catalog.find_pact("warden").is_some());
        assert!(catalog.find_weapon("missing").is_none());
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let catalog: BuildCatalog = serde_json::from_str(r#"{"builds": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.first_build().is_none());
    }

    #[test]
    fn test_role_text() {
        let catalog: BuildCatalog = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(pact_role_text(catalog.find_pact("warden")), "Defender");
        assert_eq!(weapon_role_text(catalog.find_weapon("sns")), "Sword & Shield");
        assert_eq!(pact_role_text(None), NO_ROLE_TEXT);

        let unnamed = WeaponArchetype {
            id: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(weapon_role_text(Some(&unnamed)), NO_ROLE_TEXT);
    }
}
