//! Built-in sample catalog used when no catalog file is available

use crate::catalog::build::{Build, BuildCatalog};
use crate::core::types::VirtueProfile;
use crate::lab::archetype::{PactArchetype, WeaponArchetype};

fn pact(id: &str, name: &str, role: &str) -> PactArchetype {
    PactArchetype {
        id: Some(id.into()),
        name: Some(name.into()),
        role: Some(role.into()),
    }
}

fn weapon(id: &str, name: &str, weapon_type: &str) -> WeaponArchetype {
    WeaponArchetype {
        id: Some(id.into()),
        name: Some(name.into()),
        weapon_type: Some(weapon_type.into()),
        ..Default::default()
    }
}

impl BuildCatalog {
    /// Three starter builds with their pacts and weapons
    pub fn with_defaults() -> Self {
        Self {
            builds: vec![
                Build {
                    id: Some("bulwark".into()),
                    name: "Bulwark".into(),
                    summary: Some("Soak hits up front and hold the line.".into()),
                    tags: vec!["tank".into(), "beginner".into()],
                    tips: vec!["Block before you swing.".into()],
                    pact_id: Some("warden".into()),
                    weapon_id: Some("oathblade".into()),
                    virtues: Some(VirtueProfile::new(70.0, 10.0, 20.0)),
                },
                Build {
                    id: Some("skirmisher".into()),
                    name: "Skirmisher".into(),
                    summary: Some("Dart in, strike, and get out.".into()),
                    tags: vec!["mobile".into()],
                    tips: vec!["Dodge through attacks, not away from them.".into()],
                    pact_id: Some("ember".into()),
                    weapon_id: Some("stiletto".into()),
                    virtues: Some(VirtueProfile::new(30.0, 60.0, 10.0)),
                },
                Build {
                    id: Some("channeler".into()),
                    name: "Channeler".into(),
                    summary: Some("Control the field from range.".into()),
                    tags: vec!["caster".into(), "support".into()],
                    tips: Vec::new(),
                    pact_id: Some("veil".into()),
                    weapon_id: Some("ashwood".into()),
                    virtues: None,
                },
            ],
            pacts: vec![
                pact("warden", "Warden Pact", "Defender"),
                pact("ember", "Ember Pact", "Vanguard"),
                pact("veil", "Veil Pact", "Mystic"),
            ],
            weapons: vec![
                weapon("oathblade", "Oathblade", "Sword & Shield"),
                weapon("stiletto", "Stiletto", "Dagger"),
                weapon("ashwood", "Ashwood Staff", "Staff"),
            ],
        }
    }
}
