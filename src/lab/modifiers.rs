//! Style modifier tables
//!
//! Each style nudges the four combat axes by a fixed additive amount.

use crate::lab::archetype::{PactStyle, WeaponStyle};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Additive adjustment to the four combat axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModifierVector {
    pub damage: f64,
    pub defense: f64,
    pub mobility: f64,
    pub control: f64,
}

impl ModifierVector {
    pub const ZERO: ModifierVector = ModifierVector::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(damage: f64, defense: f64, mobility: f64, control: f64) -> Self {
        Self {
            damage,
            defense,
            mobility,
            control,
        }
    }
}

impl Add for ModifierVector {
    type Output = ModifierVector;

    fn add(self, rhs: ModifierVector) -> ModifierVector {
        ModifierVector {
            damage: self.damage + rhs.damage,
            defense: self.defense + rhs.defense,
            mobility: self.mobility + rhs.mobility,
            control: self.control + rhs.control,
        }
    }
}

impl PactStyle {
    /// Axis adjustments granted by this pact style
    pub fn modifiers(&self) -> ModifierVector {
        match self {
            PactStyle::Defender => ModifierVector::new(-0.4, 1.3, -0.4, 0.3),
            PactStyle::Vanguard => ModifierVector::new(1.0, -0.6, 0.4, 0.0),
            PactStyle::Mystic => ModifierVector::new(0.4, -0.4, 0.0, 1.0),
            PactStyle::Neutral => ModifierVector::ZERO,
        }
    }
}

impl WeaponStyle {
    /// Axis adjustments granted by this weapon style
    pub fn modifiers(&self) -> ModifierVector {
        match self {
            WeaponStyle::SwordShield => ModifierVector::new(-0.1, 0.7, -0.3, 0.0),
            WeaponStyle::Heavy => ModifierVector::new(0.7, 0.0, -0.5, -0.1),
            WeaponStyle::Spirit => ModifierVector::new(0.4, -0.5, 0.0, 0.8),
            WeaponStyle::Finesse => ModifierVector::new(0.2, -0.2, 0.5, 0.3),
            WeaponStyle::Ranged => ModifierVector::new(0.4, -0.3, 0.2, 0.4),
            WeaponStyle::Balanced => ModifierVector::ZERO,
        }
    }
}

/// Pact modifiers by style key; unknown keys get the zero vector
pub fn pact_modifier_for_key(key: &str) -> ModifierVector {
    PactStyle::from_key(key)
        .map(|s| s.modifiers())
        .unwrap_or(ModifierVector::ZERO)
}

/// Weapon modifiers by style key; unknown keys get the zero vector
pub fn weapon_modifier_for_key(key: &str) -> ModifierVector {
    WeaponStyle::from_key(key)
        .map(|s| s.modifiers())
        .unwrap_or(ModifierVector::ZERO)
}
