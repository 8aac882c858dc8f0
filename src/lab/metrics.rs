//! Build metrics formula
//!
//! Virtues are normalized to 0-1, blended into four 0-5 axis scores, shifted
//! by pact and weapon modifiers, then clamped. Complexity is derived from
//! how far the three virtues sit from their mean.
//!
//! Note the complexity scale runs opposite to its name: an even spread scores
//! 5 and a lopsided build scores lower.

use crate::core::types::VirtueProfile;
use crate::lab::archetype::{classify_pact, classify_weapon, PactArchetype, PactStyle, WeaponArchetype, WeaponStyle};
use crate::lab::modifiers::ModifierVector;
use serde::{Deserialize, Serialize};

/// Ceiling of every axis score
pub const AXIS_MAX: f64 = 5.0;
/// Complexity rating range
pub const COMPLEXITY_MIN: u8 = 1;
pub const COMPLEXITY_MAX: u8 = 5;
/// Mean absolute deviation per complexity step
const COMPLEXITY_STEP: f64 = 20.0;

/// How much each virtue feeds damage for a weapon style (sums to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageWeights {
    pub courage: f64,
    pub grace: f64,
    pub spirit: f64,
}

impl DamageWeights {
    pub fn for_weapon(style: WeaponStyle) -> Self {
        let (courage, grace, spirit) = match style {
            WeaponStyle::Heavy | WeaponStyle::SwordShield => (0.6, 0.1, 0.3),
            WeaponStyle::Finesse | WeaponStyle::Ranged => (0.4, 0.4, 0.2),
            WeaponStyle::Spirit => (0.15, 0.15, 0.7),
            WeaponStyle::Balanced => (0.45, 0.2, 0.35),
        };
        Self {
            courage,
            grace,
            spirit,
        }
    }
}

/// The calculator's output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub damage: f64,
    pub defense: f64,
    pub mobility: f64,
    pub control: f64,
    pub complexity: u8,
}

impl Metrics {
    /// Star string for the complexity rating, e.g. "★★★☆☆"
    pub fn complexity_stars(&self) -> String {
        let filled = self.complexity.clamp(COMPLEXITY_MIN, COMPLEXITY_MAX) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(COMPLEXITY_MAX as usize - filled))
    }

    /// Axis score as a 0-100 bar width
    pub fn bar_percent(value: f64) -> f64 {
        clamp_axis(value) / AXIS_MAX * 100.0
    }
}

fn clamp_axis(value: f64) -> f64 {
    value.clamp(0.0, AXIS_MAX)
}

/// Axis scores before modifiers and clamping
pub fn compute_base_metrics(virtues: &VirtueProfile, weapon: WeaponStyle) -> ModifierVector {
    let v = virtues.clamped();
    let (c, g, s) = (v.courage / 100.0, v.grace / 100.0, v.spirit / 100.0);
    let w = DamageWeights::for_weapon(weapon);

    ModifierVector {
        damage: AXIS_MAX * (w.courage * c + w.grace * g + w.spirit * s),
        defense: AXIS_MAX * (0.7 * c + 0.1 * g + 0.2 * s),
        mobility: AXIS_MAX * (0.1 * c + 0.75 * g + 0.15 * s),
        control: AXIS_MAX * (0.15 * c + 0.35 * g + 0.5 * s),
    }
}

/// Complexity rating from virtue spread (1-5)
pub fn compute_complexity(virtues: &VirtueProfile) -> u8 {
    let v = virtues.clamped();
    let total = match v.total() {
        t if t == 0.0 => 1.0,
        t => t,
    };
    let avg = total / 3.0;
    let spread = ((v.courage - avg).abs() + (v.grace - avg).abs() + (v.spirit - avg).abs()) / 3.0;
    let rating = 5.0 - (spread / COMPLEXITY_STEP).round();
    rating.clamp(COMPLEXITY_MIN as f64, COMPLEXITY_MAX as f64) as u8
}

/// Compute the full metrics for a build
pub fn compute_metrics(virtues: &VirtueProfile, pact: PactStyle, weapon: WeaponStyle) -> Metrics {
    let adjusted = compute_base_metrics(virtues, weapon) + pact.modifiers() + weapon.modifiers();

    Metrics {
        damage: clamp_axis(adjusted.damage),
        defense: clamp_axis(adjusted.defense),
        mobility: clamp_axis(adjusted.mobility),
        control: clamp_axis(adjusted.control),
        complexity: compute_complexity(virtues),
    }
}

/// Classify the archetypes, then compute
pub fn compute_metrics_for(
    virtues: &VirtueProfile,
    pact: Option<&PactArchetype>,
    weapon: Option<&WeaponArchetype>,
) -> Metrics {
    let pact_style = classify_pact(pact);
    let weapon_style = classify_weapon(weapon);
    tracing::debug!(
        "Computing metrics for {}/{}/{} with {} pact, {} weapon",
        virtues.courage,
        virtues.grace,
        virtues.spirit,
        pact_style,
        weapon_style
    );
    compute_metrics(virtues, pact_style, weapon_style)
}
