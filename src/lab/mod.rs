//! Build lab calculator
//!
//! Turns a virtue allocation plus a pact and weapon into five build ratings:
//! damage, defense, mobility and control on a 0-5 scale, and a 1-5
//! complexity rating.
//!
//! A pact or weapon is first reduced to a style by keyword matching on its
//! descriptive text. Each style carries a fixed modifier vector, and the
//! weapon style also decides how strongly each virtue feeds damage.

pub mod archetype;
pub mod metrics;
pub mod modifiers;
pub mod session;

pub use archetype::{classify_pact, classify_weapon, PactArchetype, PactStyle, WeaponArchetype, WeaponStyle};
pub use metrics::{compute_base_metrics, compute_complexity, compute_metrics, compute_metrics_for, DamageWeights, Metrics};
pub use modifiers::{pact_modifier_for_key, weapon_modifier_for_key, ModifierVector};
pub use session::{BuildLab, BuildMode};
