//! Build lab session state
//!
//! Holds the current selection (mode, build, virtues, pact, weapon) and
//! recomputes metrics from it on demand. In preset mode the virtues always
//! come from the active build; custom mode lets the caller set them.

use crate::catalog::{pact_role_text, weapon_role_text, Build, BuildCatalog};
use crate::core::types::VirtueProfile;
use crate::lab::archetype::{classify_pact, classify_weapon, PactStyle, WeaponStyle};
use crate::lab::metrics::{compute_metrics, Metrics};
use serde::{Deserialize, Serialize};

/// Whether virtues follow the selected build or the user's sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
    #[default]
    Preset,
    Custom,
}

impl std::str::FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preset" => Ok(BuildMode::Preset),
            "custom" => Ok(BuildMode::Custom),
            other => Err(format!("Unknown build mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildLab {
    catalog: BuildCatalog,
    default_virtues: VirtueProfile,
    mode: BuildMode,
    active_build: Option<String>,
    virtues: VirtueProfile,
    pact_id: Option<String>,
    weapon_id: Option<String>,
}

impl BuildLab {
    /// Start in preset mode on the catalog's first build
    pub fn new(catalog: BuildCatalog) -> Self {
        Self::with_default_virtues(catalog, VirtueProfile::new(40.0, 30.0, 30.0))
    }

    pub fn with_default_virtues(catalog: BuildCatalog, default_virtues: VirtueProfile) -> Self {
        let mut lab = Self {
            catalog,
            default_virtues: default_virtues.clamped(),
            mode: BuildMode::Preset,
            active_build: None,
            virtues: VirtueProfile::default(),
            pact_id: None,
            weapon_id: None,
        };
        if let Some(build) = lab.catalog.first_build().cloned() {
            lab.apply_build(&build);
        }
        lab
    }

    pub fn catalog(&self) -> &BuildCatalog {
        &self.catalog
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn virtues(&self) -> VirtueProfile {
        self.virtues
    }

    pub fn pact_id(&self) -> Option<&str> {
        self.pact_id.as_deref()
    }

    pub fn weapon_id(&self) -> Option<&str> {
        self.weapon_id.as_deref()
    }

    pub fn active_build(&self) -> Option<&Build> {
        self.active_build
            .as_deref()
            .and_then(|id| self.catalog.find_build(id))
    }

    /// Make a catalog build active; returns false if the id is unknown
    pub fn select_build(&mut self, id: &str) -> bool {
        match self.catalog.find_build(id).cloned() {
            Some(build) => {
                self.apply_build(&build);
                true
            }
            None => {
                tracing::warn!("Unknown build '{}'", id);
                false
            }
        }
    }

    fn apply_build(&mut self, build: &Build) {
        self.active_build = build.id.clone();
        self.pact_id = build.pact_id.clone().filter(|id| !id.is_empty());
        self.weapon_id = build.weapon_id.clone().filter(|id| !id.is_empty());
        self.virtues = build.virtues.unwrap_or(self.default_virtues).clamped();
        tracing::debug!("Applied build '{}'", build.name);
    }

    /// Switch mode; returning to preset restores the active build
    pub fn set_mode(&mut self, mode: BuildMode) {
        self.mode = mode;
        if mode == BuildMode::Preset {
            if let Some(build) = self.active_build().cloned() {
                self.apply_build(&build);
            }
        }
    }

    /// Set slider virtues; ignored (returns false) outside custom mode
    pub fn set_virtues(&mut self, virtues: VirtueProfile) -> bool {
        if self.mode != BuildMode::Custom {
            return false;
        }
        self.virtues = virtues.clamped();
        true
    }

    /// Select a pact by id; an empty id clears the selection
    pub fn select_pact(&mut self, id: &str) {
        self.pact_id = Some(id.to_string()).filter(|id| !id.is_empty());
    }

    /// Select a weapon by id; an empty id clears the selection
    pub fn select_weapon(&mut self, id: &str) {
        self.weapon_id = Some(id.to_string()).filter(|id| !id.is_empty());
    }

    pub fn pact_style(&self) -> PactStyle {
        classify_pact(self.pact_id.as_deref().and_then(|id| self.catalog.find_pact(id)))
    }

    pub fn weapon_style(&self) -> WeaponStyle {
        classify_weapon(self.weapon_id.as_deref().and_then(|id| self.catalog.find_weapon(id)))
    }

    /// Metrics for the current selection
    pub fn metrics(&self) -> Metrics {
        compute_metrics(&self.virtues, self.pact_style(), self.weapon_style())
    }

    pub fn pact_role_text(&self) -> &str {
        pact_role_text(self.pact_id.as_deref().and_then(|id| self.catalog.find_pact(id)))
    }

    pub fn weapon_role_text(&self) -> &str {
        weapon_role_text(self.weapon_id.as_deref().and_then(|id| self.catalog.find_weapon(id)))
    }
}
