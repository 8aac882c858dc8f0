//! Load the build catalog from JSON

use crate::catalog::build::BuildCatalog;
use crate::core::error::Result;
use std::fs;
use std::path::Path;

impl BuildCatalog {
    /// Parse catalog JSON
    pub fn from_json(content: &str) -> Result<Self> {
        let catalog: BuildCatalog = serde_json::from_str(content)?;
        for problem in catalog.dangling_references() {
            tracing::warn!("{}", problem);
        }
        Ok(catalog)
    }

    /// Builds pointing at pacts or weapons the catalog does not contain
    ///
    /// These still work: the missing archetype classifies as the neutral or
    /// balanced default.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for build in &self.builds {
            let build_id = build.id.as_deref().unwrap_or("<unnamed>");
            if let Some(pact_id) = build.pact_id.as_deref().filter(|id| !id.is_empty()) {
                if self.find_pact(pact_id).is_none() {
                    problems.push(format!("Build '{}' references unknown pact '{}'", build_id, pact_id));
                }
            }
            if let Some(weapon_id) = build.weapon_id.as_deref().filter(|id| !id.is_empty()) {
                if self.find_weapon(weapon_id).is_none() {
                    problems.push(format!(
                        "Build '{}' references unknown weapon '{}'",
                        build_id, weapon_id
                    ));
                }
            }
        }
        problems
    }
}

/// Load the catalog file (usually `data/builds.json`)
pub fn load_catalog(path: &Path) -> Result<BuildCatalog> {
    let content = fs::read_to_string(path)?;
    let catalog = BuildCatalog::from_json(&content)?;
    tracing::debug!(
        "Loaded {} builds, {} pacts, {} weapons from {:?}",
        catalog.builds.len(),
        catalog.pacts.len(),
        catalog.weapons.len(),
        path
    );
    Ok(catalog)
}
