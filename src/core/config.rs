//! Service configuration with documented defaults
//!
//! Values come from an optional TOML file, then environment overrides.
//! Every section has defaults so an empty (or missing) file is valid.

use crate::core::error::{AtlasError, Result};
use crate::core::types::VirtueProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up by the binaries
pub const DEFAULT_CONFIG_FILE: &str = "atlas.toml";

/// HTTP listener settings for the admin API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind (overridden by `PORT`)
    pub port: u16,
    /// Maximum accepted request body size in bytes
    ///
    /// Applies to JSON saves and multipart uploads alike.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Where the wiki JSON files live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the editable `*.json` files (overridden by `ATLAS_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Name of the backup directory inside `data_dir`
    pub backup_dir_name: String,
    /// File inside `data_dir` holding builds, pacts and weapons
    pub catalog_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            backup_dir_name: "backups".to_string(),
            catalog_file: "builds.json".to_string(),
        }
    }
}

impl DataConfig {
    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir.join(&self.backup_dir_name)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }
}

/// Header-presence check guarding write endpoints
///
/// Only checks that the header is present. Signature verification is
/// left to the fronting proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Overridden by `ENABLE_CLOUDFLARE_ACCESS_CHECK=true`
    pub enabled: bool,
    /// Overridden by `CLOUDFLARE_ACCESS_HEADER_NAME`
    pub header_name: String,
    /// Also accepted when present
    pub fallback_header: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            header_name: "CF-Access-Jwt-Assertion".to_string(),
            fallback_header: "cf-access-authenticated-user".to_string(),
        }
    }
}

/// Build lab defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Virtues applied when a build has none
    pub default_virtues: VirtueProfile,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            default_virtues: VirtueProfile::new(40.0, 30.0, 30.0),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub access: AccessConfig,
    pub lab: LabConfig,
}

impl AtlasConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load, apply environment overrides and validate
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process env in practice)
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(dir) = lookup("ATLAS_DATA_DIR") {
            self.data.data_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("ENABLE_CLOUDFLARE_ACCESS_CHECK") {
            self.access.enabled = flag == "true";
        }
        if let Some(header) = lookup("CLOUDFLARE_ACCESS_HEADER_NAME") {
            if !header.trim().is_empty() {
                self.access.header_name = header;
            }
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.server.max_body_bytes == 0 {
            return Err(AtlasError::Config("server.max_body_bytes must be positive".into()));
        }

        let backup = &self.data.backup_dir_name;
        if backup.is_empty() || backup.contains('/') || backup.contains('\\') || backup.contains("..") {
            return Err(AtlasError::Config(format!(
                "data.backup_dir_name ({:?}) must be a plain directory name",
                backup
            )));
        }

        if self.access.enabled && self.access.header_name.trim().is_empty() {
            return Err(AtlasError::Config(
                "access.header_name is required when the access check is enabled".into(),
            ));
        }

        let v = &self.lab.default_virtues;
        if v.clamped() != *v {
            return Err(AtlasError::Config(format!(
                "lab.default_virtues must be within 0-100 (got {}/{}/{})",
                v.courage, v.grace, v.spirit
            )));
        }

        Ok(())
    }
}
