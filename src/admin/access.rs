//! Write-access guard
//!
//! When enabled, write requests must carry the access header set by the
//! fronting proxy (or its fallback). Only presence is checked.

use crate::core::config::AccessConfig;
use crate::core::error::{AtlasError, Result};
use axum::http::HeaderMap;

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    enabled: bool,
    header_name: String,
    fallback_header: String,
}

impl AccessPolicy {
    pub fn from_config(config: &AccessConfig) -> Self {
        Self {
            enabled: config.enabled,
            header_name: config.header_name.to_lowercase(),
            fallback_header: config.fallback_header.to_lowercase(),
        }
    }

    /// A policy that lets every request through
    pub fn open() -> Self {
        Self::from_config(&AccessConfig::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Check a write request's headers
    pub fn authorize(&self, headers: &HeaderMap) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let present = [&self.header_name, &self.fallback_header]
            .iter()
            .filter(|h| !h.is_empty())
            .any(|h| headers.get(h.as_str()).is_some_and(|v| !v.is_empty()));

        if present {
            Ok(())
        } else {
            tracing::warn!("Rejected write without {} header", self.header_name);
            Err(AtlasError::Unauthorized(
                "Cloudflare Access header missing".into(),
            ))
        }
    }
}
