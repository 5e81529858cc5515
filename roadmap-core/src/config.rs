//! Configuration types

use crate::{ConfigError, RoadmapError, RoadmapResult};
use serde::{Deserialize, Serialize};

/// Tunables for the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum number of entries a listing query returns.
    pub listing_limit: usize,
    /// Whether the full-listing result is cached under the fixed key.
    pub cache_listing: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            listing_limit: 5000,
            cache_listing: true,
        }
    }
}

impl QueryConfig {
    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `ROADMAP_LISTING_LIMIT`: Maximum listing size (default: 5000)
    /// - `ROADMAP_CACHE_LISTING`: Cache the full listing (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listing_limit: std::env::var("ROADMAP_LISTING_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.listing_limit),
            cache_listing: std::env::var("ROADMAP_CACHE_LISTING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cache_listing),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> RoadmapResult<()> {
        if self.listing_limit == 0 {
            return Err(RoadmapError::Config(ConfigError::InvalidValue {
                field: "listing_limit".to_string(),
                value: self.listing_limit.to_string(),
                reason: "listing_limit must be greater than 0".to_string(),
            }));
        }
        Ok(())
    }
}
