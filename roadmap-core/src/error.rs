//! Error types for ROADMAP operations

use crate::EntityKind;
use thiserror::Error;

/// Entity store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {kind:?} with id {id}")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("Insert failed for {kind:?}: {reason}")]
    InsertFailed { kind: EntityKind, reason: String },

    #[error("Update failed for {kind:?} with id {id}: {reason}")]
    UpdateFailed {
        kind: EntityKind,
        id: i64,
        reason: String,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Cache collaborator errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend failed: {reason}")]
    Backend { reason: String },

    #[error("Corrupt cached value at {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Cache lock poisoned")]
    LockPoisoned,
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all ROADMAP errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoadmapError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for ROADMAP operations.
pub type RoadmapResult<T> = Result<T, RoadmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_not_found() {
        let err = StorageError::NotFound {
            kind: EntityKind::Feature,
            id: 42,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Entity not found"));
        assert!(msg.contains("Feature"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_cache_error_display_corrupt() {
        let err = CacheError::Corrupt {
            key: "FeatureEntries|7".to_string(),
            reason: "expected object".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("FeatureEntries|7"));
        assert!(msg.contains("expected object"));
    }

    #[test]
    fn test_roadmap_error_from_variants() {
        let storage = RoadmapError::from(StorageError::LockPoisoned);
        assert!(matches!(storage, RoadmapError::Storage(_)));

        let cache = RoadmapError::from(CacheError::Backend {
            reason: "down".to_string(),
        });
        assert!(matches!(cache, RoadmapError::Cache(_)));

        let validation = RoadmapError::from(ValidationError::InvalidValue {
            field: "milestone".to_string(),
            reason: "negative".to_string(),
        });
        assert!(matches!(validation, RoadmapError::Validation(_)));

        let config = RoadmapError::from(ConfigError::InvalidValue {
            field: "listing_limit".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
        assert!(matches!(config, RoadmapError::Config(_)));
    }
}
