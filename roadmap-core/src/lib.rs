//! ROADMAP Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no query or caching logic.

pub mod config;
pub mod entities;
pub mod enums;
pub mod error;
pub mod filter;
pub mod identity;

pub use config::QueryConfig;
pub use entities::{FeatureEntry, MilestoneSet, Stage};
pub use enums::{
    Category, EnterpriseImpact, EntityKind, FeatureType, ImplStatus, ShipBucket, StageType,
    MILESTONE_STAGE_TYPES, SHIP_BUCKETS,
};
pub use error::{
    CacheError, ConfigError, RoadmapError, RoadmapResult, StorageError, ValidationError,
};
pub use filter::ListingFilter;
pub use identity::ViewerIdentity;

use chrono::{DateTime, Utc};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Numeric identifier assigned by the entity store to a feature.
pub type FeatureId = i64;

/// Numeric identifier assigned by the entity store to a stage.
pub type StageId = i64;

/// Milestone number - a release boundary.
pub type Milestone = i32;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
