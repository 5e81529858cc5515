//! ROADMAP Query - Read-through caching and aggregation
//!
//! The read side of the feature tracker: batch loads, recency listings,
//! milestone bucket views, and enterprise release-notes listings, all
//! cached whole with caller-driven invalidation. Storage and cache
//! backends are pluggable through the traits in `roadmap-storage`.

pub mod converters;
pub mod features;
pub mod permissions;
pub mod stage_index;

pub use converters::feature_to_basic;
pub use features::FeatureQueries;
pub use permissions::{Permissions, StandardPermissions};
pub use stage_index::StageIndex;
