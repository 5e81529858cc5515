//! ROADMAP Storage - Storage Trait and Mock Implementation
//!
//! Defines the entity-store abstraction for ROADMAP entities and the cache
//! layer the query crate reads through. The production document-store
//! adapter lives with the deployment; tests use [`MockStorage`].

pub mod cache;

pub use cache::{
    CacheBackend, CacheStats, FeatureCacheKey, InMemoryCache, FEATURE_CACHE_PREFIX,
};

use roadmap_core::{
    Category, EnterpriseImpact, EntityKind, FeatureEntry, FeatureId, FeatureType, ImplStatus,
    Milestone, MilestoneSet, RoadmapError, RoadmapResult, Stage, StageId, StageType, StorageError,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// ============================================================================
// UPDATE TYPES
// ============================================================================

/// Update payload for feature entries. Any applied update refreshes `updated`.
#[derive(Debug, Clone, Default)]
pub struct FeatureUpdate {
    /// New summary text
    pub summary: Option<String>,
    /// New category
    pub category: Option<Category>,
    /// New feature type
    pub feature_type: Option<FeatureType>,
    /// New shipping status
    pub impl_status: Option<ImplStatus>,
    /// Replacement owner list
    pub owner_emails: Option<Vec<String>>,
    /// Replacement editor list
    pub editor_emails: Option<Vec<String>>,
    /// Unlisted visibility flag
    pub unlisted: Option<bool>,
    /// Soft-delete flag
    pub deleted: Option<bool>,
    /// Enterprise impact level
    pub enterprise_impact: Option<EnterpriseImpact>,
}

/// Update payload for stages.
#[derive(Debug, Clone, Default)]
pub struct StageUpdate {
    /// Replacement milestone targets
    pub milestones: Option<MilestoneSet>,
    /// Enterprise rollout milestone
    pub rollout_milestone: Option<Milestone>,
}

// ============================================================================
// STORAGE TRAIT
// ============================================================================

/// Storage trait for ROADMAP entities.
/// Implementations provide persistence for feature entries and stages.
pub trait StorageTrait: Send + Sync {
    // === Feature Operations ===

    /// Insert a new feature entry.
    fn feature_insert(&self, f: &FeatureEntry) -> RoadmapResult<()>;

    /// Get a feature entry by ID.
    fn feature_get(&self, id: FeatureId) -> RoadmapResult<Option<FeatureEntry>>;

    /// Update a feature entry, refreshing its `updated` timestamp.
    fn feature_update(&self, id: FeatureId, update: FeatureUpdate) -> RoadmapResult<()>;

    /// Remove a feature entry entirely.
    fn feature_delete(&self, id: FeatureId) -> RoadmapResult<()>;

    /// Fetch a batch of feature entries by ID in one call.
    /// Store-dependent order; genuinely absent ids are silently dropped.
    fn features_by_ids(&self, ids: &[FeatureId]) -> RoadmapResult<Vec<FeatureEntry>>;

    /// Scan all feature entries, ordered by `updated` descending.
    fn features_all(&self) -> RoadmapResult<Vec<FeatureEntry>>;

    // === Stage Operations ===

    /// Insert a new stage.
    fn stage_insert(&self, s: &Stage) -> RoadmapResult<()>;

    /// Get a stage by ID.
    fn stage_get(&self, id: StageId) -> RoadmapResult<Option<Stage>>;

    /// Update a stage.
    fn stage_update(&self, id: StageId, update: StageUpdate) -> RoadmapResult<()>;

    /// List stages belonging to a feature, ordered by stage id.
    fn stages_by_feature(&self, feature_id: FeatureId) -> RoadmapResult<Vec<Stage>>;

    /// List all stages whose type is in the given set, ordered by stage id.
    fn stages_by_types(&self, types: &[StageType]) -> RoadmapResult<Vec<Stage>>;
}

// ============================================================================
// MOCK STORAGE
// ============================================================================

/// In-memory mock storage for testing.
#[derive(Debug, Default)]
pub struct MockStorage {
    features: Arc<RwLock<HashMap<FeatureId, FeatureEntry>>>,
    stages: Arc<RwLock<HashMap<StageId, Stage>>>,
}

impl MockStorage {
    /// Create a new mock storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.features.write().unwrap().clear();
        self.stages.write().unwrap().clear();
    }

    /// Get count of stored features.
    pub fn feature_count(&self) -> usize {
        self.features.read().unwrap().len()
    }

    /// Get count of stored stages.
    pub fn stage_count(&self) -> usize {
        self.stages.read().unwrap().len()
    }
}

impl StorageTrait for MockStorage {
    // === Feature Operations ===

    fn feature_insert(&self, f: &FeatureEntry) -> RoadmapResult<()> {
        let mut features = self
            .features
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        if features.contains_key(&f.id) {
            return Err(RoadmapError::Storage(StorageError::InsertFailed {
                kind: EntityKind::Feature,
                reason: "already exists".to_string(),
            }));
        }
        features.insert(f.id, f.clone());
        Ok(())
    }

    fn feature_get(&self, id: FeatureId) -> RoadmapResult<Option<FeatureEntry>> {
        let features = self
            .features
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(features.get(&id).cloned())
    }

    fn feature_update(&self, id: FeatureId, update: FeatureUpdate) -> RoadmapResult<()> {
        let mut features = self
            .features
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        let feature = features
            .get_mut(&id)
            .ok_or(RoadmapError::Storage(StorageError::NotFound {
                kind: EntityKind::Feature,
                id,
            }))?;

        if let Some(summary) = update.summary {
            feature.summary = summary;
        }
        if let Some(category) = update.category {
            feature.category = category;
        }
        if let Some(feature_type) = update.feature_type {
            feature.feature_type = feature_type;
        }
        if let Some(impl_status) = update.impl_status {
            feature.impl_status_chrome = impl_status;
        }
        if let Some(owner_emails) = update.owner_emails {
            feature.owner_emails = owner_emails;
        }
        if let Some(editor_emails) = update.editor_emails {
            feature.editor_emails = editor_emails;
        }
        if let Some(unlisted) = update.unlisted {
            feature.unlisted = unlisted;
        }
        if let Some(deleted) = update.deleted {
            feature.deleted = deleted;
        }
        if let Some(enterprise_impact) = update.enterprise_impact {
            feature.enterprise_impact = enterprise_impact;
        }
        feature.updated = chrono::Utc::now();

        Ok(())
    }

    fn feature_delete(&self, id: FeatureId) -> RoadmapResult<()> {
        let mut features = self
            .features
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        features
            .remove(&id)
            .ok_or(RoadmapError::Storage(StorageError::NotFound {
                kind: EntityKind::Feature,
                id,
            }))?;
        Ok(())
    }

    fn features_by_ids(&self, ids: &[FeatureId]) -> RoadmapResult<Vec<FeatureEntry>> {
        let features = self
            .features
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        // Store-dependent order: iterate the map, not the input.
        Ok(features
            .values()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    fn features_all(&self) -> RoadmapResult<Vec<FeatureEntry>> {
        let features = self
            .features
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        let mut result: Vec<FeatureEntry> = features.values().cloned().collect();
        result.sort_by(|a, b| b.updated.cmp(&a.updated).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    // === Stage Operations ===

    fn stage_insert(&self, s: &Stage) -> RoadmapResult<()> {
        let mut stages = self.stages.write().map_err(|_| StorageError::LockPoisoned)?;
        if stages.contains_key(&s.id) {
            return Err(RoadmapError::Storage(StorageError::InsertFailed {
                kind: EntityKind::Stage,
                reason: "already exists".to_string(),
            }));
        }
        stages.insert(s.id, s.clone());
        Ok(())
    }

    fn stage_get(&self, id: StageId) -> RoadmapResult<Option<Stage>> {
        let stages = self.stages.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(stages.get(&id).cloned())
    }

    fn stage_update(&self, id: StageId, update: StageUpdate) -> RoadmapResult<()> {
        let mut stages = self.stages.write().map_err(|_| StorageError::LockPoisoned)?;
        let stage = stages
            .get_mut(&id)
            .ok_or(RoadmapError::Storage(StorageError::NotFound {
                kind: EntityKind::Stage,
                id,
            }))?;

        if let Some(milestones) = update.milestones {
            stage.milestones = milestones;
        }
        if let Some(rollout_milestone) = update.rollout_milestone {
            stage.rollout_milestone = Some(rollout_milestone);
        }

        Ok(())
    }

    fn stages_by_feature(&self, feature_id: FeatureId) -> RoadmapResult<Vec<Stage>> {
        let stages = self.stages.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut result: Vec<Stage> = stages
            .values()
            .filter(|s| s.feature_id == feature_id)
            .cloned()
            .collect();
        result.sort_by_key(|s| s.id);
        Ok(result)
    }

    fn stages_by_types(&self, types: &[StageType]) -> RoadmapResult<Vec<Stage>> {
        let stages = self.stages.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut result: Vec<Stage> = stages
            .values()
            .filter(|s| types.contains(&s.stage_type))
            .cloned()
            .collect();
        result.sort_by_key(|s| s.id);
        Ok(result)
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
