//! Feature queries with read-through caching.
//!
//! Every operation checks the cache first, recomputes from storage on a
//! miss, and writes the result back under the key it was looked up with.
//! Aggregate results are cached whole; invalidation is caller-driven
//! (delete the aggregate key after mutating the entities it covers).

use crate::converters::{basic_id, basic_name, feature_to_basic, is_deleted, is_unlisted};
use crate::permissions::{Permissions, StandardPermissions};
use crate::stage_index::StageIndex;
use roadmap_core::{
    CacheError, FeatureId, FeatureType, ImplStatus, ListingFilter, Milestone, QueryConfig,
    RoadmapError, RoadmapResult, ShipBucket, StageType, ViewerIdentity, MILESTONE_STAGE_TYPES,
    SHIP_BUCKETS,
};
use roadmap_storage::{CacheBackend, FeatureCacheKey, StorageTrait};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Every stage category, for queries that must consider rollout stages too.
const ALL_STAGE_TYPES: &[StageType] = &[
    StageType::Incubate,
    StageType::Prototype,
    StageType::DevTrial,
    StageType::Evaluate,
    StageType::OriginTrial,
    StageType::OriginTrialExtension,
    StageType::Ship,
    StageType::EnterpriseRollout,
];

/// Read-side query layer over feature entries and stages.
///
/// Holds shared handles to storage and cache so page handlers can clone the
/// layer cheaply. Visibility decisions are delegated to `P`.
pub struct FeatureQueries<S, C, P = StandardPermissions> {
    storage: Arc<S>,
    cache: Arc<C>,
    permissions: P,
    config: QueryConfig,
}

impl<S, C> FeatureQueries<S, C, StandardPermissions>
where
    S: StorageTrait,
    C: CacheBackend,
{
    /// Create a query layer with standard visibility rules and defaults.
    pub fn new(storage: Arc<S>, cache: Arc<C>) -> Self {
        Self {
            storage,
            cache,
            permissions: StandardPermissions,
            config: QueryConfig::default(),
        }
    }
}

impl<S, C, P> FeatureQueries<S, C, P>
where
    S: StorageTrait,
    C: CacheBackend,
    P: Permissions,
{
    /// Create a query layer with explicit visibility rules.
    pub fn with_permissions(storage: Arc<S>, cache: Arc<C>, permissions: P) -> Self {
        Self {
            storage,
            cache,
            permissions,
            config: QueryConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Batch-load serialized features by id.
    ///
    /// Output preserves the input order, including duplicates; ids with no
    /// stored feature are silently dropped. One `get_multi` covers the
    /// whole batch, and each cache miss is written back under its own
    /// entry key before returning.
    pub fn get_by_ids(&self, ids: &[FeatureId]) -> RoadmapResult<Vec<Value>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut unique: Vec<FeatureId> = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let keys: Vec<String> = unique.iter().map(|id| FeatureCacheKey::entry(*id)).collect();
        let cached = self.cache.get_multi(&keys)?;

        let mut found: HashMap<FeatureId, Value> = HashMap::with_capacity(unique.len());
        let mut missing: Vec<FeatureId> = Vec::new();
        for id in &unique {
            match cached.get(&FeatureCacheKey::entry(*id)) {
                Some(value) => {
                    found.insert(*id, value.clone());
                }
                None => missing.push(*id),
            }
        }
        tracing::debug!(
            requested = ids.len(),
            hits = found.len(),
            misses = missing.len(),
            "feature batch lookup"
        );

        if !missing.is_empty() {
            for feature in self.storage.features_by_ids(&missing)? {
                let basic = feature_to_basic(&feature);
                self.cache
                    .set(&FeatureCacheKey::entry(feature.id), basic.clone())?;
                found.insert(feature.id, basic);
            }
        }

        Ok(ids.iter().filter_map(|id| found.get(id).cloned()).collect())
    }

    /// List all features, newest update first.
    ///
    /// The unfiltered, visibility-complete base listing is cached under one
    /// fixed key; filtering and unlisted-visibility checks run on every
    /// read so a cached listing can never leak an unlisted feature. Pass
    /// `update_cache` to bypass a possibly stale cached listing and
    /// overwrite it.
    pub fn get_all(
        &self,
        filter: Option<&ListingFilter>,
        viewer: Option<&ViewerIdentity>,
        update_cache: bool,
    ) -> RoadmapResult<Vec<Value>> {
        let listing_key = FeatureCacheKey::listing();

        let cached = if update_cache {
            None
        } else {
            match self.cache.get(&listing_key)? {
                Some(Value::Array(entries)) => Some(entries),
                Some(_) => {
                    return Err(RoadmapError::Cache(CacheError::Corrupt {
                        key: listing_key,
                        reason: "expected a JSON array".to_string(),
                    }))
                }
                None => None,
            }
        };

        let base = match cached {
            Some(entries) => entries,
            None => {
                let mut features = self.storage.features_all()?;
                features.retain(|f| !f.deleted);
                features.truncate(self.config.listing_limit);
                let entries: Vec<Value> = features.iter().map(feature_to_basic).collect();
                if self.config.cache_listing {
                    self.cache.set(&listing_key, Value::Array(entries.clone()))?;
                }
                tracing::debug!(count = entries.len(), "recomputed base listing");
                entries
            }
        };

        Ok(base
            .into_iter()
            .filter(|basic| filter.map_or(true, |f| f.matches_basic(basic)))
            .filter(|basic| {
                !is_unlisted(basic) || self.permissions.can_view_unlisted(viewer, basic)
            })
            .collect())
    }

    /// Bucketed view of what ships in one milestone.
    ///
    /// Always returns all six bucket keys, each holding a name-sorted list
    /// of serialized features. The cached value is visibility-complete;
    /// unlisted features are stripped on every read unless `show_unlisted`.
    pub fn get_in_milestone(
        &self,
        milestone: Milestone,
        show_unlisted: bool,
    ) -> RoadmapResult<Map<String, Value>> {
        let key = FeatureCacheKey::milestone(milestone);

        let full = match self.cache.get(&key)? {
            Some(Value::Object(view)) => view,
            Some(_) => {
                return Err(RoadmapError::Cache(CacheError::Corrupt {
                    key,
                    reason: "expected a JSON object".to_string(),
                }))
            }
            None => {
                let computed = self.compute_milestone_view(milestone)?;
                self.cache.set(&key, Value::Object(computed.clone()))?;
                tracing::info!(milestone, "recomputed milestone view");
                computed
            }
        };

        if show_unlisted {
            Ok(full)
        } else {
            Ok(strip_unlisted(full))
        }
    }

    fn compute_milestone_view(&self, milestone: Milestone) -> RoadmapResult<Map<String, Value>> {
        let stages = self.storage.stages_by_types(MILESTONE_STAGE_TYPES)?;
        let index = StageIndex::from_stages(stages);
        let ids = index.features_matching(|s| s.milestones.contains(milestone));
        let basics = self.get_by_ids(&ids)?;

        let mut grouped: HashMap<ShipBucket, Vec<Value>> = HashMap::new();
        for basic in basics {
            if is_deleted(&basic) {
                continue;
            }
            let status = basic
                .get("impl_status_chrome")
                .cloned()
                .and_then(|v| serde_json::from_value::<ImplStatus>(v).ok());
            let Some(bucket) = status.and_then(ShipBucket::from_impl_status) else {
                continue;
            };
            grouped.entry(bucket).or_default().push(basic);
        }

        let mut view = Map::new();
        for bucket in SHIP_BUCKETS {
            let mut entries = grouped.remove(bucket).unwrap_or_default();
            entries.sort_by(|a, b| {
                basic_name(a)
                    .cmp(basic_name(b))
                    .then(basic_id(a).cmp(&basic_id(b)))
            });
            view.insert(bucket.as_str().to_string(), Value::Array(entries));
        }
        Ok(view)
    }

    /// Features relevant to the enterprise release notes for one milestone.
    ///
    /// A feature qualifies when it has a stage still targeting the given
    /// milestone or later on desktop or iOS (or a rollout stage at exactly
    /// that milestone), and is either flagged as enterprise-impacting or is
    /// an enterprise feature outright. Soft-deleted features never appear.
    pub fn get_features_in_release_notes(&self, milestone: Milestone) -> RoadmapResult<Vec<Value>> {
        let key = FeatureCacheKey::release_notes(milestone);
        match self.cache.get(&key)? {
            Some(Value::Array(entries)) => return Ok(entries),
            Some(_) => {
                return Err(RoadmapError::Cache(CacheError::Corrupt {
                    key,
                    reason: "expected a JSON array".to_string(),
                }))
            }
            None => {}
        }

        let stages = self.storage.stages_by_types(ALL_STAGE_TYPES)?;
        let mut ids: Vec<FeatureId> = stages
            .iter()
            .filter(|s| match s.stage_type {
                StageType::EnterpriseRollout => s.rollout_milestone == Some(milestone),
                _ => s.milestones.any_at_or_after(milestone),
            })
            .map(|s| s.feature_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        // Read straight from storage rather than through per-entry cache
        // entries, so invalidating this one key is enough to pick up
        // feature mutations.
        let mut features = self.storage.features_by_ids(&ids)?;
        features.retain(|f| {
            !f.deleted
                && (f.enterprise_impact.is_set() || f.feature_type == FeatureType::Enterprise)
        });
        features.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let entries: Vec<Value> = features.iter().map(feature_to_basic).collect();
        self.cache.set(&key, Value::Array(entries.clone()))?;
        tracing::info!(
            milestone,
            count = entries.len(),
            "recomputed release notes listing"
        );
        Ok(entries)
    }
}

/// Drop unlisted features from every bucket of a milestone view.
fn strip_unlisted(mut view: Map<String, Value>) -> Map<String, Value> {
    for entries in view.values_mut() {
        if let Value::Array(list) = entries {
            list.retain(|basic| !is_unlisted(basic));
        }
    }
    view
}
