//! In-memory index over a batch of stages, grouped by feature.
//!
//! The milestone aggregators fetch one flat list of stages from storage and
//! answer "which features have a relevant stage" from this index instead of
//! issuing per-feature queries.

use roadmap_core::{FeatureId, Stage, StageType};
use std::collections::HashMap;

/// Stages grouped by owning feature and stage type.
#[derive(Debug, Default)]
pub struct StageIndex {
    map: HashMap<FeatureId, HashMap<StageType, Vec<Stage>>>,
}

impl StageIndex {
    /// Build an index from a flat stage list. Within each group, stages keep
    /// the order they arrived in (storage returns them ordered by stage id).
    pub fn from_stages(stages: Vec<Stage>) -> Self {
        let mut map: HashMap<FeatureId, HashMap<StageType, Vec<Stage>>> = HashMap::new();
        for stage in stages {
            map.entry(stage.feature_id)
                .or_default()
                .entry(stage.stage_type)
                .or_default()
                .push(stage);
        }
        Self { map }
    }

    /// Stages of one type belonging to one feature. A feature may own
    /// several stages of the same type.
    pub fn by_type(&self, feature_id: FeatureId, stage_type: StageType) -> &[Stage] {
        self.map
            .get(&feature_id)
            .and_then(|by_type| by_type.get(&stage_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Feature ids with at least one stage satisfying `pred`, sorted
    /// ascending and deduplicated.
    pub fn features_matching<F>(&self, pred: F) -> Vec<FeatureId>
    where
        F: Fn(&Stage) -> bool,
    {
        let mut ids: Vec<FeatureId> = self
            .map
            .iter()
            .filter(|(_, by_type)| by_type.values().flatten().any(|s| pred(s)))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::MilestoneSet;

    #[test]
    fn test_groups_by_feature_and_type() {
        let index = StageIndex::from_stages(vec![
            Stage::new(10, 1, StageType::Ship),
            Stage::new(11, 1, StageType::Ship),
            Stage::new(12, 1, StageType::DevTrial),
            Stage::new(13, 2, StageType::Ship),
        ]);

        assert_eq!(index.by_type(1, StageType::Ship).len(), 2);
        assert_eq!(index.by_type(1, StageType::DevTrial).len(), 1);
        assert_eq!(index.by_type(2, StageType::Ship).len(), 1);
        assert!(index.by_type(2, StageType::DevTrial).is_empty());
        assert!(index.by_type(404, StageType::Ship).is_empty());
    }

    #[test]
    fn test_features_matching_sorted_and_deduped() {
        let index = StageIndex::from_stages(vec![
            Stage::new(10, 3, StageType::Ship).with_milestones(MilestoneSet::desktop(100)),
            Stage::new(11, 1, StageType::Ship).with_milestones(MilestoneSet::desktop(100)),
            Stage::new(12, 1, StageType::DevTrial).with_milestones(MilestoneSet::desktop(100)),
            Stage::new(13, 2, StageType::Ship).with_milestones(MilestoneSet::desktop(101)),
        ]);

        let matched = index.features_matching(|s| s.milestones.contains(100));
        assert_eq!(matched, vec![1, 3]);
    }

    #[test]
    fn test_empty_index() {
        let index = StageIndex::from_stages(Vec::new());
        assert!(index.features_matching(|_| true).is_empty());
    }
}
