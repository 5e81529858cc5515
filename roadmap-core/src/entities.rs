//! Core entity structures

use crate::{
    Category, EnterpriseImpact, FeatureId, FeatureType, ImplStatus, Milestone, StageId, StageType,
    Timestamp,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// FeatureEntry - top-level tracked item with shipping status and ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEntry {
    pub id: FeatureId,
    pub name: String,
    pub summary: String,
    pub category: Category,
    pub feature_type: FeatureType,
    pub impl_status_chrome: ImplStatus,
    pub owner_emails: Vec<String>,
    pub editor_emails: Vec<String>,
    /// Hides the feature from general listings; owners and editors still see it.
    pub unlisted: bool,
    /// Soft delete. Deleted features never appear in query results.
    pub deleted: bool,
    pub enterprise_impact: EnterpriseImpact,
    pub created: Timestamp,
    pub updated: Timestamp,
}

impl FeatureEntry {
    /// Create a new feature entry with default flags.
    pub fn new(id: FeatureId, name: &str, summary: &str, category: Category) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.to_string(),
            summary: summary.to_string(),
            category,
            feature_type: FeatureType::Incubate,
            impl_status_chrome: ImplStatus::NoActiveDev,
            owner_emails: Vec::new(),
            editor_emails: Vec::new(),
            unlisted: false,
            deleted: false,
            enterprise_impact: EnterpriseImpact::None,
            created: now,
            updated: now,
        }
    }

    /// Set the feature type.
    pub fn with_feature_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = feature_type;
        self
    }

    /// Set the shipping status.
    pub fn with_impl_status(mut self, status: ImplStatus) -> Self {
        self.impl_status_chrome = status;
        self
    }

    /// Set the owner email list.
    pub fn with_owners(mut self, owners: Vec<String>) -> Self {
        self.owner_emails = owners;
        self
    }

    /// Set the editor email list.
    pub fn with_editors(mut self, editors: Vec<String>) -> Self {
        self.editor_emails = editors;
        self
    }

    /// Set the updated timestamp (stores normally manage this on write).
    pub fn with_updated(mut self, updated: Timestamp) -> Self {
        self.updated = updated;
        self
    }

    /// Revise the summary, refreshing `updated`.
    pub fn revise_summary(&mut self, summary: &str) {
        self.summary = summary.to_string();
        self.updated = Utc::now();
    }

    /// Whether the given email owns or edits this feature.
    pub fn is_owner_or_editor(&self, email: &str) -> bool {
        self.owner_emails.iter().any(|e| e == email)
            || self.editor_emails.iter().any(|e| e == email)
    }
}

/// Per-platform milestone targets for a stage. All fields nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MilestoneSet {
    pub desktop_first: Option<Milestone>,
    pub desktop_last: Option<Milestone>,
    pub android_first: Option<Milestone>,
    pub android_last: Option<Milestone>,
    pub ios_first: Option<Milestone>,
    pub ios_last: Option<Milestone>,
    pub webview_first: Option<Milestone>,
    pub webview_last: Option<Milestone>,
}

impl MilestoneSet {
    /// Milestone set with only a desktop shipping milestone.
    pub fn desktop(first: Milestone) -> Self {
        Self {
            desktop_first: Some(first),
            ..Default::default()
        }
    }

    /// True when `milestone` equals any populated field.
    /// This is the relevance test for the generic milestone view.
    pub fn contains(&self, milestone: Milestone) -> bool {
        self.fields().iter().any(|f| *f == Some(milestone))
    }

    /// True when any desktop or iOS field is at or after `milestone`.
    /// This is the relevance test for enterprise release notes: a stage still
    /// counts for a release if its shipping boundary has not passed yet.
    pub fn any_at_or_after(&self, milestone: Milestone) -> bool {
        [
            self.desktop_first,
            self.desktop_last,
            self.ios_first,
            self.ios_last,
        ]
        .iter()
        .any(|f| matches!(f, Some(m) if *m >= milestone))
    }

    fn fields(&self) -> [Option<Milestone>; 8] {
        [
            self.desktop_first,
            self.desktop_last,
            self.android_first,
            self.android_last,
            self.ios_first,
            self.ios_last,
            self.webview_first,
            self.webview_last,
        ]
    }
}

/// Stage - a pipeline phase belonging to exactly one feature.
/// A feature may own several stages of the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub feature_id: FeatureId,
    pub stage_type: StageType,
    pub milestones: MilestoneSet,
    /// Used only by `StageType::EnterpriseRollout`.
    pub rollout_milestone: Option<Milestone>,
    pub created: Timestamp,
}

impl Stage {
    /// Create a new stage with empty milestones.
    pub fn new(id: StageId, feature_id: FeatureId, stage_type: StageType) -> Self {
        Self {
            id,
            feature_id,
            stage_type,
            milestones: MilestoneSet::default(),
            rollout_milestone: None,
            created: Utc::now(),
        }
    }

    /// Set the milestone targets.
    pub fn with_milestones(mut self, milestones: MilestoneSet) -> Self {
        self.milestones = milestones;
        self
    }

    /// Set the enterprise rollout milestone.
    pub fn with_rollout_milestone(mut self, milestone: Milestone) -> Self {
        self.rollout_milestone = Some(milestone);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_set_contains() {
        let ms = MilestoneSet {
            desktop_first: Some(100),
            ios_last: Some(104),
            ..Default::default()
        };
        assert!(ms.contains(100));
        assert!(ms.contains(104));
        assert!(!ms.contains(101));
        assert!(!MilestoneSet::default().contains(100));
    }

    #[test]
    fn test_milestone_set_any_at_or_after() {
        let ms = MilestoneSet {
            ios_last: Some(4),
            ..Default::default()
        };
        assert!(ms.any_at_or_after(1));
        assert!(ms.any_at_or_after(4));
        assert!(!ms.any_at_or_after(5));

        // Android and webview fields are not consulted for release notes.
        let android_only = MilestoneSet {
            android_first: Some(10),
            ..Default::default()
        };
        assert!(!android_only.any_at_or_after(1));
        assert!(!MilestoneSet::default().any_at_or_after(1));
    }

    #[test]
    fn test_revise_summary_refreshes_updated() {
        let mut feature = FeatureEntry::new(1, "feature a", "sum", Category::Css);
        let before = feature.updated;
        feature.revise_summary("revised summary");
        assert_eq!(feature.summary, "revised summary");
        assert!(feature.updated >= before);
    }

    #[test]
    fn test_is_owner_or_editor() {
        let feature = FeatureEntry::new(1, "feature a", "sum", Category::Css)
            .with_owners(vec!["owner@example.com".to_string()])
            .with_editors(vec!["editor@example.com".to_string()]);
        assert!(feature.is_owner_or_editor("owner@example.com"));
        assert!(feature.is_owner_or_editor("editor@example.com"));
        assert!(!feature.is_owner_or_editor("visitor@example.com"));
    }
}
