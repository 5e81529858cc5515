//! Enumerations shared across the feature tracker.

use serde::{Deserialize, Serialize};

/// Entity kind discriminator for errors and cache prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Feature,
    Stage,
}

/// Broad category a feature is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Miscellaneous,
    WebComponents,
    Css,
    Dom,
    File,
    Http,
    Javascript,
    Multimedia,
    Network,
    Security,
    Performance,
    DeviceSensors,
}

/// Lineage of a feature entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    /// New feature incubation
    Incubate,
    /// Existing feature implementation
    Existing,
    /// Web-developer-facing change to existing code
    CodeChange,
    /// Deprecation or removal
    Deprecation,
    /// Enterprise feature
    Enterprise,
}

/// Shipping status of a feature in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplStatus {
    NoActiveDev,
    Proposed,
    InDevelopment,
    BehindAFlag,
    EnabledByDefault,
    Deprecated,
    Removed,
    OriginTrial,
    Intervention,
    OnHold,
    NoLongerPursuing,
}

/// Pipeline phase a stage record tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageType {
    Incubate,
    Prototype,
    DevTrial,
    Evaluate,
    OriginTrial,
    OriginTrialExtension,
    Ship,
    /// Enterprise staged deployment. Never part of the generic milestone view.
    EnterpriseRollout,
}

/// Stage categories consulted when answering "what ships in milestone N".
/// `EnterpriseRollout` is deliberately absent.
pub const MILESTONE_STAGE_TYPES: &[StageType] = &[
    StageType::DevTrial,
    StageType::OriginTrial,
    StageType::OriginTrialExtension,
    StageType::Ship,
];

impl StageType {
    /// Whether this stage category contributes to the generic milestone view.
    pub fn is_milestone_relevant(self) -> bool {
        MILESTONE_STAGE_TYPES.contains(&self)
    }
}

/// Expected impact of a feature on enterprise deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnterpriseImpact {
    None,
    Low,
    Medium,
    High,
}

impl EnterpriseImpact {
    /// True for any impact level other than `None`.
    pub fn is_set(self) -> bool {
        self != EnterpriseImpact::None
    }
}

/// Named bucket a feature lands in within a milestone view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipBucket {
    Removed,
    Deprecated,
    BrowserIntervention,
    DevTrial,
    OriginTrial,
    EnabledByDefault,
}

/// All buckets, in the order the milestone view presents them.
/// Every bucket is always present in the output, possibly empty.
pub const SHIP_BUCKETS: &[ShipBucket] = &[
    ShipBucket::Removed,
    ShipBucket::Deprecated,
    ShipBucket::BrowserIntervention,
    ShipBucket::DevTrial,
    ShipBucket::OriginTrial,
    ShipBucket::EnabledByDefault,
];

impl ShipBucket {
    /// Display name used as the key in milestone-view output.
    pub fn as_str(self) -> &'static str {
        match self {
            ShipBucket::Removed => "Removed",
            ShipBucket::Deprecated => "Deprecated",
            ShipBucket::BrowserIntervention => "Browser Intervention",
            ShipBucket::DevTrial => "In developer trial (Behind a flag)",
            ShipBucket::OriginTrial => "Origin trial",
            ShipBucket::EnabledByDefault => "Enabled by default",
        }
    }

    /// Map a shipping status to its milestone-view bucket.
    /// Statuses outside the six shipping buckets do not appear in the view.
    pub fn from_impl_status(status: ImplStatus) -> Option<ShipBucket> {
        match status {
            ImplStatus::Removed => Some(ShipBucket::Removed),
            ImplStatus::Deprecated => Some(ShipBucket::Deprecated),
            ImplStatus::Intervention => Some(ShipBucket::BrowserIntervention),
            ImplStatus::BehindAFlag => Some(ShipBucket::DevTrial),
            ImplStatus::OriginTrial => Some(ShipBucket::OriginTrial),
            ImplStatus::EnabledByDefault => Some(ShipBucket::EnabledByDefault),
            _ => None,
        }
    }
}
