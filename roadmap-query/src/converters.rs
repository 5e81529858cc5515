//! Entity serialization.
//!
//! Converts stored entities to the plain JSON-safe "basic" view that page
//! handlers and the cache work with.

use roadmap_core::FeatureEntry;
use serde_json::{json, Value};

/// Convert a feature entry to its basic JSON mapping.
pub fn feature_to_basic(feature: &FeatureEntry) -> Value {
    json!({
        "id": feature.id,
        "name": feature.name,
        "summary": feature.summary,
        "category": feature.category,
        "feature_type": feature.feature_type,
        "impl_status_chrome": feature.impl_status_chrome,
        "owner_emails": feature.owner_emails,
        "editor_emails": feature.editor_emails,
        "unlisted": feature.unlisted,
        "deleted": feature.deleted,
        "enterprise_impact": feature.enterprise_impact,
        "updated": feature.updated,
    })
}

/// Read the unlisted flag from a serialized feature. Missing means listed.
pub fn is_unlisted(feature: &Value) -> bool {
    feature
        .get("unlisted")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Read the soft-delete flag from a serialized feature.
pub fn is_deleted(feature: &Value) -> bool {
    feature
        .get("deleted")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Read the feature id from a serialized feature.
pub fn basic_id(feature: &Value) -> Option<i64> {
    feature.get("id").and_then(Value::as_i64)
}

/// Read the feature name from a serialized feature.
pub fn basic_name(feature: &Value) -> &str {
    feature.get("name").and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::{Category, EnterpriseImpact, ImplStatus};

    #[test]
    fn test_feature_to_basic_fields() {
        let feature = FeatureEntry::new(7, "feature a", "sum", Category::Css)
            .with_impl_status(ImplStatus::EnabledByDefault)
            .with_owners(vec!["owner@example.com".to_string()]);
        let basic = feature_to_basic(&feature);

        assert_eq!(basic["id"], 7);
        assert_eq!(basic["name"], "feature a");
        assert_eq!(basic["unlisted"], false);
        assert_eq!(basic["impl_status_chrome"], "EnabledByDefault");
        assert_eq!(basic["owner_emails"][0], "owner@example.com");
        assert_eq!(
            basic["enterprise_impact"],
            serde_json::to_value(EnterpriseImpact::None).unwrap()
        );
    }

    #[test]
    fn test_flag_helpers_tolerate_missing_fields() {
        // Hand-written cache entries may omit flags entirely.
        let bare = json!({"id": 1, "name": "cached"});
        assert!(!is_unlisted(&bare));
        assert!(!is_deleted(&bare));
        assert_eq!(basic_id(&bare), Some(1));
        assert_eq!(basic_name(&bare), "cached");
    }
}
