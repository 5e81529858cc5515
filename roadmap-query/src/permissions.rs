//! Visibility decisions for unlisted features.
//!
//! Listing and aggregation queries hide unlisted features from the general
//! public. The trait keeps the decision pluggable; the standard rule lets
//! owners, editors, and elevated viewers through.

use roadmap_core::ViewerIdentity;
use serde_json::Value;

/// Decides whether a viewer may see an unlisted feature.
///
/// Operates on the serialized feature mapping because post-cache filtering
/// works on cached JSON, not on entity structs.
pub trait Permissions: Send + Sync {
    /// Whether `viewer` may see the given unlisted feature.
    fn can_view_unlisted(&self, viewer: Option<&ViewerIdentity>, feature: &Value) -> bool;
}

/// The standard rule: admins and site editors see everything; other
/// signed-in viewers see unlisted features they own or edit; anonymous
/// viewers see none.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPermissions;

impl Permissions for StandardPermissions {
    fn can_view_unlisted(&self, viewer: Option<&ViewerIdentity>, feature: &Value) -> bool {
        let Some(viewer) = viewer else {
            return false;
        };
        if viewer.is_elevated() {
            return true;
        }
        email_in(feature, "owner_emails", &viewer.email)
            || email_in(feature, "editor_emails", &viewer.email)
    }
}

fn email_in(feature: &Value, field: &str, email: &str) -> bool {
    feature
        .get(field)
        .and_then(Value::as_array)
        .is_some_and(|emails| emails.iter().any(|e| e.as_str() == Some(email)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unlisted_feature() -> Value {
        json!({
            "id": 1,
            "name": "feature a",
            "unlisted": true,
            "owner_emails": ["feature_owner@example.com"],
            "editor_emails": ["feature_editor@example.com"],
        })
    }

    #[test]
    fn test_anonymous_viewer_denied() {
        let perms = StandardPermissions;
        assert!(!perms.can_view_unlisted(None, &unlisted_feature()));
    }

    #[test]
    fn test_owner_and_editor_allowed() {
        let perms = StandardPermissions;
        let feature = unlisted_feature();

        let owner = ViewerIdentity::user("feature_owner@example.com");
        let editor = ViewerIdentity::user("feature_editor@example.com");
        let visitor = ViewerIdentity::user("visitor@example.com");

        assert!(perms.can_view_unlisted(Some(&owner), &feature));
        assert!(perms.can_view_unlisted(Some(&editor), &feature));
        assert!(!perms.can_view_unlisted(Some(&visitor), &feature));
    }

    #[test]
    fn test_elevated_viewer_allowed() {
        let perms = StandardPermissions;
        let admin = ViewerIdentity::admin("admin@example.com");
        assert!(perms.can_view_unlisted(Some(&admin), &unlisted_feature()));
    }
}
