//! Listing filters
//!
//! The listing query accepts a single optional field/value filter from a
//! closed whitelist. The whitelist is expressed as an enum so an
//! out-of-whitelist field cannot be constructed at all.

use crate::{Category, FeatureEntry, FeatureType, ImplStatus};
use serde::{Deserialize, Serialize};

/// One field/value predicate over a feature entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingFilter {
    /// Exact category match.
    Category(Category),
    /// Exact feature type match.
    FeatureType(FeatureType),
    /// Exact shipping status match.
    ImplStatus(ImplStatus),
    /// Membership test over `owner_emails`.
    Owner(String),
    /// Membership test over `editor_emails`.
    Editor(String),
}

impl ListingFilter {
    /// Apply this filter to a feature entry.
    pub fn matches(&self, feature: &FeatureEntry) -> bool {
        match self {
            ListingFilter::Category(c) => feature.category == *c,
            ListingFilter::FeatureType(t) => feature.feature_type == *t,
            ListingFilter::ImplStatus(s) => feature.impl_status_chrome == *s,
            ListingFilter::Owner(email) => feature.owner_emails.iter().any(|e| e == email),
            ListingFilter::Editor(email) => feature.editor_emails.iter().any(|e| e == email),
        }
    }

    /// Apply this filter to a serialized feature mapping.
    /// The listing query narrows the cached base listing after reading it,
    /// so the predicate must also work on the serialized form.
    pub fn matches_basic(&self, feature: &serde_json::Value) -> bool {
        fn email_in(feature: &serde_json::Value, field: &str, email: &str) -> bool {
            feature
                .get(field)
                .and_then(serde_json::Value::as_array)
                .is_some_and(|emails| emails.iter().any(|e| e.as_str() == Some(email)))
        }

        match self {
            ListingFilter::Category(c) => {
                feature.get("category") == serde_json::to_value(c).ok().as_ref()
            }
            ListingFilter::FeatureType(t) => {
                feature.get("feature_type") == serde_json::to_value(t).ok().as_ref()
            }
            ListingFilter::ImplStatus(s) => {
                feature.get("impl_status_chrome") == serde_json::to_value(s).ok().as_ref()
            }
            ListingFilter::Owner(email) => email_in(feature, "owner_emails", email),
            ListingFilter::Editor(email) => email_in(feature, "editor_emails", email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter() {
        let feature = FeatureEntry::new(1, "feature a", "sum", Category::Css);
        assert!(ListingFilter::Category(Category::Css).matches(&feature));
        assert!(!ListingFilter::Category(Category::Dom).matches(&feature));
    }

    #[test]
    fn test_matches_basic_on_serialized_form() {
        let feature = FeatureEntry::new(1, "feature a", "sum", Category::Css)
            .with_owners(vec!["owner@example.com".to_string()]);
        let basic = serde_json::to_value(&feature).unwrap();

        assert!(ListingFilter::Category(Category::Css).matches_basic(&basic));
        assert!(!ListingFilter::Category(Category::Dom).matches_basic(&basic));
        assert!(ListingFilter::Owner("owner@example.com".to_string()).matches_basic(&basic));
        assert!(!ListingFilter::Owner("other@example.com".to_string()).matches_basic(&basic));
    }

    #[test]
    fn test_owner_filter_is_membership() {
        let feature = FeatureEntry::new(1, "feature a", "sum", Category::Css).with_owners(vec![
            "one@example.com".to_string(),
            "two@example.com".to_string(),
        ]);
        assert!(ListingFilter::Owner("two@example.com".to_string()).matches(&feature));
        assert!(!ListingFilter::Owner("three@example.com".to_string()).matches(&feature));
        // Owner filter does not consult editors.
        assert!(!ListingFilter::Editor("one@example.com".to_string()).matches(&feature));
    }
}
