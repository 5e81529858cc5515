//! Cache key construction for feature entities and aggregates.
//!
//! Every key is built from the fixed entity prefix plus `|`-separated
//! discriminators. The delimiter bounds each component, so the key for
//! feature 2 can never alias the key for feature 23. All cache reads and
//! writes go through these constructors; nothing else concatenates keys.

use roadmap_core::{FeatureId, Milestone};

/// Fixed cache prefix for feature entities.
pub const FEATURE_CACHE_PREFIX: &str = "FeatureEntries";

/// Delimiter between key components.
const DELIMITER: char = '|';

/// Constructors for the feature cache key grammar.
///
/// Grammar (reproduced exactly for interop):
/// - `"FeatureEntries|<id>"` for a single serialized feature
/// - `"FeatureEntries|all"` for the full base listing
/// - `"FeatureEntries|milestone|<m>"` for a milestone view
/// - `"FeatureEntries|release_notes_milestone|<m>"` for release notes
pub struct FeatureCacheKey;

impl FeatureCacheKey {
    /// Key for a single serialized feature entry.
    pub fn entry(id: FeatureId) -> String {
        format!("{}{}{}", FEATURE_CACHE_PREFIX, DELIMITER, id)
    }

    /// Key for the unfiltered base listing.
    pub fn listing() -> String {
        format!("{}{}all", FEATURE_CACHE_PREFIX, DELIMITER)
    }

    /// Key for the bucketed milestone view.
    pub fn milestone(milestone: Milestone) -> String {
        format!(
            "{}{}milestone{}{}",
            FEATURE_CACHE_PREFIX, DELIMITER, DELIMITER, milestone
        )
    }

    /// Key for the enterprise release-notes listing.
    pub fn release_notes(milestone: Milestone) -> String {
        format!(
            "{}{}release_notes_milestone{}{}",
            FEATURE_CACHE_PREFIX, DELIMITER, DELIMITER, milestone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_grammar() {
        assert_eq!(FeatureCacheKey::entry(7), "FeatureEntries|7");
        assert_eq!(FeatureCacheKey::listing(), "FeatureEntries|all");
        assert_eq!(FeatureCacheKey::milestone(100), "FeatureEntries|milestone|100");
        assert_eq!(
            FeatureCacheKey::release_notes(100),
            "FeatureEntries|release_notes_milestone|100"
        );
    }

    #[test]
    fn test_entry_keys_do_not_alias() {
        // Regression class: id 2 must not be a prefix-match for id 23.
        let k2 = FeatureCacheKey::entry(2);
        let k23 = FeatureCacheKey::entry(23);
        assert_ne!(k2, k23);
        assert!(!k23.starts_with(&k2));
    }

    #[test]
    fn test_aggregate_keys_distinct_from_entry_keys() {
        // A milestone number must never collide with a feature id key.
        assert_ne!(FeatureCacheKey::milestone(5), FeatureCacheKey::entry(5));
        assert_ne!(
            FeatureCacheKey::release_notes(5),
            FeatureCacheKey::milestone(5)
        );
    }
}
