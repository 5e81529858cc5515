//! Cache backend trait and statistics.
//!
//! The cache stores JSON-safe values under string keys. Higher layers treat
//! it as a process-external key/value store with explicit invalidation and
//! no TTL semantics.

use roadmap_core::RoadmapResult;
use serde_json::Value;
use std::collections::HashMap;

/// Cache backend trait for pluggable cache implementations.
///
/// Implementations must be thread-safe. Keys come only from the
/// constructors in [`crate::cache::FeatureCacheKey`]; values are whatever
/// JSON the query layer produced. A missing key is `Ok(None)`, never an
/// error.
pub trait CacheBackend: Send + Sync {
    /// Get a single value.
    fn get(&self, key: &str) -> RoadmapResult<Option<Value>>;

    /// Get many values in one pass. Absent keys are simply missing from
    /// the returned map.
    fn get_multi(&self, keys: &[String]) -> RoadmapResult<HashMap<String, Value>>;

    /// Store a value, overwriting any existing entry.
    fn set(&self, key: &str, value: Value) -> RoadmapResult<()>;

    /// Delete a single entry. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> RoadmapResult<()>;

    /// Drop every entry. Used by callers after bulk mutations and by test
    /// teardown.
    fn flush_all(&self) -> RoadmapResult<()>;

    /// Get cache statistics.
    fn stats(&self) -> RoadmapResult<CacheStats>;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.8).abs() < 0.001);

        let empty_stats = CacheStats::default();
        assert!((empty_stats.hit_rate() - 0.0).abs() < 0.001);
    }
}
