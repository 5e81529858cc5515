//! In-memory cache backend.
//!
//! The production deployment points this trait at a process-external store;
//! this backend keeps the same contract in a HashMap so the query layer can
//! be tested without one.

use super::traits::{CacheBackend, CacheStats};
use roadmap_core::{CacheError, RoadmapResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe in-memory cache.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Value>>,
    stats: RwLock<CacheStats>,
}

impl InMemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for InMemoryCache {
    fn get(&self, key: &str) -> RoadmapResult<Option<Value>> {
        let entries = self.entries.read().map_err(|_| CacheError::LockPoisoned)?;
        let found = entries.get(key).cloned();
        let mut stats = self.stats.write().map_err(|_| CacheError::LockPoisoned)?;
        if found.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        Ok(found)
    }

    fn get_multi(&self, keys: &[String]) -> RoadmapResult<HashMap<String, Value>> {
        let entries = self.entries.read().map_err(|_| CacheError::LockPoisoned)?;
        let mut result = HashMap::with_capacity(keys.len());
        let mut hits = 0u64;
        for key in keys {
            if let Some(value) = entries.get(key) {
                result.insert(key.clone(), value.clone());
                hits += 1;
            }
        }
        let mut stats = self.stats.write().map_err(|_| CacheError::LockPoisoned)?;
        stats.hits += hits;
        stats.misses += keys.len() as u64 - hits;
        Ok(result)
    }

    fn set(&self, key: &str, value: Value) -> RoadmapResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> RoadmapResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn flush_all(&self) -> RoadmapResult<()> {
        let mut entries = self.entries.write().map_err(|_| CacheError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }

    fn stats(&self) -> RoadmapResult<CacheStats> {
        let entries = self.entries.read().map_err(|_| CacheError::LockPoisoned)?;
        let stats = self.stats.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(CacheStats {
            entry_count: entries.len() as u64,
            ..stats.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_roundtrip() {
        let cache = InMemoryCache::new();
        cache.set("FeatureEntries|1", json!({"id": 1})).unwrap();

        let value = cache.get("FeatureEntries|1").unwrap();
        assert_eq!(value, Some(json!({"id": 1})));
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.get("FeatureEntries|404").unwrap(), None);
    }

    #[test]
    fn test_get_multi_returns_only_present() {
        let cache = InMemoryCache::new();
        cache.set("FeatureEntries|1", json!({"id": 1})).unwrap();
        cache.set("FeatureEntries|3", json!({"id": 3})).unwrap();

        let keys = vec![
            "FeatureEntries|1".to_string(),
            "FeatureEntries|2".to_string(),
            "FeatureEntries|3".to_string(),
        ];
        let found = cache.get_multi(&keys).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains_key("FeatureEntries|1"));
        assert!(!found.contains_key("FeatureEntries|2"));
    }

    #[test]
    fn test_set_overwrites() {
        let cache = InMemoryCache::new();
        cache.set("k", json!(1)).unwrap();
        cache.set("k", json!(2)).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_delete_and_flush() {
        let cache = InMemoryCache::new();
        cache.set("a", json!(1)).unwrap();
        cache.set("b", json!(2)).unwrap();

        cache.delete("a").unwrap();
        assert_eq!(cache.get("a").unwrap(), None);
        // Deleting again is fine.
        cache.delete("a").unwrap();

        cache.flush_all().unwrap();
        assert_eq!(cache.get("b").unwrap(), None);
        assert_eq!(cache.stats().unwrap().entry_count, 0);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let cache = InMemoryCache::new();
        cache.set("k", json!(1)).unwrap();

        cache.get("k").unwrap();
        cache.get("missing").unwrap();
        cache
            .get_multi(&["k".to_string(), "missing".to_string()])
            .unwrap();

        let stats = cache.stats().unwrap();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entry_count, 1);
    }
}
