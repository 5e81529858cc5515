//! Cache layer for serialized features and aggregate query results.
//!
//! The query layer uses this read-through: look up first, recompute on miss,
//! write the computed value back under the same key. There are no TTLs;
//! invalidation is caller-driven (`delete` of a discriminator key, or
//! `flush_all` after bulk mutations).
//!
//! # Key discipline
//!
//! Every key is built by [`FeatureCacheKey`], which bounds each component
//! with a `|` delimiter. Historically, prefix-matched keys let one feature's
//! cached value alias another feature's lookup (id `2` vs id `23`); the
//! constructors make that unrepresentable.

pub mod key;
pub mod memory;
pub mod traits;

pub use key::{FeatureCacheKey, FEATURE_CACHE_PREFIX};
pub use memory::InMemoryCache;
pub use traits::{CacheBackend, CacheStats};
