//! Folio Response Cache
//!
//! Cache-aside decorators for the JSON API:
//!
//! - **Read-through**: serves a stored body for a derived key, or runs the
//!   handler, captures its output and stores it when the status is cacheable.
//! - **Invalidation**: runs a mutating handler and, once it has committed,
//!   deletes one exact key or a whole resource family (`{base}:*`).
//!
//! Keys have the shape `resource:METHOD[:param=value]...`, for example
//! `projects:GET:category=web`.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! ttl_seconds = 600
//! scan_batch = 100
//! operation_timeout_ms = 500
//! memory_capacity = 10000
//! ```

mod capture;
mod config;
mod error;
mod invalidate;
mod keys;
pub mod policy;
mod read_through;
mod store;

pub use capture::{ResponseBuilderSink, ResponseRecorder, ResponseSink};
pub use config::CacheConfig;
pub use error::CacheError;
pub use invalidate::{
    Invalidation, InvalidationTarget, invalidate_on_success, purge_family, purge_key,
};
pub use keys::{KeySpec, build_key, escape_glob, family_pattern};
pub use read_through::{ReadThrough, read_through};
pub use store::{CacheStore, MemoryStore, RedisStore, ScanPage, glob_match};

use std::sync::Arc;

pub const METRIC_CACHE_HIT: &str = "folio_cache_hit_total";
pub const METRIC_CACHE_MISS: &str = "folio_cache_miss_total";
pub const METRIC_CACHE_STORE_ERROR: &str = "folio_cache_store_error_total";
pub const METRIC_CACHE_WRITE: &str = "folio_cache_write_total";
pub const METRIC_CACHE_INVALIDATED: &str = "folio_cache_invalidated_keys_total";
pub const METRIC_CACHE_EVICTED: &str = "folio_cache_memory_evicted_total";

/// Factory for cache decorators sharing one store handle and configuration.
///
/// Built once at startup; every decorator it hands out clones the same
/// `Arc<dyn CacheStore>`.
#[derive(Clone)]
pub struct CacheLayers {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl CacheLayers {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Read-through state for a route keyed by `key`.
    pub fn read_through(&self, key: KeySpec) -> ReadThrough {
        ReadThrough::new(self.store.clone(), key, self.config.clone())
    }

    /// Invalidation state deleting exactly `key` after a committed write.
    pub fn invalidate_key(&self, key: impl Into<String>) -> Invalidation {
        Invalidation::new(
            self.store.clone(),
            InvalidationTarget::Key(key.into()),
            self.config.clone(),
        )
    }

    /// Invalidation state deleting every `{base}:*` key after a committed write.
    pub fn invalidate_family(&self, base: impl Into<String>) -> Invalidation {
        Invalidation::new(
            self.store.clone(),
            InvalidationTarget::Family(base.into()),
            self.config.clone(),
        )
    }
}
