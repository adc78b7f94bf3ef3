//! Cache configuration.
//!
//! Controls the response cache via the `[cache]` section of `folio.toml`.

use std::time::Duration;

const DEFAULT_TTL_SECS: u64 = 600;
const DEFAULT_SCAN_BATCH: usize = 100;
const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 500;

/// Runtime cache configuration shared by every decorator.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// When false, read-through passes straight to the handler.
    pub enabled: bool,
    /// Time-to-live applied to every stored entry.
    pub ttl: Duration,
    /// `COUNT` hint for keyspace scans during family invalidation.
    pub scan_batch: usize,
    /// Upper bound on a single store round-trip.
    pub operation_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            scan_batch: DEFAULT_SCAN_BATCH,
            operation_timeout: Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS),
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            ttl: settings.ttl,
            scan_batch: settings.scan_batch.get(),
            operation_timeout: settings.operation_timeout,
        }
    }
}
