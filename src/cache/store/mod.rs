//! Cache store adapters.
//!
//! [`RedisStore`] is the production backend; [`MemoryStore`] implements the
//! same contract in-process for tests and for running without Redis.

mod glob;
mod memory;
mod redis_store;

pub use glob::glob_match;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;

use super::error::CacheError;

/// One page of a cursor-based keyspace scan.
///
/// A `cursor` of zero means the scan is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub keys: Vec<String>,
    pub cursor: u64,
}

/// Remote key-value store backing the response cache.
///
/// Implementations are shared across all requests and must be safe for
/// concurrent use. Every write is a full overwrite.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry. Expired and missing keys both read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    /// Store `value` under `key`, replacing any earlier entry.
    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError>;

    /// Delete `key`; returns whether an entry was removed.
    async fn del(&self, key: &str) -> Result<bool, CacheError>;

    /// Enumerate keys matching a glob `pattern`, starting at `cursor`.
    ///
    /// `count` is a work hint, not a page size guarantee.
    async fn scan(&self, cursor: u64, pattern: &str, count: usize)
    -> Result<ScanPage, CacheError>;
}

/// Bound a store round-trip by `timeout`.
pub(crate) async fn bounded<T, F>(
    timeout: Duration,
    op: &'static str,
    fut: F,
) -> Result<T, CacheError>
where
    F: Future<Output = Result<T, CacheError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(CacheError::Timeout { op }),
    }
}
