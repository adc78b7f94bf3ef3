use std::{
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use bytes::Bytes;
use lru::LruCache;
use metrics::counter;
use tracing::{debug, warn};

use super::{CacheStore, ScanPage, glob_match};
use crate::cache::{METRIC_CACHE_EVICTED, error::CacheError};

const DEFAULT_CAPACITY: usize = 10_000;

type Entries = LruCache<String, MemoryEntry>;

struct MemoryEntry {
    value: Bytes,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-process store with the same observable contract as [`super::RedisStore`].
///
/// Holds at most `capacity` entries; when full, expired entries are dropped
/// first and then the least recently used one. A scan cursor is a position in
/// the sorted set of live keys.
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lock("capacity").cap().get()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock("len")
            .iter()
            .filter(|(_, entry)| entry.is_live(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a live entry exists for `key`. Does not touch recency.
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.lock("contains")
            .peek(key)
            .is_some_and(|entry| entry.is_live(now))
    }

    // A panic while holding the lock cannot leave a half-written entry, so a
    // poisoned map is still consistent and is used as is.
    fn lock(&self, op: &'static str) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!(
                target = "folio::cache",
                op,
                result = "poisoned_recovered",
                "memory store lock was poisoned"
            );
            PoisonError::into_inner(poisoned)
        })
    }
}

/// Drop every expired entry. Returns how many were removed.
fn prune_expired(entries: &mut Entries, now: Instant) -> usize {
    let dead: Vec<String> = entries
        .iter()
        .filter(|(_, entry)| !entry.is_live(now))
        .map(|(key, _)| key.clone())
        .collect();
    for key in &dead {
        entries.pop(key);
    }
    dead.len()
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        let now = Instant::now();
        let mut entries = self.lock("get");
        let found = entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.value.clone()));
        match found {
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => {
                entries.pop(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        let mut entries = self.lock("set");

        if entries.len() >= entries.cap().get() && !entries.contains(key) {
            prune_expired(&mut entries, now);
        }

        let evicted = entries.push(
            key.to_string(),
            MemoryEntry {
                value,
                expires_at: now + ttl,
            },
        );
        if let Some((evicted_key, _)) = evicted.filter(|(evicted_key, _)| evicted_key != key) {
            counter!(METRIC_CACHE_EVICTED).increment(1);
            debug!(
                target = "folio::cache",
                key = %evicted_key,
                "evicted least recently used entry"
            );
        }
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, CacheError> {
        let now = Instant::now();
        let removed = self.lock("del").pop(key);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }

    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<ScanPage, CacheError> {
        let now = Instant::now();
        let mut entries = self.lock("scan");
        prune_expired(&mut entries, now);

        let mut keys: Vec<&String> = entries.iter().map(|(key, _)| key).collect();
        keys.sort_unstable();

        let start = usize::try_from(cursor).unwrap_or(usize::MAX);
        let count = count.max(1);
        let page = keys
            .iter()
            .skip(start)
            .take(count)
            .filter(|key| glob_match(pattern, key))
            .map(|key| (*key).clone())
            .collect();

        let next = start.saturating_add(count);
        let cursor = if next >= keys.len() { 0 } else { next as u64 };

        Ok(ScanPage { keys: page, cursor })
    }
}
