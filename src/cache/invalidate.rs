//! Post-commit cache invalidation middleware.
//!
//! The protected write always runs first. Only when its status is a success
//! are cache entries removed, even if the body stream fails afterwards.
//! Failures to remove them are logged and never change the response.

use std::{collections::BTreeSet, sync::Arc, time::Duration};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::counter;
use tracing::{info, instrument, warn};

use super::{
    CacheConfig, METRIC_CACHE_INVALIDATED, METRIC_CACHE_STORE_ERROR,
    capture::ResponseRecorder,
    error::CacheError,
    keys::family_pattern,
    policy,
    store::{CacheStore, bounded},
};

/// What a committed write invalidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationTarget {
    /// Exactly one key.
    Key(String),
    /// Every key under `{base}:*`.
    Family(String),
}

/// State for one invalidating route.
#[derive(Clone)]
pub struct Invalidation {
    store: Arc<dyn CacheStore>,
    target: InvalidationTarget,
    config: CacheConfig,
}

impl Invalidation {
    pub fn new(store: Arc<dyn CacheStore>, target: InvalidationTarget, config: CacheConfig) -> Self {
        Self {
            store,
            target,
            config,
        }
    }

    pub fn target(&self) -> &InvalidationTarget {
        &self.target
    }

    /// Remove the target's entries, logging rather than returning failures.
    pub async fn run(&self) {
        let timeout = self.config.operation_timeout;
        match &self.target {
            InvalidationTarget::Key(key) => {
                match purge_key(self.store.as_ref(), key, timeout).await {
                    Ok(removed) => {
                        counter!(METRIC_CACHE_INVALIDATED).increment(u64::from(removed));
                        info!(
                            target = "folio::cache",
                            key = %key,
                            removed,
                            "invalidated cache key"
                        );
                    }
                    Err(err) => {
                        counter!(METRIC_CACHE_STORE_ERROR, "op" => "del").increment(1);
                        warn!(
                            target = "folio::cache",
                            key = %key,
                            error = %err,
                            "failed to invalidate cache key"
                        );
                    }
                }
            }
            InvalidationTarget::Family(base) => {
                let pattern = family_pattern(base);
                match purge_family(self.store.as_ref(), base, self.config.scan_batch, timeout)
                    .await
                {
                    Ok(count) => {
                        counter!(METRIC_CACHE_INVALIDATED).increment(count as u64);
                        info!(
                            target = "folio::cache",
                            pattern = %pattern,
                            count,
                            "invalidated cache keys matching pattern"
                        );
                    }
                    Err(err) => {
                        counter!(METRIC_CACHE_STORE_ERROR, "op" => "scan").increment(1);
                        warn!(
                            target = "folio::cache",
                            pattern = %pattern,
                            error = %err,
                            "failed to invalidate cache family"
                        );
                    }
                }
            }
        }
    }
}

/// Middleware invalidating cache entries after a successful write.
#[instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn invalidate_on_success(
    State(invalidation): State<Invalidation>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = next.run(request).await.into_parts();
    let status = parts.status;
    let committed = policy::is_committed(status);

    let recorded = ResponseRecorder::record_parts(parts, body).await;
    if committed {
        invalidation.run().await;
    }

    match recorded {
        Ok(recorder) => recorder.into_response(),
        Err(err) => {
            warn!(
                target = "folio::cache",
                target_kind = ?invalidation.target,
                status = status.as_u16(),
                committed,
                error = %err,
                "write response body failed, forwarding status without body"
            );
            status.into_response()
        }
    }
}

/// Delete one key. Returns whether it existed.
pub async fn purge_key(
    store: &dyn CacheStore,
    key: &str,
    timeout: Duration,
) -> Result<bool, CacheError> {
    bounded(timeout, "del", store.del(key)).await
}

/// Delete every key in the `{base}:*` family.
///
/// The scan cursor is drained to completion before any deletion so a backend
/// that re-orders its keyspace on delete cannot cause keys to be skipped.
/// Individual delete failures are logged and counted out; a scan failure
/// aborts with an error. Returns the number of keys removed.
pub async fn purge_family(
    store: &dyn CacheStore,
    base: &str,
    batch: usize,
    timeout: Duration,
) -> Result<usize, CacheError> {
    let pattern = family_pattern(base);
    let mut matched = BTreeSet::new();
    let mut cursor = 0u64;

    loop {
        let page = bounded(timeout, "scan", store.scan(cursor, &pattern, batch)).await?;
        matched.extend(page.keys);
        cursor = page.cursor;
        if cursor == 0 {
            break;
        }
    }

    let mut removed = 0usize;
    for key in &matched {
        match bounded(timeout, "del", store.del(key)).await {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(err) => {
                counter!(METRIC_CACHE_STORE_ERROR, "op" => "del").increment(1);
                warn!(
                    target = "folio::cache",
                    key = %key,
                    pattern = %pattern,
                    error = %err,
                    "failed to delete matched key"
                );
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::cache::MemoryStore;

    const TTL: Duration = Duration::from_secs(60);
    const TIMEOUT: Duration = Duration::from_secs(1);

    async fn seed(store: &MemoryStore, keys: &[&str]) {
        for key in keys {
            store
                .set(key, Bytes::from_static(b"{}"), TTL)
                .await
                .expect("seed");
        }
    }

    #[tokio::test]
    async fn purge_family_drains_every_page() {
        let store = MemoryStore::new();
        seed(
            &store,
            &[
                "r:GET",
                "r:GET:category=a",
                "r:GET:category=b",
                "other:GET",
                "rr:GET",
            ],
        )
        .await;

        let removed = purge_family(&store, "r", 1, TIMEOUT).await.expect("purge");

        assert_eq!(removed, 3);
        assert!(!store.contains("r:GET"));
        assert!(!store.contains("r:GET:category=a"));
        assert!(!store.contains("r:GET:category=b"));
        assert!(store.contains("other:GET"));
        assert!(store.contains("rr:GET"));
    }

    #[tokio::test]
    async fn purge_family_on_empty_store_is_zero() {
        let store = MemoryStore::new();
        let removed = purge_family(&store, "projects", 10, TIMEOUT)
            .await
            .expect("purge");
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn purge_key_leaves_family_members() {
        let store = MemoryStore::new();
        seed(&store, &["hero", "hero:GET"]).await;

        assert!(purge_key(&store, "hero", TIMEOUT).await.expect("purge"));
        assert!(!store.contains("hero"));
        assert!(store.contains("hero:GET"));
    }
}
