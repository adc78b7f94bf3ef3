//! Read-through response cache middleware.
//!
//! Serves a stored body when the derived key is present. Otherwise runs the
//! protected handler, captures its response, stores the body if the status is
//! cacheable and replays the capture to the client.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use metrics::counter;
use tracing::{debug, instrument, warn};

use super::{
    CacheConfig, METRIC_CACHE_HIT, METRIC_CACHE_MISS, METRIC_CACHE_STORE_ERROR,
    METRIC_CACHE_WRITE,
    capture::{ResponseBuilderSink, ResponseRecorder, ResponseSink},
    keys::KeySpec,
    policy,
    store::{CacheStore, bounded},
};

/// State for one read-through route.
#[derive(Clone)]
pub struct ReadThrough {
    store: Arc<dyn CacheStore>,
    key: KeySpec,
    config: CacheConfig,
}

impl ReadThrough {
    pub fn new(store: Arc<dyn CacheStore>, key: KeySpec, config: CacheConfig) -> Self {
        Self { store, key, config }
    }

    pub fn key(&self) -> &KeySpec {
        &self.key
    }
}

/// Middleware for read-through caching.
///
/// Store failures are treated as misses; a failed write never affects the
/// response. The handler is not invoked on a hit.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn read_through(
    State(cache): State<ReadThrough>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !cache.config.enabled {
        return next.run(request).await;
    }

    let key = cache.key.build(request.method(), request.uri().query());
    let timeout = cache.config.operation_timeout;

    match bounded(timeout, "get", cache.store.get(&key)).await {
        Ok(Some(body)) => {
            counter!(METRIC_CACHE_HIT).increment(1);
            debug!(target = "folio::cache", key = %key, outcome = "hit", "serving cached response");
            return hit_response(body);
        }
        Ok(None) => {
            counter!(METRIC_CACHE_MISS).increment(1);
            debug!(target = "folio::cache", key = %key, outcome = "miss", "cache miss, executing handler");
        }
        Err(err) => {
            counter!(METRIC_CACHE_MISS).increment(1);
            counter!(METRIC_CACHE_STORE_ERROR, "op" => "get").increment(1);
            warn!(
                target = "folio::cache",
                key = %key,
                outcome = "store_error",
                error = %err,
                "cache lookup failed, executing handler"
            );
        }
    }

    let recorder = match ResponseRecorder::record(next.run(request).await).await {
        Ok(recorder) => recorder,
        Err(err) => {
            warn!(
                target = "folio::cache",
                key = %key,
                error = %err,
                "handler response could not be captured"
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if policy::is_cacheable(recorder.status()) {
        let body = recorder.body_bytes();
        match bounded(timeout, "set", cache.store.set(&key, body, cache.config.ttl)).await {
            Ok(()) => {
                counter!(METRIC_CACHE_WRITE).increment(1);
                debug!(target = "folio::cache", key = %key, "cached response");
            }
            Err(err) => {
                counter!(METRIC_CACHE_STORE_ERROR, "op" => "set").increment(1);
                warn!(
                    target = "folio::cache",
                    key = %key,
                    error = %err,
                    "failed to store response"
                );
            }
        }
    }

    recorder.into_response()
}

/// A hit is always `200` with a JSON content type, whatever the handler set.
fn hit_response(body: Bytes) -> Response {
    let mut sink = ResponseBuilderSink::new();
    sink.append_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    sink.set_status(StatusCode::OK);
    sink.write(&body);
    sink.into_response()
}
