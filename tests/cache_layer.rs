//! Read-through and invalidation decorators exercised over small routers.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, StatusCode, header::CONTENT_TYPE};
use axum::middleware;
use axum::routing::{MethodRouter, get, post};
use bytes::Bytes;
use folio::cache::{
    CacheConfig, CacheLayers, CacheStore, KeySpec, MemoryStore, invalidate_on_success,
    read_through,
};
use tower::ServiceExt;

use support::{UnavailableStore, body_bytes, request};

const TTL: Duration = Duration::from_secs(60);

fn counted(calls: &Arc<AtomicUsize>, status: StatusCode, body: &'static str) -> MethodRouter {
    let calls = calls.clone();
    get(move || {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            (status, [(CONTENT_TYPE, "application/json")], body)
        }
    })
}

fn read_router(
    cache: &CacheLayers,
    key: KeySpec,
    calls: &Arc<AtomicUsize>,
    status: StatusCode,
    body: &'static str,
) -> Router {
    Router::new().route(
        "/items",
        counted(calls, status, body).layer(middleware::from_fn_with_state(
            cache.read_through(key),
            read_through,
        )),
    )
}

#[tokio::test]
async fn miss_stores_body_and_next_request_is_served_from_cache() {
    let store = Arc::new(MemoryStore::new());
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let app = read_router(
        &cache,
        KeySpec::fixed("hero"),
        &calls,
        StatusCode::OK,
        r#"{"name":"Ada"}"#,
    );

    let first = app
        .clone()
        .oneshot(request(Method::GET, "/items"))
        .await
        .expect("first response");
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(&body_bytes(first).await[..], br#"{"name":"Ada"}"#);
    assert_eq!(
        store.get("hero").await.expect("get"),
        Some(Bytes::from_static(br#"{"name":"Ada"}"#))
    );

    let second = app
        .oneshot(request(Method::GET, "/items"))
        .await
        .expect("second response");
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        second.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"application/json"[..])
    );
    assert_eq!(&body_bytes(second).await[..], br#"{"name":"Ada"}"#);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hit_never_invokes_handler() {
    let store = Arc::new(MemoryStore::new());
    store
        .set("projects:GET", Bytes::from_static(b"[\"cached\"]"), TTL)
        .await
        .expect("seed");
    let cache = CacheLayers::new(store, CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let app = read_router(
        &cache,
        KeySpec::parametrized("projects", &["category"]),
        &calls,
        StatusCode::OK,
        "[\"live\"]",
    );

    let response = app
        .oneshot(request(Method::GET, "/items"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], b"[\"cached\"]");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_success_responses_are_relayed_but_not_stored() {
    for status in [
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::CREATED,
    ] {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheLayers::new(store.clone(), CacheConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let app = read_router(
            &cache,
            KeySpec::fixed("about"),
            &calls,
            status,
            r#"{"error":"x"}"#,
        );

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(request(Method::GET, "/items"))
                .await
                .expect("response");
            assert_eq!(response.status(), status);
            assert_eq!(&body_bytes(response).await[..], br#"{"error":"x"}"#);
        }

        assert!(store.is_empty(), "{status} must not be cached");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

#[tokio::test]
async fn unavailable_store_degrades_to_live_execution() {
    let store = Arc::new(UnavailableStore::default());
    let config = CacheConfig {
        operation_timeout: Duration::from_millis(100),
        ..Default::default()
    };
    let cache = CacheLayers::new(store.clone(), config);
    let calls = Arc::new(AtomicUsize::new(0));
    let app = read_router(
        &cache,
        KeySpec::fixed("hero"),
        &calls,
        StatusCode::OK,
        r#"{"live":true}"#,
    );

    let response = app
        .oneshot(request(Method::GET, "/items"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], br#"{"live":true}"#);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // one failed lookup, one failed write
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn query_order_and_unlisted_params_share_one_entry() {
    let store = Arc::new(MemoryStore::new());
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let app = read_router(
        &cache,
        KeySpec::parametrized("projects", &["category", "tag"]),
        &calls,
        StatusCode::OK,
        "[]",
    );

    for uri in [
        "/items?category=web&tag=rust",
        "/items?tag=rust&category=web",
        "/items?utm=x&tag=rust&category=web",
    ] {
        let response = app
            .clone()
            .oneshot(request(Method::GET, uri))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(store.contains("projects:GET:category=web:tag=rust"));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn distinct_param_values_are_cached_separately() {
    let store = Arc::new(MemoryStore::new());
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let app = read_router(
        &cache,
        KeySpec::parametrized("projects", &["category"]),
        &calls,
        StatusCode::OK,
        "[]",
    );

    for uri in ["/items", "/items?category=web", "/items?category=mobile"] {
        app.clone()
            .oneshot(request(Method::GET, uri))
            .await
            .expect("response");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(store.contains("projects:GET"));
    assert!(store.contains("projects:GET:category=web"));
    assert!(store.contains("projects:GET:category=mobile"));
}

#[tokio::test]
async fn padded_param_values_share_the_trimmed_entry() {
    let store = Arc::new(MemoryStore::new());
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let app = read_router(
        &cache,
        KeySpec::parametrized("projects", &["category"]),
        &calls,
        StatusCode::OK,
        "[]",
    );

    for uri in [
        "/items?category=web",
        "/items?category=%20web",
        "/items?category=%20",
        "/items",
    ] {
        app.clone()
            .oneshot(request(Method::GET, uri))
            .await
            .expect("response");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(store.contains("projects:GET:category=web"));
    assert!(store.contains("projects:GET"));
    assert_eq!(store.len(), 2);
}

fn write_router(cache: &CacheLayers, family: bool, status: StatusCode) -> Router {
    let invalidation = if family {
        cache.invalidate_family("projects")
    } else {
        cache.invalidate_key("hero")
    };
    Router::new().route(
        "/write",
        post(move || async move { (status, "{}") })
            .layer(middleware::from_fn_with_state(invalidation, invalidate_on_success)),
    )
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for key in [
        "hero",
        "projects:GET",
        "projects:GET:category=web",
        "projects:GET:category=mobile",
        "projectsarchive:GET",
        "other:GET",
    ] {
        store
            .set(key, Bytes::from_static(b"{}"), TTL)
            .await
            .expect("seed");
    }
    store
}

#[tokio::test]
async fn committed_write_removes_whole_family() {
    let store = seeded_store().await;
    let config = CacheConfig {
        scan_batch: 2,
        ..Default::default()
    };
    let cache = CacheLayers::new(store.clone(), config);
    let app = write_router(&cache, true, StatusCode::CREATED);

    let response = app
        .oneshot(request(Method::POST, "/write"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(!store.contains("projects:GET"));
    assert!(!store.contains("projects:GET:category=web"));
    assert!(!store.contains("projects:GET:category=mobile"));
    assert!(store.contains("projectsarchive:GET"));
    assert!(store.contains("other:GET"));
    assert!(store.contains("hero"));
}

#[tokio::test]
async fn committed_write_removes_exact_key_only() {
    let store = seeded_store().await;
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let app = write_router(&cache, false, StatusCode::OK);

    let response = app
        .oneshot(request(Method::POST, "/write"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!store.contains("hero"));
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn committed_write_with_broken_body_still_invalidates() {
    let store = seeded_store().await;
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let app = Router::new().route(
        "/write",
        post(|| async {
            let chunks = futures::stream::iter(vec![
                Ok(Bytes::from_static(b"{\"id\":")),
                Err(std::io::Error::other("connection reset")),
            ]);
            (StatusCode::CREATED, Body::from_stream(chunks))
        })
        .layer(middleware::from_fn_with_state(
            cache.invalidate_key("hero"),
            invalidate_on_success,
        )),
    );

    let response = app
        .oneshot(request(Method::POST, "/write"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(!store.contains("hero"));
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn failed_write_leaves_cache_untouched() {
    for status in [StatusCode::BAD_REQUEST, StatusCode::INTERNAL_SERVER_ERROR] {
        let store = seeded_store().await;
        let cache = CacheLayers::new(store.clone(), CacheConfig::default());
        let app = write_router(&cache, true, status);

        let response = app
            .oneshot(request(Method::POST, "/write"))
            .await
            .expect("response");

        assert_eq!(response.status(), status);
        assert_eq!(store.len(), 6);
    }
}

#[tokio::test]
async fn invalidation_failure_does_not_change_response() {
    let store = Arc::new(UnavailableStore::default());
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let app = write_router(&cache, true, StatusCode::OK);

    let response = app
        .oneshot(request(Method::POST, "/write"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], b"{}");
    assert!(store.calls() >= 1);
}

#[tokio::test]
async fn write_after_invalidation_repopulates_with_fresh_body() {
    let store = Arc::new(MemoryStore::new());
    store
        .set("hero", Bytes::from_static(b"{\"v\":1}"), TTL)
        .await
        .expect("seed");
    let cache = CacheLayers::new(store.clone(), CacheConfig::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let app = read_router(
        &cache,
        KeySpec::fixed("hero"),
        &calls,
        StatusCode::OK,
        "{\"v\":2}",
    )
    .merge(write_router(&cache, false, StatusCode::OK));

    let stale = app
        .clone()
        .oneshot(request(Method::GET, "/items"))
        .await
        .expect("stale");
    assert_eq!(&body_bytes(stale).await[..], b"{\"v\":1}");

    app.clone()
        .oneshot(request(Method::POST, "/write"))
        .await
        .expect("write");

    let fresh = app
        .oneshot(request(Method::GET, "/items"))
        .await
        .expect("fresh");
    assert_eq!(&body_bytes(fresh).await[..], b"{\"v\":2}");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
