//! Which captured statuses the cache acts on.
//!
//! A hit is always replayed as `200 OK`, so only `200` may be stored: storing
//! a `203` or `206` would change the status a client sees on the next hit.
//! Invalidation follows any committed write, which is the whole 2xx range.

use axum::http::StatusCode;

/// Whether a read response may be stored.
pub fn is_cacheable(status: StatusCode) -> bool {
    status == StatusCode::OK
}

/// Whether a write response means the mutation committed.
pub fn is_committed(status: StatusCode) -> bool {
    status.is_success()
}
