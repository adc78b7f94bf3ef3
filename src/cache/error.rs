use thiserror::Error;

/// Failures raised by the cache store or by response capture.
///
/// None of these ever reach a client: the decorators log them and fall back
/// to live execution.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("cache `{op}` timed out")]
    Timeout { op: &'static str },
    #[error("failed to buffer response body: {0}")]
    Body(String),
}
