use thiserror::Error;

use crate::cache::CacheError;

/// Startup and runtime failures of the process's external dependencies.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
    #[error("postgres unavailable: {0}")]
    Database(#[from] sqlx::Error),
    #[error("schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("cache store unavailable: {0}")]
    Cache(#[from] CacheError),
    #[error("tracing subscriber rejected: {0}")]
    Telemetry(String),
    #[error("missing or invalid setting: {0}")]
    Configuration(String),
}

impl InfraError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_timeout_names_the_operation() {
        let err = InfraError::from(CacheError::Timeout { op: "scan" });
        assert_eq!(
            err.to_string(),
            "cache store unavailable: cache `scan` timed out"
        );
    }
}
