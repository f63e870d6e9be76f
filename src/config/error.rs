//! Configuration errors

use thiserror::Error;

/// Loading failed, either while reading the environment or validating it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A value parsed but is unusable. Variables are named without the
/// `DOKULY_LIFECYCLE__` prefix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("Port must be non-zero")]
    InvalidPort,

    #[error("Timeout is zero or too long")]
    InvalidTimeout,

    #[error("'{0}' is not a bindable address")]
    InvalidSocketAddr(String),

    #[error("Backend URL must start with http:// or https://")]
    InvalidBackendUrl,

    #[error("Backend URL must use HTTPS in production")]
    BackendMustBeHttps,

    #[error("Redis URL must start with redis:// or rediss://")]
    InvalidRedisUrl,

    #[error("Cache TTL must be at most {max} seconds")]
    InvalidCacheTtl { max: u64 },
}
