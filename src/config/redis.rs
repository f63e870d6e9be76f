//! Redis connection for the shared reference cache

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const SCHEMES: [&str; 2] = ["redis://", "rediss://"];

/// Read only when `cache.backend = "redis"`.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,

    /// How long startup waits for the first connection
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl RedisConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)) {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_connect_timeout() -> u64 {
    5
}
