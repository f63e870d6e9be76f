//! Reference-data cache configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Where cached reference lists live.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    File,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Directory used by the `file` backend
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Key prefix used by the `redis` backend
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Fetch every reference list once at startup
    #[serde(default = "default_warm_on_start")]
    pub warm_on_start: bool,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs > MAX_TTL_SECS {
            return Err(ValidationError::InvalidCacheTtl { max: MAX_TTL_SECS });
        }
        if self.backend == CacheBackend::File && self.dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("CACHE__DIR"));
        }
        if self.backend == CacheBackend::Redis && self.key_prefix.is_empty() {
            return Err(ValidationError::MissingRequired("CACHE__KEY_PREFIX"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            dir: default_dir(),
            ttl_secs: default_ttl(),
            key_prefix: default_key_prefix(),
            warm_on_start: default_warm_on_start(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("./data/cache")
}

fn default_ttl() -> u64 {
    3600
}

fn default_key_prefix() -> String {
    "dokuly-lifecycle".to_string()
}

fn default_warm_on_start() -> bool {
    true
}
