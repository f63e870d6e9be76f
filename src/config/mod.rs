//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `DOKULY_LIFECYCLE` prefix; nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use dokuly_lifecycle::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod backend;
mod cache;
mod error;
mod organization;
mod redis;
mod server;

pub use backend::{BackendConfig, BackendMode};
pub use cache::{CacheBackend, CacheConfig};
pub use error::{ConfigError, ValidationError};
pub use organization::OrganizationConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PLM backend connection
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub organization: OrganizationConfig,

    /// Reference-data cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Only needed when `cache.backend` is `redis`
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `DOKULY_LIFECYCLE__*` variables:
    ///
    /// - `DOKULY_LIFECYCLE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DOKULY_LIFECYCLE__BACKEND__BASE_URL=...` -> `backend.base_url = ...`
    /// - `DOKULY_LIFECYCLE__ORGANIZATION__REVISION_SCHEME=numeric`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DOKULY_LIFECYCLE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.backend.validate(self.is_production())?;
        self.cache.validate()?;
        match (&self.redis, self.cache.backend) {
            (Some(redis), _) => redis.validate()?,
            (None, CacheBackend::Redis) => {
                return Err(ValidationError::MissingRequired("REDIS__URL"))
            }
            (None, _) => {}
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::RevisionScheme;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "DOKULY_LIFECYCLE__BACKEND__MODE",
        "DOKULY_LIFECYCLE__BACKEND__BASE_URL",
        "DOKULY_LIFECYCLE__BACKEND__API_TOKEN",
        "DOKULY_LIFECYCLE__ORGANIZATION__REVISION_SCHEME",
        "DOKULY_LIFECYCLE__CACHE__BACKEND",
        "DOKULY_LIFECYCLE__CACHE__TTL_SECS",
        "DOKULY_LIFECYCLE__REDIS__URL",
        "DOKULY_LIFECYCLE__SERVER__PORT",
        "DOKULY_LIFECYCLE__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("DOKULY_LIFECYCLE__BACKEND__BASE_URL", "https://plm.example.com");
        env::set_var("DOKULY_LIFECYCLE__BACKEND__API_TOKEN", "tok_123");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.backend.base_url, "https://plm.example.com");
        assert_eq!(
            config.backend.api_token.as_ref().unwrap().expose_secret(),
            "tok_123"
        );
        assert_eq!(config.backend.mode, BackendMode::Rest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.organization.revision_scheme, RevisionScheme::Letter);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert!(config.redis.is_none());
    }

    #[test]
    fn test_numeric_revision_scheme() {
        let config =
            load_with(&[("DOKULY_LIFECYCLE__ORGANIZATION__REVISION_SCHEME", "numeric")]).unwrap();
        assert_eq!(config.organization.revision_scheme, RevisionScheme::Numeric);
    }

    #[test]
    fn test_custom_port_and_production() {
        let config = load_with(&[
            ("DOKULY_LIFECYCLE__SERVER__PORT", "3000"),
            ("DOKULY_LIFECYCLE__SERVER__ENVIRONMENT", "production"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redis_cache_requires_redis_section() {
        let config = load_with(&[("DOKULY_LIFECYCLE__CACHE__BACKEND", "redis")]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("REDIS__URL"))
        );

        let config = load_with(&[
            ("DOKULY_LIFECYCLE__CACHE__BACKEND", "redis"),
            ("DOKULY_LIFECYCLE__REDIS__URL", "redis://localhost:6379"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_mode_without_backend_url() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        env::set_var("DOKULY_LIFECYCLE__BACKEND__MODE", "memory");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.backend.mode, BackendMode::Memory);
        assert!(config.validate().is_ok());
    }
}
