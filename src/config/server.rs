//! HTTP listener settings

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener, logging and CORS settings. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub log_level: String,

    /// Upper bound for one request, backend round trips included
    pub request_timeout_secs: u64,

    /// Comma-separated origins allowed to call the API from a browser
    pub cors_origins: Option<String>,
}

/// Deployment environment; production switches logs to JSON and requires
/// an HTTPS backend.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidSocketAddr(addr))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Blank entries are dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = &self.cors_origins else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::default(),
            log_level: "info,dokuly_lifecycle=debug,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}
