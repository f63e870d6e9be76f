//! Item backend configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which item backend the service talks to.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Authoritative REST backend
    #[default]
    Rest,
    /// In-process store, for demos and local development
    Memory,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,

    /// Base URL of the REST backend, e.g. `https://plm.example.com`
    #[serde(default)]
    pub base_url: String,

    /// Bearer token sent with every backend request
    pub api_token: Option<Secret<String>>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Only the REST mode needs a URL and token.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.mode == BackendMode::Memory {
            return Ok(());
        }
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("BACKEND__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::BackendMustBeHttps);
        }
        if self.api_token.is_none() {
            return Err(ValidationError::MissingRequired("BACKEND__API_TOKEN"));
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: String::new(),
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
