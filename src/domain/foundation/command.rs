//! Who issued a lifecycle command, and which request it belongs to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Caller context passed to every command handler and stamped onto the
/// events the handler publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub user_id: UserId,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
        }
    }

    /// Ties published events to the inbound request, e.g. its `X-Request-Id`.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// The request's correlation id, or a fresh UUID when none was given.
    pub fn correlation_id(&self) -> String {
        match &self.correlation_id {
            Some(id) => id.clone(),
            None => Uuid::new_v4().to_string(),
        }
    }
}
