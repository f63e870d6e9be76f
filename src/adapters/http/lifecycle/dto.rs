//! HTTP DTOs for lifecycle endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::domain::lifecycle::ReleaseState;
use crate::ports::{ReferenceEntry, ReferenceKind};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `PUT /api/:item_type/:id/lifecycle`.
///
/// Documents send their name as `title`; every other type as `display_name`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitLifecycleRequest {
    pub release_state: ReleaseState,
    #[serde(default)]
    pub is_approved_for_release: bool,
    #[serde(default, alias = "title")]
    pub display_name: String,
    #[serde(default)]
    pub rules_overridden: bool,
    /// Any other edit-form fields, forwarded to the backend untouched.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceListResponse {
    pub kind: ReferenceKind,
    pub entries: Vec<ReferenceEntry>,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
