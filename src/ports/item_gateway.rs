//! ItemGateway port - reads and writes items on the backend.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::domain::foundation::ItemId;
use crate::domain::item::{ItemCapabilities, ItemType, VersionedItem};
use crate::domain::lifecycle::{LifecycleChanges, ReleaseState};
use crate::domain::revision::RevisionPayload;

use super::GatewayError;

/// Partial update of an item.
///
/// Only the fields that are set are sent. `extra` carries other edit-form
/// fields through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemUpdate {
    pub release_state: Option<ReleaseState>,
    pub is_approved_for_release: Option<bool>,
    pub display_name: Option<String>,
    pub extra: Map<String, JsonValue>,
}

impl ItemUpdate {
    /// Renders the JSON body, placing the name under the type's wire key.
    pub fn to_payload(&self, capabilities: &dyn ItemCapabilities) -> JsonValue {
        let mut body = self.extra.clone();
        if let Some(state) = self.release_state {
            body.insert("release_state".into(), JsonValue::String(state.as_str().into()));
        }
        if let Some(approved) = self.is_approved_for_release {
            body.insert("is_approved_for_release".into(), JsonValue::Bool(approved));
        }
        if let Some(name) = &self.display_name {
            body.insert(
                capabilities.mandatory_field().into(),
                JsonValue::String(name.clone()),
            );
        }
        JsonValue::Object(body)
    }
}

impl From<LifecycleChanges> for ItemUpdate {
    fn from(changes: LifecycleChanges) -> Self {
        Self {
            release_state: Some(changes.release_state),
            is_approved_for_release: Some(changes.is_approved_for_release),
            display_name: Some(changes.display_name),
            extra: Map::new(),
        }
    }
}

/// Port for the item endpoints of the backend.
#[async_trait]
pub trait ItemGateway: Send + Sync {
    /// Loads the current snapshot of an item.
    async fn load_item(&self, item_type: ItemType, id: ItemId) -> Result<VersionedItem, GatewayError>;

    /// Sends a partial update. The caller reloads to observe the result.
    async fn update_item(
        &self,
        item_type: ItemType,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<(), GatewayError>;

    /// Asks the backend to create the next revision of an item.
    ///
    /// Returns the newly created revision.
    async fn create_revision(
        &self,
        item_type: ItemType,
        id: ItemId,
        payload: RevisionPayload,
    ) -> Result<VersionedItem, GatewayError>;

    /// Archives an item.
    async fn archive_item(&self, item_type: ItemType, id: ItemId) -> Result<(), GatewayError>;
}
