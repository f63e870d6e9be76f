//! CreateRevisionHandler - Command handler for the "new revision" dialog.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{
    CommandMetadata, EventId, ItemId, SerializableDomainEvent, Timestamp, ValidationError,
};
use crate::domain::item::{ItemRevisionCreated, ItemType, RevisionScheme, VersionedItem};
use crate::domain::revision::{RevisionEligibility, RevisionRequest};
use crate::ports::{EventPublisher, GatewayError, ItemGateway};

/// Command to create the next revision of an item.
#[derive(Debug, Clone)]
pub struct CreateRevisionCommand {
    pub item_type: ItemType,
    pub item_id: ItemId,
    pub request: RevisionRequest,
}

/// Result of a created revision.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRevisionResult {
    pub item: VersionedItem,
    /// Detail page of the new revision.
    pub navigation_target: String,
}

#[derive(Debug, Error)]
pub enum CreateRevisionError {
    #[error("{0}")]
    NotEligible(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Handler for creating revisions.
pub struct CreateRevisionHandler {
    items: Arc<dyn ItemGateway>,
    event_publisher: Arc<dyn EventPublisher>,
    scheme: RevisionScheme,
}

impl CreateRevisionHandler {
    pub fn new(
        items: Arc<dyn ItemGateway>,
        event_publisher: Arc<dyn EventPublisher>,
        scheme: RevisionScheme,
    ) -> Self {
        Self {
            items,
            event_publisher,
            scheme,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateRevisionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateRevisionResult, CreateRevisionError> {
        // 1. Load and check eligibility
        let item = self.items.load_item(cmd.item_type, cmd.item_id).await?;
        if let RevisionEligibility::Blocked(reason) = RevisionEligibility::of(&item) {
            return Err(CreateRevisionError::NotEligible(reason));
        }

        // 2. Validate the dialog
        let payload = cmd
            .request
            .validate(cmd.item_type.capabilities(), self.scheme)?;

        // 3. Exactly one create call
        let created = self
            .items
            .create_revision(cmd.item_type, cmd.item_id, payload)
            .await?;

        tracing::info!(
            item_id = %cmd.item_id,
            new_item_id = %created.id,
            revision = %created.revision,
            "Revision created"
        );

        // 4. Publish refresh signal
        let event = ItemRevisionCreated {
            event_id: EventId::new(),
            item_id: created.id,
            previous_id: cmd.item_id,
            item_type: cmd.item_type,
            revision: created.revision.clone(),
            created_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        if let Err(e) = self.event_publisher.publish(envelope).await {
            tracing::warn!(item_id = %created.id, error = %e, "Failed to publish revision created");
        }

        Ok(CreateRevisionResult {
            navigation_target: created.detail_path(),
            item: created,
        })
    }
}
