//! ArchiveItemHandler - Command handler for archiving items.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{CommandMetadata, EventId, ItemId, SerializableDomainEvent, Timestamp};
use crate::domain::item::{ItemArchived, ItemType};
use crate::ports::{EventPublisher, GatewayError, ItemGateway};

/// Command to archive an item.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveItemCommand {
    pub item_type: ItemType,
    pub item_id: ItemId,
}

/// Result of archival.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveItemResult {
    pub item_id: ItemId,
    /// Listing page of the item's type.
    pub navigation_target: String,
}

#[derive(Debug, Error)]
pub enum ArchiveItemError {
    #[error("{0} {1} is already archived")]
    AlreadyArchived(ItemType, ItemId),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Handler for archiving items.
pub struct ArchiveItemHandler {
    items: Arc<dyn ItemGateway>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ArchiveItemHandler {
    pub fn new(items: Arc<dyn ItemGateway>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            items,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ArchiveItemCommand,
        metadata: CommandMetadata,
    ) -> Result<ArchiveItemResult, ArchiveItemError> {
        let item = self.items.load_item(cmd.item_type, cmd.item_id).await?;
        if item.is_archived {
            return Err(ArchiveItemError::AlreadyArchived(cmd.item_type, cmd.item_id));
        }

        self.items.archive_item(cmd.item_type, cmd.item_id).await?;
        tracing::info!(item_id = %cmd.item_id, item_type = %cmd.item_type, "Item archived");

        let event = ItemArchived {
            event_id: EventId::new(),
            item_id: cmd.item_id,
            item_type: cmd.item_type,
            archived_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        if let Err(e) = self.event_publisher.publish(envelope).await {
            tracing::warn!(item_id = %cmd.item_id, error = %e, "Failed to publish item archived");
        }

        Ok(ArchiveItemResult {
            item_id: cmd.item_id,
            navigation_target: cmd.item_type.list_path(),
        })
    }
}
