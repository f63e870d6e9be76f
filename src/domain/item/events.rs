//! Item domain events.
//!
//! Each is published after the backend accepted a write and acts as the
//! refresh signal for anything showing the item:
//! - `ItemLifecycleUpdated` - release state, approval or name changed
//! - `ItemRevisionCreated` - a new revision now exists
//! - `ItemArchived` - item removed from active lists

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, ItemId, Timestamp};
use crate::domain::lifecycle::ReleaseState;

use super::{ItemType, Revision};

// ════════════════════════════════════════════════════════════════════════════
// ItemLifecycleUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a lifecycle edit was accepted by the backend.
///
/// Carries what was sent, not what the backend stored; consumers reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemLifecycleUpdated {
    pub event_id: EventId,
    pub item_id: ItemId,
    pub item_type: ItemType,
    pub release_state: ReleaseState,
    pub is_approved_for_release: bool,
    pub updated_at: Timestamp,
}

domain_event!(
    ItemLifecycleUpdated,
    event_type = "item.lifecycle_updated",
    aggregate_id = item_id,
    aggregate_type = item_type,
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ItemRevisionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when the backend created a new revision.
///
/// The aggregate is the new revision; `previous_id` is the item it was made from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRevisionCreated {
    pub event_id: EventId,
    pub item_id: ItemId,
    pub previous_id: ItemId,
    pub item_type: ItemType,
    pub revision: Revision,
    pub created_at: Timestamp,
}

domain_event!(
    ItemRevisionCreated,
    event_type = "item.revision_created",
    aggregate_id = item_id,
    aggregate_type = item_type,
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ItemArchived
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemArchived {
    pub event_id: EventId,
    pub item_id: ItemId,
    pub item_type: ItemType,
    pub archived_at: Timestamp,
}

domain_event!(
    ItemArchived,
    event_type = "item.archived",
    aggregate_id = item_id,
    aggregate_type = item_type,
    occurred_at = archived_at,
    event_id = event_id
);
