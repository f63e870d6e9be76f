//! SubmitLifecycleHandler - Command handler for saving the lifecycle edit form.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{
    CommandMetadata, DomainError, EventId, ItemId, SerializableDomainEvent, Timestamp,
};
use crate::domain::item::{ItemLifecycleUpdated, ItemType};
use crate::domain::lifecycle::{EditorError, LifecycleEditor, ReleaseState};
use crate::domain::revision::GateBlock;
use crate::ports::{EventPublisher, GatewayError, ItemGateway, ItemUpdate, RulesEvaluator};

use super::get_item_lifecycle::evaluate_or_log;
use super::InFlightSubmissions;

/// Command carrying the edit form as submitted.
#[derive(Debug, Clone)]
pub struct SubmitLifecycleCommand {
    pub item_type: ItemType,
    pub item_id: ItemId,
    pub release_state: ReleaseState,
    pub is_approved_for_release: bool,
    pub display_name: String,
    /// User chose to release despite failing rules.
    pub rules_overridden: bool,
    /// Type-specific form fields forwarded to the backend as is.
    pub extra: Map<String, JsonValue>,
}

/// Result of an accepted submission.
///
/// Deliberately carries no item: the caller reloads from the backend.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitLifecycleResult {
    pub item_id: ItemId,
    pub release_state: ReleaseState,
    pub refresh_required: bool,
}

#[derive(Debug, Error)]
pub enum SubmitLifecycleError {
    #[error("A submission for this item is already in progress")]
    AlreadySubmitting,

    #[error("{0}")]
    Gate(GateBlock),

    #[error("{0}")]
    Approval(DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Handler for submitting lifecycle changes.
pub struct SubmitLifecycleHandler {
    items: Arc<dyn ItemGateway>,
    rules: Arc<dyn RulesEvaluator>,
    event_publisher: Arc<dyn EventPublisher>,
    in_flight: InFlightSubmissions,
}

impl SubmitLifecycleHandler {
    pub fn new(
        items: Arc<dyn ItemGateway>,
        rules: Arc<dyn RulesEvaluator>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            items,
            rules,
            event_publisher,
            in_flight: InFlightSubmissions::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitLifecycleCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitLifecycleResult, SubmitLifecycleError> {
        // 1. Claim the item for the duration of this call
        let _guard = self
            .in_flight
            .try_acquire(cmd.item_type, cmd.item_id)
            .ok_or(SubmitLifecycleError::AlreadySubmitting)?;

        // 2. Load the snapshot; rules only matter when releasing
        let item = self.items.load_item(cmd.item_type, cmd.item_id).await?;
        let evaluation = if cmd.release_state.is_released() {
            evaluate_or_log(self.rules.as_ref(), &item).await
        } else {
            None
        };

        // 3. Replay the form onto an editor and open the gate. An approval
        // toggle is accepted when the loaded or the selected state is Review.
        let mut editor = LifecycleEditor::new(item, evaluation);
        if editor.timeline().is_approval_editable() {
            apply_approval(&mut editor, cmd.is_approved_for_release)?;
        }
        editor.timeline_mut().select(cmd.release_state);
        apply_approval(&mut editor, cmd.is_approved_for_release)?;
        editor.set_display_name(cmd.display_name);
        editor.set_rules_override(cmd.rules_overridden);

        let changes = editor.begin_submission().map_err(|e| match e {
            EditorError::Gated(block) => SubmitLifecycleError::Gate(block),
            EditorError::AlreadySubmitting => SubmitLifecycleError::AlreadySubmitting,
        })?;

        // 4. Send the partial update
        let release_state = changes.release_state;
        let is_approved_for_release = changes.is_approved_for_release;
        let mut update = ItemUpdate::from(changes);
        update.extra = cmd.extra;
        if let Err(e) = self
            .items
            .update_item(cmd.item_type, cmd.item_id, update)
            .await
        {
            editor.finish_submission(Err(e.user_message()));
            return Err(e.into());
        }
        editor.finish_submission(Ok(()));

        tracing::info!(
            item_id = %cmd.item_id,
            item_type = %cmd.item_type,
            release_state = %release_state,
            "Lifecycle updated"
        );

        // 5. Publish refresh signal
        let event = ItemLifecycleUpdated {
            event_id: EventId::new(),
            item_id: cmd.item_id,
            item_type: cmd.item_type,
            release_state,
            is_approved_for_release,
            updated_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        if let Err(e) = self.event_publisher.publish(envelope).await {
            tracing::warn!(item_id = %cmd.item_id, error = %e, "Failed to publish lifecycle update");
        }

        Ok(SubmitLifecycleResult {
            item_id: cmd.item_id,
            release_state,
            refresh_required: editor.needs_refresh(),
        })
    }
}

fn apply_approval(editor: &mut LifecycleEditor, value: bool) -> Result<(), SubmitLifecycleError> {
    if value == editor.timeline().is_approved_for_release() {
        return Ok(());
    }
    editor
        .timeline_mut()
        .set_approved_for_release(value)
        .map_err(SubmitLifecycleError::Approval)
}
