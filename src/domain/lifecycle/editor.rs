//! Lifecycle edit form of an item detail page.

use serde::Serialize;
use thiserror::Error;

use crate::domain::item::VersionedItem;
use crate::domain::revision::{GateBlock, GateDecision, ReleaseGate, SubmissionState};

use super::{ReleaseState, ReleaseTimeline, RulesEvaluation, RulesVerdict};

/// Values the form sends to the backend on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleChanges {
    pub release_state: ReleaseState,
    pub is_approved_for_release: bool,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("{0}")]
    Gated(GateBlock),

    #[error("A submission is already in progress")]
    AlreadySubmitting,
}

/// Edit form state: timeline selection, name field, rules override and
/// submission progress over a loaded item snapshot.
///
/// The snapshot is only replaced through `reload`; a successful submit
/// flags `needs_refresh` and leaves it untouched.
#[derive(Debug, Clone)]
pub struct LifecycleEditor {
    item: VersionedItem,
    timeline: ReleaseTimeline,
    display_name: String,
    rules: RulesVerdict,
    submission: SubmissionState,
    needs_refresh: bool,
}

impl LifecycleEditor {
    pub fn new(item: VersionedItem, rules: Option<RulesEvaluation>) -> Self {
        let timeline = ReleaseTimeline::new(item.release_state, item.approval_flag());
        let display_name = item.display_name.clone();
        Self {
            item,
            timeline,
            display_name,
            rules: RulesVerdict::new(rules, false),
            submission: SubmissionState::Idle,
            needs_refresh: false,
        }
    }

    pub fn item(&self) -> &VersionedItem {
        &self.item
    }

    pub fn timeline(&self) -> &ReleaseTimeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut ReleaseTimeline {
        &mut self.timeline
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, value: impl Into<String>) {
        self.display_name = value.into();
    }

    pub fn rules(&self) -> &RulesVerdict {
        &self.rules
    }

    pub fn set_rules_override(&mut self, overridden: bool) {
        self.rules = self.rules.with_override(overridden);
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    pub fn gate(&self) -> GateDecision {
        ReleaseGate::check(
            &self.display_name,
            self.item.item_type.capabilities(),
            self.timeline.release_state(),
            &self.rules,
        )
    }

    pub fn can_submit(&self) -> bool {
        !self.submission.is_in_flight() && self.gate().is_enabled()
    }

    /// Marks the form as submitting and returns the values to send.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitting` while a previous submit is in flight
    /// - `Gated` when the release gate is closed
    pub fn begin_submission(&mut self) -> Result<LifecycleChanges, EditorError> {
        if self.submission.is_in_flight() {
            return Err(EditorError::AlreadySubmitting);
        }
        self.gate().into_result().map_err(EditorError::Gated)?;

        self.submission = SubmissionState::Submitting;
        Ok(LifecycleChanges {
            release_state: self.timeline.release_state(),
            is_approved_for_release: self.timeline.is_approved_for_release(),
            display_name: self.display_name.trim().to_string(),
        })
    }

    /// Records the backend outcome of the submit started by `begin_submission`.
    pub fn finish_submission(&mut self, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.submission = SubmissionState::Succeeded;
                self.needs_refresh = true;
            }
            Err(reason) => {
                tracing::warn!(item_id = %self.item.id, reason = %reason, "Lifecycle update failed");
                self.submission = SubmissionState::Failed(reason);
            }
        }
    }

    /// Reseeds the form from a freshly loaded snapshot.
    ///
    /// For the same item the approval flag is kept and only re-derived when
    /// the quality-assurance reference changed. A different item starts over.
    pub fn reload(&mut self, item: VersionedItem, rules: Option<RulesEvaluation>) {
        let same_item = item.id == self.item.id && item.item_type == self.item.item_type;
        let mut timeline = self.timeline.clone();
        *self = Self::new(item, rules);
        if same_item {
            timeline.select(self.item.release_state);
            timeline.observe_quality_assurance(self.item.quality_assurance.as_ref());
            self.timeline = timeline;
        }
    }
}
