//! Release timeline presenter.
//!
//! Holds the locally selected release state and approval flag of an item
//! being edited and computes the three timeline steps. Nothing here talks
//! to the backend; the edit form persists the selection on submit.

use serde::Serialize;

use crate::domain::foundation::DomainError;

use super::{classify, ApprovalFlag, QualityAssuranceRef, ReleaseState, StepStatus};

/// One rendered step of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub state: ReleaseState,
    pub title: &'static str,
    pub status: StepStatus,
}

/// Vertical Draft → Review → Released timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTimeline {
    release_state: ReleaseState,
    approval: ApprovalFlag,
}

impl ReleaseTimeline {
    pub fn new(release_state: ReleaseState, approval: ApprovalFlag) -> Self {
        Self {
            release_state,
            approval,
        }
    }

    pub fn release_state(&self) -> ReleaseState {
        self.release_state
    }

    pub fn is_approved_for_release(&self) -> bool {
        self.approval.value()
    }

    /// Steps in display order with their computed status.
    pub fn steps(&self) -> [TimelineStep; 3] {
        ReleaseState::ALL.map(|state| TimelineStep {
            state,
            title: state.as_str(),
            status: classify(self.release_state, self.approval.value(), state),
        })
    }

    /// Click on a step title.
    ///
    /// Applies immediately in either direction. Entry into `Released` is
    /// checked by the release gate at submit time, not here.
    pub fn select(&mut self, step: ReleaseState) {
        if step != self.release_state {
            tracing::debug!(from = %self.release_state, to = %step, "Timeline step selected");
        }
        self.release_state = step;
    }

    pub fn is_approval_editable(&self) -> bool {
        ApprovalFlag::is_editable(self.release_state)
    }

    /// Checkbox toggle; rejected unless the selected state is `Review`.
    pub fn set_approved_for_release(&mut self, value: bool) -> Result<(), DomainError> {
        self.approval.set(value, self.release_state)
    }

    /// Re-derives the approval flag when the item's QA reference changed.
    pub fn observe_quality_assurance(&mut self, quality_assurance: Option<&QualityAssuranceRef>) {
        if self.approval.observe(quality_assurance) {
            tracing::debug!(
                approved = self.approval.value(),
                "Approval flag recomputed from quality assurance reference"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(timeline: &ReleaseTimeline) -> Vec<StepStatus> {
        timeline.steps().iter().map(|s| s.status).collect()
    }

    #[test]
    fn draft_without_approval_flags_attention() {
        let timeline = ReleaseTimeline::new(ReleaseState::Draft, ApprovalFlag::derive(None));
        assert_eq!(
            statuses(&timeline),
            vec![StepStatus::Exclamation, StepStatus::Empty, StepStatus::Empty]
        );
    }

    #[test]
    fn steps_are_titled_in_order() {
        let timeline = ReleaseTimeline::new(ReleaseState::Review, ApprovalFlag::derive(None));
        let titles: Vec<&str> = timeline.steps().iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Draft", "Review", "Released"]);
    }

    #[test]
    fn select_allows_moving_backwards_from_released() {
        let qa = QualityAssuranceRef::new(1);
        let mut timeline =
            ReleaseTimeline::new(ReleaseState::Released, ApprovalFlag::derive(Some(&qa)));

        timeline.select(ReleaseState::Draft);

        assert_eq!(timeline.release_state(), ReleaseState::Draft);
        assert_eq!(timeline.steps()[0].status, StepStatus::Passed);
    }

    #[test]
    fn select_allows_jumping_straight_to_released() {
        let mut timeline = ReleaseTimeline::new(ReleaseState::Draft, ApprovalFlag::derive(None));
        timeline.select(ReleaseState::Released);
        assert_eq!(timeline.release_state(), ReleaseState::Released);
    }

    #[test]
    fn approval_checkbox_only_editable_in_review() {
        let mut timeline = ReleaseTimeline::new(ReleaseState::Draft, ApprovalFlag::derive(None));
        assert!(!timeline.is_approval_editable());
        assert!(timeline.set_approved_for_release(true).is_err());

        timeline.select(ReleaseState::Review);
        assert!(timeline.is_approval_editable());
        timeline.set_approved_for_release(true).unwrap();
        assert_eq!(timeline.steps()[1].status, StepStatus::Passed);
    }

    #[test]
    fn quality_assurance_change_recomputes_flag() {
        let mut timeline = ReleaseTimeline::new(ReleaseState::Review, ApprovalFlag::derive(None));
        assert_eq!(timeline.steps()[1].status, StepStatus::Question);

        timeline.observe_quality_assurance(Some(&QualityAssuranceRef::new(3)));
        assert!(timeline.is_approved_for_release());
        assert_eq!(timeline.steps()[1].status, StepStatus::Passed);
    }
}
