//! In-flight state of a lifecycle submission.

use serde::Serialize;

/// Submission progress of one edit form.
///
/// The submit control stays disabled while `Submitting`, so a double click
/// cannot race two updates against each other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_submitting_is_in_flight() {
        assert!(SubmissionState::Submitting.is_in_flight());
        assert!(!SubmissionState::Idle.is_in_flight());
        assert!(!SubmissionState::Succeeded.is_in_flight());
        assert!(!SubmissionState::Failed("x".into()).is_in_flight());
    }

    #[test]
    fn failure_exposes_reason() {
        assert_eq!(SubmissionState::Failed("boom".into()).failure(), Some("boom"));
        assert_eq!(SubmissionState::Idle.failure(), None);
    }
}
