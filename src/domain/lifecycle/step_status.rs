//! Visual status of a single timeline step.

use serde::{Deserialize, Serialize};

use super::ReleaseState;

/// Marker drawn next to a timeline step.
///
/// `Exclamation` reads as "needs attention while in draft" and `Question` as
/// "pending review decision".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Empty,
    Passed,
    Question,
    Exclamation,
}

/// Classifies `step` against the item's current `state`.
///
/// Only the current step gets a marker; every other step is `Empty`.
pub fn classify(state: ReleaseState, is_approved: bool, step: ReleaseState) -> StepStatus {
    if step != state {
        return StepStatus::Empty;
    }
    match step {
        ReleaseState::Draft if !is_approved => StepStatus::Exclamation,
        ReleaseState::Review if !is_approved => StepStatus::Question,
        _ => StepStatus::Passed,
    }
}
