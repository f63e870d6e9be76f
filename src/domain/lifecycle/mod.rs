//! Lifecycle state model.
//!
//! Release states, timeline step classification, the approval flag and the
//! edit form that ties them together.

mod approval;
mod editor;
mod release_state;
mod rules;
mod step_status;
mod timeline;

pub use approval::{ApprovalFlag, QualityAssuranceRef};
pub use editor::{EditorError, LifecycleChanges, LifecycleEditor};
pub use release_state::ReleaseState;
pub use rules::{RulesEvaluation, RulesVerdict};
pub use step_status::{classify, StepStatus};
pub use timeline::{ReleaseTimeline, TimelineStep};
