//! Revision controller - gates release and new-revision actions.
//!
//! - `ReleaseGate` - may the edit form be submitted (mandatory field, rules)
//! - `RevisionEligibility` - may a new revision be created, and if not, why
//! - `RevisionRequest` - copy policy and revision-type selection
//! - `SubmissionState` - in-flight tracking for the submit control

mod eligibility;
mod release_gate;
mod request;
mod submission;

pub use eligibility::RevisionEligibility;
pub use release_gate::{GateBlock, GateDecision, ReleaseGate};
pub use request::{RevisionPayload, RevisionRequest};
pub use submission::SubmissionState;
