//! Approval-for-release flag and the quality-assurance reference it derives from.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

use super::ReleaseState;

/// Reference to the quality-assurance sign-off record attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualityAssuranceRef {
    pub id: i64,
}

impl QualityAssuranceRef {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Whether an item in review has been approved for release.
///
/// One mutable boolean seeded from a derived default: an item carrying a
/// quality-assurance reference starts approved. After seeding the user may
/// toggle it freely while the item is in `Review`. The default is
/// recomputed only when the observed reference changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalFlag {
    value: bool,
    derived_from: Option<QualityAssuranceRef>,
}

impl ApprovalFlag {
    /// Seeds the flag from the item's quality-assurance reference.
    pub fn derive(quality_assurance: Option<&QualityAssuranceRef>) -> Self {
        Self {
            value: quality_assurance.is_some(),
            derived_from: quality_assurance.cloned(),
        }
    }

    /// Seeds the flag from a stored value while remembering the reference.
    pub fn seeded(value: bool, quality_assurance: Option<&QualityAssuranceRef>) -> Self {
        Self {
            value,
            derived_from: quality_assurance.cloned(),
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// Feeds the latest quality-assurance reference.
    ///
    /// Returns true when the reference changed and the flag was recomputed.
    pub fn observe(&mut self, quality_assurance: Option<&QualityAssuranceRef>) -> bool {
        if self.derived_from.as_ref() == quality_assurance {
            return false;
        }
        self.value = quality_assurance.is_some();
        self.derived_from = quality_assurance.cloned();
        true
    }

    /// The checkbox is only enabled while the item is in review.
    pub fn is_editable(state: ReleaseState) -> bool {
        state == ReleaseState::Review
    }

    /// User toggle.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless `state` is `Review`
    pub fn set(&mut self, value: bool, state: ReleaseState) -> Result<(), DomainError> {
        if !Self::is_editable(state) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Approval for release can only be changed in Review, current state: {}",
                    state
                ),
            ));
        }
        self.value = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_true_when_quality_assurance_present() {
        let qa = QualityAssuranceRef::new(5);
        assert!(ApprovalFlag::derive(Some(&qa)).value());
    }

    #[test]
    fn derives_false_when_quality_assurance_absent() {
        assert!(!ApprovalFlag::derive(None).value());
    }

    #[test]
    fn observe_same_reference_keeps_user_toggle() {
        let qa = QualityAssuranceRef::new(5);
        let mut flag = ApprovalFlag::derive(Some(&qa));
        flag.set(false, ReleaseState::Review).unwrap();

        assert!(!flag.observe(Some(&qa)));
        assert!(!flag.value());
    }

    #[test]
    fn observe_changed_reference_recomputes() {
        let mut flag = ApprovalFlag::derive(None);
        assert!(flag.observe(Some(&QualityAssuranceRef::new(1))));
        assert!(flag.value());

        assert!(flag.observe(None));
        assert!(!flag.value());
    }

    #[test]
    fn observe_recomputes_only_once_per_change() {
        let qa = QualityAssuranceRef::new(1);
        let mut flag = ApprovalFlag::derive(None);
        assert!(flag.observe(Some(&qa)));
        flag.set(false, ReleaseState::Review).unwrap();
        assert!(!flag.observe(Some(&qa)));
        assert!(!flag.value());
    }

    #[test]
    fn set_is_rejected_outside_review() {
        let mut flag = ApprovalFlag::derive(None);
        for state in [ReleaseState::Draft, ReleaseState::Released] {
            let err = flag.set(true, state).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        }
        assert!(!flag.value());
    }

    #[test]
    fn set_is_accepted_in_review() {
        let mut flag = ApprovalFlag::derive(None);
        flag.set(true, ReleaseState::Review).unwrap();
        assert!(flag.value());
    }
}
