//! Whether a new revision may be created from an item.

use serde::Serialize;

use crate::domain::item::VersionedItem;
use crate::domain::lifecycle::ReleaseState;

/// Eligibility of the "new revision" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RevisionEligibility {
    Eligible,
    /// The action is rendered disabled with this explanation.
    Blocked(String),
}

impl RevisionEligibility {
    /// Only the latest revision of a released item can be revised.
    ///
    /// The latest-revision check comes first.
    pub fn of(item: &VersionedItem) -> Self {
        if !item.is_latest_revision {
            return RevisionEligibility::Blocked(
                "Cannot create a new revision, a newer revision already exists.".to_string(),
            );
        }
        if item.release_state != ReleaseState::Released {
            return RevisionEligibility::Blocked(format!(
                "Cannot create a new revision, {} {} is not released yet! Current state: {}.",
                item.item_type.capabilities().label(),
                item.full_number,
                item.release_state
            ));
        }
        RevisionEligibility::Eligible
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, RevisionEligibility::Eligible)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            RevisionEligibility::Eligible => None,
            RevisionEligibility::Blocked(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ItemId;
    use crate::domain::item::{ItemType, Revision};

    fn item(item_type: ItemType, latest: bool, state: ReleaseState) -> VersionedItem {
        VersionedItem {
            id: ItemId::new(1),
            item_type,
            full_number: "ASM1001A".to_string(),
            display_name: "Frame".to_string(),
            release_state: state,
            is_approved_for_release: false,
            is_latest_revision: latest,
            revision: Revision::new("A"),
            quality_assurance: None,
            project_id: None,
            is_archived: false,
        }
    }

    #[test]
    fn released_latest_is_eligible() {
        let eligibility = RevisionEligibility::of(&item(ItemType::Assembly, true, ReleaseState::Released));
        assert!(eligibility.is_eligible());
        assert_eq!(eligibility.reason(), None);
    }

    #[test]
    fn older_revision_is_blocked_regardless_of_state() {
        for state in ReleaseState::ALL {
            let eligibility = RevisionEligibility::of(&item(ItemType::Part, false, state));
            assert_eq!(
                eligibility.reason(),
                Some("Cannot create a new revision, a newer revision already exists.")
            );
        }
    }

    #[test]
    fn unreleased_latest_names_item_and_state() {
        let eligibility = RevisionEligibility::of(&item(ItemType::Assembly, true, ReleaseState::Draft));
        assert_eq!(
            eligibility.reason(),
            Some("Cannot create a new revision, Assembly ASM1001A is not released yet! Current state: Draft.")
        );
    }

    #[test]
    fn pcba_label_is_uppercase() {
        let eligibility = RevisionEligibility::of(&item(ItemType::Pcba, true, ReleaseState::Review));
        assert!(eligibility.reason().unwrap().contains("PCBA ASM1001A"));
        assert!(eligibility.reason().unwrap().ends_with("Current state: Review."));
    }

    #[test]
    fn serializes_with_reason() {
        let json = serde_json::to_value(RevisionEligibility::Blocked("no".into())).unwrap();
        assert_eq!(json["status"], "blocked");
        assert_eq!(json["reason"], "no");
    }
}
