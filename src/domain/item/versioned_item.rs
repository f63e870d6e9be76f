//! VersionedItem - the lifecycle view of a part, assembly, PCBA or document.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, ProjectId};
use crate::domain::lifecycle::{ApprovalFlag, QualityAssuranceRef, ReleaseState};

use super::{ItemType, Revision};

/// Lifecycle-relevant attributes of one revision of an item.
///
/// The backend is authoritative; this is a snapshot taken at load time and
/// is never patched locally after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedItem {
    pub id: ItemId,
    pub item_type: ItemType,
    /// Full item number including revision, e.g. `PRT1042A`.
    pub full_number: String,
    /// Value of the mandatory name field (`display_name`, or `title` for documents).
    pub display_name: String,
    pub release_state: ReleaseState,
    pub is_approved_for_release: bool,
    pub is_latest_revision: bool,
    pub revision: Revision,
    pub quality_assurance: Option<QualityAssuranceRef>,
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub is_archived: bool,
}

impl VersionedItem {
    /// Approval flag seeded from this snapshot.
    pub fn approval_flag(&self) -> ApprovalFlag {
        ApprovalFlag::seeded(self.is_approved_for_release, self.quality_assurance.as_ref())
    }

    /// Detail-page route of this item.
    pub fn detail_path(&self) -> String {
        self.item_type.detail_path(self.id)
    }
}

/// Item as returned by the backend REST API.
///
/// The item type is implied by the endpoint, the mandatory name field is
/// `title` for documents, and the approval flag is not trusted from the
/// wire: it is derived from the presence of a quality-assurance reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    #[serde(
        default,
        alias = "full_part_number",
        alias = "full_doc_number"
    )]
    pub full_number: String,
    #[serde(default, alias = "title")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub release_state: Option<ReleaseState>,
    pub is_latest_revision: bool,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub quality_assurance: Option<QualityAssuranceRef>,
    #[serde(default, alias = "project")]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub is_archived: bool,
}

impl ItemRecord {
    /// Converts the wire record into a snapshot, deriving the approval flag.
    pub fn into_item(self, item_type: ItemType) -> VersionedItem {
        let is_approved_for_release = self.quality_assurance.is_some();
        VersionedItem {
            id: self.id,
            item_type,
            full_number: self.full_number,
            display_name: self.display_name.unwrap_or_default(),
            release_state: self.release_state.unwrap_or_default(),
            is_approved_for_release,
            is_latest_revision: self.is_latest_revision,
            revision: Revision::new(self.revision.unwrap_or_default()),
            quality_assurance: self.quality_assurance,
            project_id: self.project_id,
            is_archived: self.is_archived,
        }
    }
}
