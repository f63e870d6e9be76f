//! New-revision request and its copy policy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::item::{ItemCapabilities, RevisionScheme, RevisionType};

/// Options the user picks in the "new revision" dialog.
///
/// Each toggle is independent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevisionRequest {
    /// Carry the previous description forward.
    #[serde(default)]
    pub copy_previous_description: bool,
    /// Copy the bill of materials into the new revision.
    #[serde(default)]
    pub copy_bom: bool,
    /// Fresh description; required when the previous one is not copied.
    #[serde(default)]
    pub description: Option<String>,
    /// Major or minor bump, only for numeric-revision organizations.
    #[serde(default)]
    pub revision_type: Option<RevisionType>,
}

/// Validated body of the "create revision" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionPayload {
    pub copy_previous_description: bool,
    pub copy_bom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_type: Option<RevisionType>,
}

impl RevisionRequest {
    /// Validates the request against the item type and the organization's scheme.
    ///
    /// # Errors
    ///
    /// - `EmptyField("description")` when the description is neither copied nor given
    /// - `NotApplicable("copy_bom")` for item types without a BOM
    /// - `NotApplicable("revision_type")` for documents or letter-revision organizations
    pub fn validate(
        self,
        capabilities: &dyn ItemCapabilities,
        scheme: RevisionScheme,
    ) -> Result<RevisionPayload, ValidationError> {
        let description = if self.copy_previous_description {
            None
        } else {
            match self.description.map(|d| d.trim().to_string()) {
                Some(d) if !d.is_empty() => Some(d),
                _ => return Err(ValidationError::empty_field("description")),
            }
        };

        if self.copy_bom && !capabilities.supports_bom_copy() {
            return Err(ValidationError::not_applicable(
                "copy_bom",
                format!("{} revisions have no bill of materials", capabilities.label()),
            ));
        }

        let selector_applies =
            capabilities.supports_revision_type() && scheme == RevisionScheme::Numeric;
        let revision_type = match (self.revision_type, selector_applies) {
            (Some(_), false) => {
                return Err(ValidationError::not_applicable(
                    "revision_type",
                    format!(
                        "{} revisions are not numbered major/minor in this organization",
                        capabilities.label()
                    ),
                ))
            }
            (Some(t), true) => Some(t),
            (None, true) => Some(RevisionType::Major),
            (None, false) => None,
        };

        Ok(RevisionPayload {
            copy_previous_description: self.copy_previous_description,
            copy_bom: self.copy_bom,
            description,
            revision_type,
        })
    }
}
