//! Organization-level settings

use serde::Deserialize;

use crate::domain::item::RevisionScheme;

/// Settings shared by every item of the organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationConfig {
    /// `letter` (A, B, ... Z, AA) or `numeric` (major.minor)
    #[serde(default)]
    pub revision_scheme: RevisionScheme,
}
