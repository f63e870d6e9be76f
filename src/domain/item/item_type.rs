//! Item types and their lifecycle capabilities.
//!
//! Parts, assemblies, PCBAs and documents share one lifecycle shape and
//! differ only in a handful of details: what the mandatory name field is
//! called, whether a BOM can be copied forward, and whether a revision-type
//! selector exists. Each difference lives in a small capability adapter so
//! the gate and revision logic is written once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ItemId, ValidationError};

/// Per-item-type lifecycle details.
pub trait ItemCapabilities: Send + Sync {
    /// Human-readable label used in messages ("Part", "PCBA", ...).
    fn label(&self) -> &'static str;

    /// Wire key of the mandatory name field.
    fn mandatory_field(&self) -> &'static str {
        "display_name"
    }

    /// Label of the mandatory name field in tooltips.
    fn mandatory_field_label(&self) -> &'static str {
        "Display name"
    }

    /// Whether new revisions take a major/minor selector.
    fn supports_revision_type(&self) -> bool {
        true
    }

    /// Whether the BOM can be copied into a new revision.
    fn supports_bom_copy(&self) -> bool;

    /// Path segment used by the REST API and by detail-page routes.
    fn route_segment(&self) -> &'static str;
}

pub struct PartCapabilities;

impl ItemCapabilities for PartCapabilities {
    fn label(&self) -> &'static str {
        "Part"
    }

    fn supports_bom_copy(&self) -> bool {
        false
    }

    fn route_segment(&self) -> &'static str {
        "parts"
    }
}

pub struct AssemblyCapabilities;

impl ItemCapabilities for AssemblyCapabilities {
    fn label(&self) -> &'static str {
        "Assembly"
    }

    fn supports_bom_copy(&self) -> bool {
        true
    }

    fn route_segment(&self) -> &'static str {
        "assemblies"
    }
}

pub struct PcbaCapabilities;

impl ItemCapabilities for PcbaCapabilities {
    fn label(&self) -> &'static str {
        "PCBA"
    }

    fn supports_bom_copy(&self) -> bool {
        true
    }

    fn route_segment(&self) -> &'static str {
        "pcbas"
    }
}

pub struct DocumentCapabilities;

impl ItemCapabilities for DocumentCapabilities {
    fn label(&self) -> &'static str {
        "Document"
    }

    fn mandatory_field(&self) -> &'static str {
        "title"
    }

    fn mandatory_field_label(&self) -> &'static str {
        "Title"
    }

    fn supports_revision_type(&self) -> bool {
        false
    }

    fn supports_bom_copy(&self) -> bool {
        false
    }

    fn route_segment(&self) -> &'static str {
        "documents"
    }
}

/// Kind of versioned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Part,
    Assembly,
    Pcba,
    Document,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Part,
        ItemType::Assembly,
        ItemType::Pcba,
        ItemType::Document,
    ];

    /// Returns the capability adapter for this item type.
    pub fn capabilities(&self) -> &'static dyn ItemCapabilities {
        match self {
            ItemType::Part => &PartCapabilities,
            ItemType::Assembly => &AssemblyCapabilities,
            ItemType::Pcba => &PcbaCapabilities,
            ItemType::Document => &DocumentCapabilities,
        }
    }

    /// Detail-page route of one item, e.g. `/parts/42`.
    pub fn detail_path(&self, id: ItemId) -> String {
        format!("/{}/{}", self.capabilities().route_segment(), id)
    }

    /// Listing route for this item type, e.g. `/parts`.
    pub fn list_path(&self) -> String {
        format!("/{}", self.capabilities().route_segment())
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.capabilities().label())
    }
}

impl FromStr for ItemType {
    type Err = ValidationError;

    /// Accepts the serde name or the route segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ItemType::ALL
            .into_iter()
            .find(|t| {
                let caps = t.capabilities();
                needle == caps.route_segment() || needle == caps.label().to_ascii_lowercase()
            })
            .ok_or_else(|| {
                ValidationError::invalid_format("item_type", format!("unknown item type '{}'", s))
            })
    }
}
