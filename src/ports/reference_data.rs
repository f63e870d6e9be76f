//! ReferenceDataSource port - lookup lists shared by many screens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::GatewayError;

/// Reference lists the lifecycle screens look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Customers,
    Projects,
    PartTypes,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::Customers,
        ReferenceKind::Projects,
        ReferenceKind::PartTypes,
    ];

    /// Cache key and URL segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Customers => "customers",
            ReferenceKind::Projects => "projects",
            ReferenceKind::PartTypes => "part_types",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "customers" => Ok(ReferenceKind::Customers),
            "projects" => Ok(ReferenceKind::Projects),
            "part_types" => Ok(ReferenceKind::PartTypes),
            other => Err(ValidationError::invalid_format(
                "kind",
                format!("unknown reference list '{}'", other),
            )),
        }
    }
}

/// One entry of a reference list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Port for fetching reference lists from the backend.
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    async fn fetch(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, GatewayError>;
}
