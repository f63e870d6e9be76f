//! Revision identifiers.
//!
//! Organizations either use letter revisions (`A`, `B`, ... `AA`) or numeric
//! revisions written as `major_minor` (`1_0`, `2_13`). Computing the next
//! revision is the backend's job; this module only recognizes the scheme.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Revision numbering scheme configured per organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevisionScheme {
    #[default]
    Letter,
    Numeric,
}

/// Which component of a numeric revision is bumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionType {
    Major,
    Minor,
}

/// Revision token of a versioned item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Detects the scheme from the token's shape, if it has a valid one.
    pub fn scheme(&self) -> Option<RevisionScheme> {
        let value = self.0.as_str();
        if !value.is_empty() && value.chars().all(|c| c.is_ascii_uppercase()) {
            return Some(RevisionScheme::Letter);
        }
        self.numeric_parts().map(|_| RevisionScheme::Numeric)
    }

    /// Splits a numeric revision into `(major, minor)`.
    pub fn numeric_parts(&self) -> Option<(u32, u32)> {
        let (major, minor) = self.0.split_once('_')?;
        Some((major.parse().ok()?, minor.parse().ok()?))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
