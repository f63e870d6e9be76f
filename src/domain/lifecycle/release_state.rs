//! ReleaseState enum for tracking the lifecycle stage of versioned items.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle stage of a part, assembly, PCBA or document.
///
/// Variants are spelled exactly as the backend stores them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum ReleaseState {
    #[default]
    Draft,
    Review,
    Released,
}

impl ReleaseState {
    /// All states in timeline display order.
    pub const ALL: [ReleaseState; 3] = [
        ReleaseState::Draft,
        ReleaseState::Review,
        ReleaseState::Released,
    ];

    /// Zero-based position in the timeline.
    pub fn position(&self) -> usize {
        match self {
            ReleaseState::Draft => 0,
            ReleaseState::Review => 1,
            ReleaseState::Released => 2,
        }
    }

    /// Returns true for the only state whose entry is gated.
    pub fn is_released(&self) -> bool {
        matches!(self, ReleaseState::Released)
    }

    /// Returns the backend spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseState::Draft => "Draft",
            ReleaseState::Review => "Review",
            ReleaseState::Released => "Released",
        }
    }
}

impl fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReleaseState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(ReleaseState::Draft),
            "review" => Ok(ReleaseState::Review),
            "released" => Ok(ReleaseState::Released),
            other => Err(ValidationError::invalid_format(
                "release_state",
                format!("unknown release state '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(ReleaseState::default(), ReleaseState::Draft);
    }

    #[test]
    fn display_order_is_draft_review_released() {
        let positions: Vec<usize> = ReleaseState::ALL.iter().map(|s| s.position()).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert!(ReleaseState::Draft < ReleaseState::Released);
    }

    #[test]
    fn serializes_with_backend_spelling() {
        assert_eq!(
            serde_json::to_string(&ReleaseState::Released).unwrap(),
            "\"Released\""
        );
        let state: ReleaseState = serde_json::from_str("\"Review\"").unwrap();
        assert_eq!(state, ReleaseState::Review);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("released".parse::<ReleaseState>().unwrap(), ReleaseState::Released);
        assert_eq!(" Draft ".parse::<ReleaseState>().unwrap(), ReleaseState::Draft);
        assert!("archived".parse::<ReleaseState>().is_err());
    }
}
