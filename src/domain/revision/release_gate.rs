//! Release gate - decides whether the lifecycle edit form may be submitted.

use serde::Serialize;
use std::fmt;

use crate::domain::item::ItemCapabilities;
use crate::domain::lifecycle::{ReleaseState, RulesVerdict};

/// Reason the submit control is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateBlock {
    /// The mandatory name field is empty.
    MissingMandatoryField { field: &'static str, label: &'static str },
    /// Target is `Released` but rules neither passed nor were overridden.
    RulesNotSatisfied,
}

impl GateBlock {
    /// Tooltip shown on the disabled submit control.
    pub fn tooltip(&self) -> String {
        match self {
            GateBlock::MissingMandatoryField { label, .. } => format!("{} is required.", label),
            GateBlock::RulesNotSatisfied => {
                "All rules must pass, or be overridden, before the item can be released."
                    .to_string()
            }
        }
    }
}

impl fmt::Display for GateBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tooltip())
    }
}

/// Outcome of the gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Enabled,
    Disabled(GateBlock),
}

impl GateDecision {
    pub fn is_enabled(&self) -> bool {
        matches!(self, GateDecision::Enabled)
    }

    pub fn block(&self) -> Option<&GateBlock> {
        match self {
            GateDecision::Enabled => None,
            GateDecision::Disabled(block) => Some(block),
        }
    }

    pub fn into_result(self) -> Result<(), GateBlock> {
        match self {
            GateDecision::Enabled => Ok(()),
            GateDecision::Disabled(block) => Err(block),
        }
    }
}

/// Stateless release gate.
pub struct ReleaseGate;

impl ReleaseGate {
    /// Checks the submit preconditions.
    ///
    /// The mandatory field is checked first so its message wins when both
    /// conditions fail. Rules only matter when the target is `Released`.
    pub fn check(
        mandatory_value: &str,
        capabilities: &dyn ItemCapabilities,
        target: ReleaseState,
        rules: &RulesVerdict,
    ) -> GateDecision {
        if mandatory_value.trim().is_empty() {
            return GateDecision::Disabled(GateBlock::MissingMandatoryField {
                field: capabilities.mandatory_field(),
                label: capabilities.mandatory_field_label(),
            });
        }
        if target.is_released() && !rules.is_satisfied() {
            return GateDecision::Disabled(GateBlock::RulesNotSatisfied);
        }
        GateDecision::Enabled
    }
}
