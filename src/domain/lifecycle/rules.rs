//! Rules evaluation result and the user's override of it.

use serde::{Deserialize, Serialize};

/// Outcome of the organization's business-rules check for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesEvaluation {
    pub all_rules_passed: bool,
}

impl RulesEvaluation {
    pub fn passed() -> Self {
        Self {
            all_rules_passed: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            all_rules_passed: false,
        }
    }
}

/// Rules evaluation combined with the local override toggle.
///
/// The override is never sent to the rules evaluator. A verdict without an
/// evaluation (the check could not be loaded) counts as not passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulesVerdict {
    pub evaluation: Option<RulesEvaluation>,
    pub overridden: bool,
}

impl RulesVerdict {
    pub fn new(evaluation: Option<RulesEvaluation>, overridden: bool) -> Self {
        Self {
            evaluation,
            overridden,
        }
    }

    /// Returns true when the rules passed or the user overrode them.
    pub fn is_satisfied(&self) -> bool {
        self.overridden || self.evaluation.map_or(false, |e| e.all_rules_passed)
    }

    pub fn with_override(mut self, overridden: bool) -> Self {
        self.overridden = overridden;
        self
    }
}
