//! Fixed-answer rules evaluator.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::{ItemId, ProjectId};
use crate::domain::item::ItemType;
use crate::domain::lifecycle::RulesEvaluation;
use crate::ports::{GatewayError, RulesEvaluator};

/// Answers every evaluation with a default outcome, overridable per item.
pub struct StaticRulesEvaluator {
    default_passed: bool,
    per_item: Mutex<HashMap<(ItemType, ItemId), bool>>,
}

impl StaticRulesEvaluator {
    pub fn new(default_passed: bool) -> Self {
        Self {
            default_passed,
            per_item: Mutex::new(HashMap::new()),
        }
    }

    pub fn passing() -> Self {
        Self::new(true)
    }

    pub fn failing() -> Self {
        Self::new(false)
    }

    pub fn set_outcome(&self, item_type: ItemType, item_id: ItemId, passed: bool) {
        lock(&self.per_item).insert((item_type, item_id), passed);
    }
}

#[async_trait]
impl RulesEvaluator for StaticRulesEvaluator {
    async fn evaluate_rules(
        &self,
        item_type: ItemType,
        item_id: ItemId,
        _project_id: Option<ProjectId>,
    ) -> Result<RulesEvaluation, GatewayError> {
        let passed = lock(&self.per_item)
            .get(&(item_type, item_id))
            .copied()
            .unwrap_or(self.default_passed);
        Ok(RulesEvaluation {
            all_rules_passed: passed,
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
