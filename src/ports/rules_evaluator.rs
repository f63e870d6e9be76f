//! RulesEvaluator port - the organization's release rules check.

use async_trait::async_trait;

use crate::domain::foundation::{ItemId, ProjectId};
use crate::domain::item::ItemType;
use crate::domain::lifecycle::RulesEvaluation;

use super::GatewayError;

/// Port for evaluating release rules of one item.
///
/// The user's override is local and never passed here.
#[async_trait]
pub trait RulesEvaluator: Send + Sync {
    async fn evaluate_rules(
        &self,
        item_type: ItemType,
        item_id: ItemId,
        project_id: Option<ProjectId>,
    ) -> Result<RulesEvaluation, GatewayError>;
}
