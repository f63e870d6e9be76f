//! GetItemLifecycleHandler - Query handler for the lifecycle panel of an item.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::ItemId;
use crate::domain::item::{ItemType, VersionedItem};
use crate::domain::lifecycle::{ReleaseTimeline, RulesEvaluation, RulesVerdict, TimelineStep};
use crate::domain::revision::{GateBlock, ReleaseGate, RevisionEligibility};
use crate::ports::{GatewayError, ItemGateway, RulesEvaluator};

/// Query for one item's lifecycle panel.
#[derive(Debug, Clone, Copy)]
pub struct GetItemLifecycleQuery {
    pub item_type: ItemType,
    pub item_id: ItemId,
}

/// Everything the detail page needs to render the lifecycle panel.
#[derive(Debug, Clone, Serialize)]
pub struct ItemLifecycleView {
    pub item: VersionedItem,
    pub steps: Vec<TimelineStep>,
    pub approval_editable: bool,
    pub rules: RulesVerdict,
    /// Why submitting the form as loaded would be refused, if it would.
    pub submit_block: Option<GateBlock>,
    pub revision_eligibility: RevisionEligibility,
    /// Wire key of the mandatory name field.
    pub mandatory_field: &'static str,
}

/// Handler for loading an item together with its rules evaluation.
pub struct GetItemLifecycleHandler {
    items: Arc<dyn ItemGateway>,
    rules: Arc<dyn RulesEvaluator>,
}

impl GetItemLifecycleHandler {
    pub fn new(items: Arc<dyn ItemGateway>, rules: Arc<dyn RulesEvaluator>) -> Self {
        Self { items, rules }
    }

    /// Loads the item, then evaluates rules once.
    ///
    /// A failed rules evaluation does not fail the query; the view carries a
    /// verdict without evaluation, which blocks release until overridden.
    pub async fn handle(&self, query: GetItemLifecycleQuery) -> Result<ItemLifecycleView, GatewayError> {
        let item = self.items.load_item(query.item_type, query.item_id).await?;
        let evaluation = evaluate_or_log(self.rules.as_ref(), &item).await;
        Ok(build_view(item, evaluation))
    }
}

/// Rules evaluation that degrades to `None` with a warning.
pub(crate) async fn evaluate_or_log(
    rules: &dyn RulesEvaluator,
    item: &VersionedItem,
) -> Option<RulesEvaluation> {
    match rules.evaluate_rules(item.item_type, item.id, item.project_id).await {
        Ok(evaluation) => Some(evaluation),
        Err(e) => {
            tracing::warn!(item_id = %item.id, item_type = %item.item_type, error = %e, "Rules evaluation failed");
            None
        }
    }
}

fn build_view(item: VersionedItem, evaluation: Option<RulesEvaluation>) -> ItemLifecycleView {
    let capabilities = item.item_type.capabilities();
    let timeline = ReleaseTimeline::new(item.release_state, item.approval_flag());
    let rules = RulesVerdict::new(evaluation, false);
    let submit_block = ReleaseGate::check(&item.display_name, capabilities, item.release_state, &rules)
        .block()
        .cloned();

    ItemLifecycleView {
        steps: timeline.steps().to_vec(),
        approval_editable: timeline.is_approval_editable(),
        rules,
        submit_block,
        revision_eligibility: RevisionEligibility::of(&item),
        mandatory_field: capabilities.mandatory_field(),
        item,
    }
}
