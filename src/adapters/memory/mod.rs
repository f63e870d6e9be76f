//! In-memory backend adapters.
//!
//! Used by tests and by the service when `backend.mode = "memory"`.

mod item_gateway;
mod reference_data;
mod rules;

pub use item_gateway::InMemoryItemGateway;
pub use reference_data::StaticReferenceData;
pub use rules::StaticRulesEvaluator;
