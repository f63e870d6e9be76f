//! Ports - Interfaces for external dependencies.
//!
//! The backend owns all item data; ports describe the calls this crate
//! makes against it, plus the cache and event plumbing around them.
//!
//! ## Backend Ports
//!
//! - `ItemGateway` - Load, update, revise and archive items
//! - `RulesEvaluator` - Organization release rules check
//! - `ReferenceDataSource` - Customers, projects and part types
//!
//! ## Infrastructure Ports
//!
//! - `CacheStore` - Key/value storage behind the reference cache
//! - `EventPublisher` / `EventSubscriber` - Refresh signals after writes

mod cache_store;
mod event_publisher;
mod event_subscriber;
mod gateway_error;
mod item_gateway;
mod reference_data;
mod rules_evaluator;

pub use cache_store::{CacheError, CacheStore};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use gateway_error::GatewayError;
pub use item_gateway::{ItemGateway, ItemUpdate};
pub use reference_data::{ReferenceDataSource, ReferenceEntry, ReferenceKind};
pub use rules_evaluator::RulesEvaluator;
