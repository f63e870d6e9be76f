//! Reference data caching.
//!
//! - `ReadThroughCache` - JSON read-through over any `CacheStore`
//! - `ReferenceDataService` - customers, projects and part types

mod read_through;
mod service;

pub use read_through::ReadThroughCache;
pub use service::ReferenceDataService;
