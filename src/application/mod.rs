//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Queries read through the item gateway; commands write and then publish
//! a refresh signal instead of patching local state.

pub mod handlers;
pub mod reference;

pub use handlers::lifecycle::{
    ArchiveItemCommand, ArchiveItemHandler, ArchiveItemResult,
    CreateRevisionCommand, CreateRevisionHandler, CreateRevisionResult,
    GetItemLifecycleHandler, GetItemLifecycleQuery, ItemLifecycleView,
    SubmitLifecycleCommand, SubmitLifecycleHandler, SubmitLifecycleResult,
};
pub use reference::{ReadThroughCache, ReferenceDataService};
