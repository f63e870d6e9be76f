//! Lifecycle command and query handlers.

mod archive_item;
mod create_revision;
mod get_item_lifecycle;
mod in_flight;
mod refresh_tracker;
mod submit_lifecycle;

pub use archive_item::{ArchiveItemCommand, ArchiveItemError, ArchiveItemHandler, ArchiveItemResult};
pub use create_revision::{
    CreateRevisionCommand, CreateRevisionError, CreateRevisionHandler, CreateRevisionResult,
};
pub use get_item_lifecycle::{GetItemLifecycleHandler, GetItemLifecycleQuery, ItemLifecycleView};
pub use in_flight::{InFlightSubmissions, SubmissionGuard};
pub use refresh_tracker::{RefreshTracker, REFRESH_EVENT_TYPES};
pub use submit_lifecycle::{
    SubmitLifecycleCommand, SubmitLifecycleError, SubmitLifecycleHandler, SubmitLifecycleResult,
};
