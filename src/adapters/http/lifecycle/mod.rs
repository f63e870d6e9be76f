//! HTTP adapter for lifecycle and reference-data endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, ReferenceListResponse, SubmitLifecycleRequest};
pub use handlers::{ApiError, LifecycleAppState, LifecycleResponse, RequestContext};
pub use routes::lifecycle_router;
