//! HTTP adapters - REST API implementations.

pub mod lifecycle;

pub use lifecycle::{lifecycle_router, LifecycleAppState};
