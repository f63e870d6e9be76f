//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the lifecycle core to external systems:
//! - `rest` - PLM backend over HTTP (items, rules, reference lists)
//! - `memory` - in-process backend for tests and local runs
//! - `cache` - reference-data cache stores (memory, file, Redis)
//! - `events` - in-process event bus
//! - `http` - Axum routes exposing the lifecycle operations

pub mod cache;
pub mod events;
pub mod http;
pub mod memory;
pub mod rest;

pub use events::InMemoryEventBus;
pub use http::{lifecycle_router, LifecycleAppState};
