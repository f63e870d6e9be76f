//! REST backend adapter.

mod client;

pub use client::{RestBackendClient, RestBackendConfig};
