//! Domain layer containing lifecycle rules and item types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, events, timestamps)
//! - `item` - Item kinds, their capabilities and the versioned item snapshot
//! - `lifecycle` - Release states, timeline classification, approval and the edit form
//! - `revision` - Release gate, revision eligibility and new-revision requests

pub mod foundation;
pub mod item;
pub mod lifecycle;
pub mod revision;
