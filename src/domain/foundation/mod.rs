//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the event and
//! command infrastructure that the lifecycle modules build on.

mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{ItemId, ProjectId, UserId};
pub use timestamp::Timestamp;
