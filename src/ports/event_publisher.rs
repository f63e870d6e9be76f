//! EventPublisher port - where handlers send refresh signals.
//!
//! Every successful backend write is followed by one event
//! (`item.lifecycle_updated`, `item.revision_created` or `item.archived`).
//! A failed publish never undoes the write; handlers log it and move on.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers one envelope to every subscriber of its event type.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
