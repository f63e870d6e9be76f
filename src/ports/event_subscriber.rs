//! EventSubscriber port - reacting to refresh signals.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Reacts to item events, e.g. by marking a loaded item stale.
///
/// Runs inline on the publishing task, so it must not call back into the
/// backend.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Shown in the bus's aggregated error when `handle` fails.
    fn name(&self) -> &'static str;
}

/// Registry of handlers keyed by event type.
///
/// ```ignore
/// bus.subscribe_all(&REFRESH_EVENT_TYPES, Arc::new(RefreshTracker::new()));
/// ```
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Registers the same handler instance for each listed type.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}
