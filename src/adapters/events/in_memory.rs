//! In-process event bus.
//!
//! Delivers refresh signals to subscribed handlers on the publishing task
//! and keeps a bounded log of recent events for inspection.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

const DEFAULT_RETAINED: usize = 1024;

/// In-process event bus.
///
/// Handlers registered for an event type run in registration order. A
/// failing handler does not stop the others; all failures are reported
/// together.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.subscribe_all(&REFRESH_EVENT_TYPES, tracker.clone());
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("item.lifecycle_updated"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<VecDeque<EventEnvelope>>,
    retained: usize,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETAINED)
    }

    /// Keeps at most `retained` recent events.
    pub fn with_retention(retained: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(VecDeque::new()),
            retained,
        }
    }

    // === Inspection ===

    /// Recent events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        read(&self.published).iter().cloned().collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        read(&self.published)
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        read(&self.published)
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        write(&self.published).clear();
    }

    pub fn event_count(&self) -> usize {
        read(&self.published).len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        read(&self.published).iter().any(|e| e.event_type == event_type)
    }

    fn record(&self, event: EventEnvelope) {
        let mut published = write(&self.published);
        if self.retained == 0 {
            return;
        }
        while published.len() >= self.retained {
            published.pop_front();
        }
        published.push_back(event);
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.record(event.clone());

        // Clone handlers to release lock before await points
        let type_handlers: Vec<Arc<dyn EventHandler>> = read(&self.handlers)
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        write(&self.handlers)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = write(&self.handlers);
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
