//! RefreshTracker - Event handler that records items whose view is stale.
//!
//! Subscribed to the item refresh signals. A detail page that was showing
//! an item reloads it from the backend once the item is marked stale.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};

/// Event types that make a loaded item stale.
pub const REFRESH_EVENT_TYPES: [&str; 3] = [
    "item.lifecycle_updated",
    "item.revision_created",
    "item.archived",
];

const DEFAULT_CAPACITY: usize = 1024;

type StaleKey = (String, String);

/// Tracks `(aggregate_type, aggregate_id)` pairs awaiting a reload.
///
/// Holds at most `capacity` marks; the oldest mark is dropped first, so
/// items that are never read again do not accumulate.
#[derive(Debug)]
pub struct RefreshTracker {
    stale: Mutex<VecDeque<StaleKey>>,
    capacity: usize,
}

impl RefreshTracker {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stale: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    pub fn is_stale(&self, aggregate_type: &str, aggregate_id: &str) -> bool {
        self.stale
            .lock()
            .map(|stale| stale.iter().any(|key| same_key(key, aggregate_type, aggregate_id)))
            .unwrap_or(false)
    }

    /// Clears the stale mark after a reload. Returns whether it was set.
    pub fn acknowledge(&self, aggregate_type: &str, aggregate_id: &str) -> bool {
        self.stale
            .lock()
            .map(|mut stale| {
                let before = stale.len();
                stale.retain(|key| !same_key(key, aggregate_type, aggregate_id));
                stale.len() != before
            })
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.stale.lock().map(|stale| stale.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mark(&self, key: StaleKey) -> Result<(), DomainError> {
        let mut stale = self
            .stale
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "refresh tracker lock poisoned"))?;
        if self.capacity == 0 || stale.contains(&key) {
            return Ok(());
        }
        while stale.len() >= self.capacity {
            stale.pop_front();
        }
        stale.push_back(key);
        Ok(())
    }
}

impl Default for RefreshTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn same_key(key: &StaleKey, aggregate_type: &str, aggregate_id: &str) -> bool {
    key.0 == aggregate_type && key.1 == aggregate_id
}

#[async_trait]
impl crate::ports::EventHandler for RefreshTracker {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            "Item marked for refresh"
        );
        self.mark((event.aggregate_type, event.aggregate_id))
    }

    fn name(&self) -> &'static str {
        "RefreshTracker"
    }
}
