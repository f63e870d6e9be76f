//! Per-item in-flight tracking for lifecycle submissions.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::ItemId;
use crate::domain::item::ItemType;

type ItemKey = (ItemType, ItemId);

/// Set of items with a submission currently in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlightSubmissions {
    items: Arc<Mutex<HashSet<ItemKey>>>,
}

impl InFlightSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the item, or returns `None` when a submission is already running.
    ///
    /// The claim is released when the guard drops, including when the
    /// submitting future is cancelled.
    pub fn try_acquire(&self, item_type: ItemType, item_id: ItemId) -> Option<SubmissionGuard> {
        let key = (item_type, item_id);
        if !lock(&self.items).insert(key) {
            return None;
        }
        Some(SubmissionGuard {
            items: Arc::clone(&self.items),
            key,
        })
    }

    pub fn is_in_flight(&self, item_type: ItemType, item_id: ItemId) -> bool {
        lock(&self.items).contains(&(item_type, item_id))
    }
}

/// Releases the item's claim on drop.
#[derive(Debug)]
pub struct SubmissionGuard {
    items: Arc<Mutex<HashSet<ItemKey>>>,
    key: ItemKey,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        lock(&self.items).remove(&self.key);
    }
}

// A poisoned set is still consistent; every critical section is a single insert or remove.
fn lock(items: &Mutex<HashSet<ItemKey>>) -> MutexGuard<'_, HashSet<ItemKey>> {
    items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
