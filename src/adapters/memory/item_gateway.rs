//! In-memory item backend.
//!
//! Stands in for the REST backend in tests and when the service runs with
//! `backend.mode = "memory"`. Revision numbering here is a simulation; the
//! real backend owns that algorithm.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::ItemId;
use crate::domain::item::{ItemType, Revision, RevisionType, VersionedItem};
use crate::domain::lifecycle::ReleaseState;
use crate::domain::revision::RevisionPayload;
use crate::ports::{GatewayError, ItemGateway, ItemUpdate};

type ItemKey = (ItemType, ItemId);

/// Item store keyed by type and id.
pub struct InMemoryItemGateway {
    items: Mutex<HashMap<ItemKey, VersionedItem>>,
    next_id: AtomicI64,
    fail_next: Mutex<Option<GatewayError>>,
}

impl InMemoryItemGateway {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            fail_next: Mutex::new(None),
        }
    }

    pub fn with_items(items: impl IntoIterator<Item = VersionedItem>) -> Self {
        let gateway = Self::new();
        for item in items {
            gateway.insert(item);
        }
        gateway
    }

    /// Stores an item; ids handed out by `create_revision` start above it.
    pub fn insert(&self, item: VersionedItem) {
        self.next_id
            .fetch_max(item.id.as_i64() + 1, Ordering::SeqCst);
        lock(&self.items).insert((item.item_type, item.id), item);
    }

    pub fn get(&self, item_type: ItemType, id: ItemId) -> Option<VersionedItem> {
        lock(&self.items).get(&(item_type, id)).cloned()
    }

    /// Makes the next gateway call fail with `error`.
    pub fn fail_next(&self, error: GatewayError) {
        *lock(&self.fail_next) = Some(error);
    }

    fn check_failure(&self) -> Result<(), GatewayError> {
        match lock(&self.fail_next).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryItemGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemGateway for InMemoryItemGateway {
    async fn load_item(&self, item_type: ItemType, id: ItemId) -> Result<VersionedItem, GatewayError> {
        self.check_failure()?;
        self.get(item_type, id)
            .ok_or_else(|| GatewayError::NotFound(item_type.detail_path(id)))
    }

    async fn update_item(
        &self,
        item_type: ItemType,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<(), GatewayError> {
        self.check_failure()?;
        let mut items = lock(&self.items);
        let item = items
            .get_mut(&(item_type, id))
            .ok_or_else(|| GatewayError::NotFound(item_type.detail_path(id)))?;
        if item.is_archived {
            return Err(GatewayError::Conflict(format!("{} is archived", item.full_number)));
        }

        if let Some(state) = update.release_state {
            item.release_state = state;
        }
        if let Some(approved) = update.is_approved_for_release {
            item.is_approved_for_release = approved;
        }
        if let Some(name) = update.display_name {
            item.display_name = name;
        }
        Ok(())
    }

    async fn create_revision(
        &self,
        item_type: ItemType,
        id: ItemId,
        payload: RevisionPayload,
    ) -> Result<VersionedItem, GatewayError> {
        self.check_failure()?;
        let mut items = lock(&self.items);
        let source = items
            .get_mut(&(item_type, id))
            .ok_or_else(|| GatewayError::NotFound(item_type.detail_path(id)))?;
        if !source.is_latest_revision {
            return Err(GatewayError::Conflict(format!(
                "{} already has a newer revision",
                source.full_number
            )));
        }

        let revision = next_revision(&source.revision, payload.revision_type);
        let full_number = match source.full_number.strip_suffix(source.revision.as_str()) {
            Some(base) => format!("{}{}", base, revision),
            None => format!("{}{}", source.full_number, revision),
        };
        source.is_latest_revision = false;

        let created = VersionedItem {
            id: ItemId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            item_type,
            full_number,
            display_name: source.display_name.clone(),
            release_state: ReleaseState::Draft,
            is_approved_for_release: false,
            is_latest_revision: true,
            revision,
            quality_assurance: None,
            project_id: source.project_id,
            is_archived: false,
        };
        items.insert((item_type, created.id), created.clone());
        Ok(created)
    }

    async fn archive_item(&self, item_type: ItemType, id: ItemId) -> Result<(), GatewayError> {
        self.check_failure()?;
        let mut items = lock(&self.items);
        let item = items
            .get_mut(&(item_type, id))
            .ok_or_else(|| GatewayError::NotFound(item_type.detail_path(id)))?;
        item.is_archived = true;
        Ok(())
    }
}

fn next_revision(current: &Revision, revision_type: Option<RevisionType>) -> Revision {
    if let Some((major, minor)) = current.numeric_parts() {
        return match revision_type {
            Some(RevisionType::Minor) => Revision::new(format!("{}_{}", major, minor + 1)),
            _ => Revision::new(format!("{}_0", major + 1)),
        };
    }
    Revision::new(next_letter(current.as_str()))
}

/// `A` → `B`, `Z` → `AA`, `AZ` → `BA`.
fn next_letter(current: &str) -> String {
    let mut letters: Vec<u8> = current.bytes().filter(u8::is_ascii_uppercase).collect();
    for i in (0..letters.len()).rev() {
        if letters[i] < b'Z' {
            letters[i] += 1;
            return String::from_utf8_lossy(&letters).into_owned();
        }
        letters[i] = b'A';
    }
    letters.insert(0, b'A');
    String::from_utf8_lossy(&letters).into_owned()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
