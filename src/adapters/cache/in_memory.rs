//! Process-local cache store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::ports::{CacheError, CacheStore};

/// Cache store backed by a map, with optional expiry.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, (String, Instant)>>,
    ttl: Option<Duration>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::default(),
            ttl: Some(ttl),
        }
    }

    pub fn len(&self) -> usize {
        read(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, stored_at: Instant) -> bool {
        self.ttl.map_or(false, |ttl| stored_at.elapsed() >= ttl)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let hit = read(&self.entries)
            .get(key)
            .map(|(value, stored_at)| (value.clone(), *stored_at));
        match hit {
            Some((_, stored_at)) if self.is_expired(stored_at) => {
                write(&self.entries).remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        write(&self.entries).insert(key.to_string(), (value, Instant::now()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        write(&self.entries).remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        write(&self.entries).clear();
        Ok(())
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
