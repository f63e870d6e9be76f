//! Read-through cache over an injected `CacheStore`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

use crate::ports::{CacheError, CacheStore};

/// Serves JSON-encoded values from a store, fetching and storing on a miss.
#[derive(Clone)]
pub struct ReadThroughCache {
    store: Arc<dyn CacheStore>,
}

impl ReadThroughCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches its result.
    ///
    /// A cached entry that no longer decodes is removed and re-fetched.
    /// Store failures degrade to a direct fetch; fetch errors are returned
    /// unchanged and nothing is cached.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    tracing::debug!(key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "Discarding corrupt cache entry");
                    if let Err(e) = self.store.remove(key).await {
                        tracing::warn!(key, error = %e, "Failed to remove corrupt cache entry");
                    }
                }
            },
            Ok(None) => tracing::debug!(key, "Cache miss"),
            Err(e) => tracing::warn!(key, error = %e, "Cache read failed, fetching directly"),
        }

        let value = fetch().await?;
        if let Err(e) = self.store_value(key, &value).await {
            tracing::warn!(key, error = %e, "Cache write failed");
        }
        Ok(value)
    }

    async fn store_value<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.store.set(key, raw).await
    }

    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key).await
    }

    pub async fn invalidate_all(&self) -> Result<(), CacheError> {
        self.store.clear().await
    }
}
