//! ReferenceDataService - cached access to reference lists.

use futures::future::join_all;
use std::sync::Arc;

use crate::ports::{CacheError, GatewayError, ReferenceDataSource, ReferenceEntry, ReferenceKind};

use super::ReadThroughCache;

/// Reference lists served through the read-through cache.
pub struct ReferenceDataService {
    source: Arc<dyn ReferenceDataSource>,
    cache: ReadThroughCache,
}

impl ReferenceDataService {
    pub fn new(source: Arc<dyn ReferenceDataSource>, cache: ReadThroughCache) -> Self {
        Self { source, cache }
    }

    fn cache_key(kind: ReferenceKind) -> String {
        format!("reference:{}", kind.as_str())
    }

    pub async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>, GatewayError> {
        let key = Self::cache_key(kind);
        self.cache
            .get_or_fetch(&key, || self.source.fetch(kind))
            .await
    }

    /// Prefetches several lists concurrently.
    ///
    /// Returns the kinds that failed to load; those are simply fetched
    /// again on their next `list`.
    pub async fn warm(&self, kinds: &[ReferenceKind]) -> Vec<(ReferenceKind, GatewayError)> {
        let results = join_all(kinds.iter().map(|&kind| async move { (kind, self.list(kind).await) })).await;

        let failures: Vec<_> = results
            .into_iter()
            .filter_map(|(kind, result)| result.err().map(|e| (kind, e)))
            .collect();
        for (kind, error) in &failures {
            tracing::warn!(kind = %kind, error = %error, "Failed to warm reference list");
        }
        tracing::info!(
            requested = kinds.len(),
            failed = failures.len(),
            "Reference cache warmed"
        );
        failures
    }

    pub async fn invalidate(&self, kind: ReferenceKind) -> Result<(), CacheError> {
        self.cache.invalidate(&Self::cache_key(kind)).await
    }
}
