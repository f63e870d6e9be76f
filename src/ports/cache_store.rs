//! CacheStore port - key/value storage behind the read-through cache.

use async_trait::async_trait;

/// Errors from cache storage.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize cached value: {0}")]
    Serialization(String),
}

/// Port for string-valued cache storage.
///
/// Values are opaque JSON text; decoding is the caller's concern.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;

    /// Removes one key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Removes every key owned by this store.
    async fn clear(&self) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn CacheStore) {}

    #[test]
    fn error_messages_name_the_cause() {
        assert!(CacheError::Io("disk full".into()).to_string().contains("disk full"));
        assert!(CacheError::Unavailable("refused".into())
            .to_string()
            .starts_with("Cache backend unavailable"));
    }
}
