//! Redis-backed cache store for multi-instance deployments.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{CacheError, CacheStore};

/// Cache store in Redis.
///
/// Every key is namespaced with `prefix` so `clear` only touches this
/// store's keys. Entries expire after `ttl_secs` when it is non-zero.
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: MultiplexedConnection,
    prefix: String,
    ttl_secs: u64,
}

impl RedisCacheStore {
    pub fn new(conn: MultiplexedConnection, prefix: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
            ttl_secs,
        }
    }

    fn redis_key(&self, key: &str) -> String {
        namespaced(&self.prefix, key)
    }
}

fn namespaced(prefix: &str, key: &str) -> String {
    format!("{}:{}", prefix, key)
}

fn unavailable(e: redis::RedisError) -> CacheError {
    CacheError::Unavailable(e.to_string())
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        conn.get(self.redis_key(key)).await.map_err(unavailable)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        let redis_key = self.redis_key(key);
        let mut conn = self.conn.clone();

        conn.set::<_, _, ()>(&redis_key, value)
            .await
            .map_err(unavailable)?;
        if self.ttl_secs > 0 {
            conn.expire::<_, ()>(&redis_key, self.ttl_secs as i64)
                .await
                .map_err(unavailable)?;
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.redis_key(key))
            .await
            .map_err(unavailable)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let pattern = namespaced(&self.prefix, "*");
        let keys: Vec<String> = {
            let mut conn = self.conn.clone();
            let mut iter = conn
                .scan_match::<_, String>(&pattern)
                .await
                .map_err(unavailable)?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if keys.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = keys.len(), prefix = %self.prefix, "Clearing cached keys");
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(keys).await.map_err(unavailable)
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("prefix", &self.prefix)
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}
