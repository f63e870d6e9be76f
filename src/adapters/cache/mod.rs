//! Cache store adapters.
//!
//! - `InMemoryCacheStore` - process-local map
//! - `FileCacheStore` - one JSON file per key
//! - `RedisCacheStore` - shared store with key prefix and TTL

mod file;
mod in_memory;
mod redis;

pub use file::FileCacheStore;
pub use in_memory::InMemoryCacheStore;
pub use self::redis::RedisCacheStore;
