//! File-based cache store.
//!
//! One JSON file per key under a base directory. Survives restarts, which
//! keeps reference lists available while the backend is slow to answer.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;

use crate::ports::{CacheError, CacheStore};

const EXTENSION: &str = "json";

/// File-based cache store.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    base_path: PathBuf,
    ttl: Option<Duration>,
}

impl FileCacheStore {
    /// Create a store rooted at `base_path`; the directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Maps a key to a file name using only `[A-Za-z0-9_-]`.
    fn file_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.{}", name, EXTENSION))
    }

    async fn is_expired(&self, path: &Path) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        match fs::metadata(path).await.and_then(|m| m.modified()) {
            Ok(modified) => SystemTime::now()
                .duration_since(modified)
                .map_or(false, |age| age >= ttl),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.file_path(key);
        if self.is_expired(&path).await {
            self.remove(key).await?;
            return Ok(None);
        }
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?;

        // Write then rename so readers never see a half-written file
        let path = self.file_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Io(e.to_string())),
        }
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CacheError::Io(e.to_string())),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == EXTENSION) {
                fs::remove_file(&path)
                    .await
                    .map_err(|e| CacheError::Io(e.to_string()))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let store = FileCacheStore::new(dir.path().join("cache"));

        store.set("reference:customers", "[1,2]".into()).await.unwrap();

        assert_eq!(
            store.get("reference:customers").await.unwrap(),
            Some("[1,2]".to_string())
        );
        assert!(dir.path().join("cache/reference_customers.json").exists());
    }

    #[tokio::test]
    async fn missing_key_and_directory_are_misses() {
        let dir = TempDir::new().unwrap();
        let store = FileCacheStore::new(dir.path().join("never-created"));

        assert_eq!(store.get("anything").await.unwrap(), None);
        store.remove("anything").await.unwrap();
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn clear_only_removes_cache_files() {
        let dir = TempDir::new().unwrap();
        let store = FileCacheStore::new(dir.path());
        store.set("a", "1".into()).await.unwrap();
        store.set("b", "2".into()).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        store.clear().await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap(), None);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn expired_file_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let store = FileCacheStore::new(dir.path()).with_ttl(Duration::ZERO);
        store.set("a", "1".into()).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert!(!dir.path().join("a.json").exists());
    }
}
