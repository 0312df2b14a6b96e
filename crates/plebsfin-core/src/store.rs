//! Key-value storage backends
//!
//! The record store only needs atomic get/put of a whole value per key. Values
//! are JSON text; the store never looks inside them.

use async_trait::async_trait;
use plebsfin_config::{StorageBackend, StorageConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};

/// Store reference type
pub type StoreRef = Arc<dyn KvStore>;

/// Opaque key-value store with atomic per-key get and put
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, `None` if it was never written
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Replace the value under `key`
    async fn put(&self, key: &str, value: String) -> CoreResult<()>;
}

/// Open the backend selected in the configuration
pub async fn open_store(config: &StorageConfig) -> CoreResult<StoreRef> {
    match config.backend {
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let store = FileStore::open(&config.path).await?;
            log::info!("Using file storage at {}", config.path.display());
            Ok(Arc::new(store))
        }
    }
}

// ==================== Memory ====================

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> CoreResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

// ==================== File ====================

/// One file per key under a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory
    pub async fn open(root: impl AsRef<Path>) -> CoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await.map_err(|e| CoreError::Storage {
            message: format!("cannot create {}: {}", root.display(), e),
        })?;
        Ok(Self { root })
    }

    /// `user:pin` -> `<root>/user_pin.json`
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{}.json", name))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> CoreResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
