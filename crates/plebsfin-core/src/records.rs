//! Record store: whole-document read-modify-write per category
//!
//! Every list operation reads the full category document, transforms it in
//! memory and writes the full document back. Each category has its own async
//! mutex held across that read+write pair, so writers inside this process
//! cannot interleave on one key. Nothing coordinates separate processes
//! sharing a backend; there the last writer wins on the whole document.

use chrono::{DateTime, Utc};
use plebsfin_utils::Clock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{CoreError, CoreResult};
use crate::models::{Record, RecordPatch, Stamp};
use crate::store::StoreRef;
use crate::types::Category;

pub struct RecordStore {
    kv: StoreRef,
    clock: Arc<dyn Clock>,
    locks: [Mutex<()>; Category::ALL.len()],
}

impl RecordStore {
    pub fn new(kv: StoreRef, clock: Arc<dyn Clock>) -> Self {
        Self {
            kv,
            clock,
            locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    pub(crate) async fn lock(&self, category: Category) -> MutexGuard<'_, ()> {
        self.locks[category.index()].lock().await
    }

    /// Current instant according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ==================== Lists ====================

    /// All records of a category; empty if the document was never written
    pub async fn list<R: Record>(&self) -> CoreResult<Vec<R>> {
        Ok(self.read_value(R::CATEGORY).await?.unwrap_or_default())
    }

    /// Overwrite the whole category document
    pub async fn replace<R: Record>(&self, records: &[R]) -> CoreResult<()> {
        let _guard = self.lock(R::CATEGORY).await;
        self.write_value(R::CATEGORY, records).await
    }

    /// Stamp `draft` with a fresh id (and `createdAt` where the record has
    /// one), append it and return the stored record
    pub async fn append<R: Record>(&self, draft: R::Draft) -> CoreResult<R> {
        let _guard = self.lock(R::CATEGORY).await;
        let mut records: Vec<R> = self.read_value(R::CATEGORY).await?.unwrap_or_default();

        let record = R::from_draft(draft, Stamp::at(self.clock.now()));
        records.push(record.clone());

        self.write_value(R::CATEGORY, &records).await?;
        Ok(record)
    }

    /// Drop every record with `id`. The document is written back even when
    /// nothing matched; returns whether anything was removed.
    pub async fn remove<R: Record>(&self, id: &str) -> CoreResult<bool> {
        let _guard = self.lock(R::CATEGORY).await;
        let mut records: Vec<R> = self.read_value(R::CATEGORY).await?.unwrap_or_default();

        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = records.len() != before;

        self.write_value(R::CATEGORY, &records).await?;
        Ok(removed)
    }

    /// Merge `patch` over the first record with `id`
    pub async fn patch<R, P>(&self, id: &str, patch: P) -> CoreResult<R>
    where
        R: Record,
        P: RecordPatch<R>,
    {
        self.update(id, |record: &mut R| patch.apply_to(record)).await
    }

    /// Apply `change` to the first record with `id` and write it back.
    /// A missing id leaves storage untouched.
    pub async fn update<R, F>(&self, id: &str, change: F) -> CoreResult<R>
    where
        R: Record,
        F: FnOnce(&mut R) + Send,
    {
        let _guard = self.lock(R::CATEGORY).await;
        let mut records: Vec<R> = self.read_value(R::CATEGORY).await?.unwrap_or_default();

        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| CoreError::RecordNotFound {
                category: R::CATEGORY,
                id: id.to_string(),
            })?;
        change(record);
        let updated = record.clone();

        self.write_value(R::CATEGORY, &records).await?;
        Ok(updated)
    }

    // ==================== Singletons ====================

    /// Singleton document, or `default` if it was never written
    pub async fn get_singleton<T>(&self, category: Category, default: T) -> CoreResult<T>
    where
        T: DeserializeOwned,
    {
        Ok(self.read_value(category).await?.unwrap_or(default))
    }

    pub async fn put_singleton<T>(&self, category: Category, value: &T) -> CoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let _guard = self.lock(category).await;
        self.write_value(category, value).await
    }

    // ==================== Raw access (caller holds the lock) ====================

    pub(crate) async fn read_value<T: DeserializeOwned>(&self, category: Category) -> CoreResult<Option<T>> {
        let Some(raw) = self.kv.get(category.key()).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CoreError::Serialization {
                key: category.key().to_string(),
                message: e.to_string(),
            })
    }

    pub(crate) async fn write_value<T: Serialize + ?Sized>(&self, category: Category, value: &T) -> CoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| CoreError::Serialization {
            key: category.key().to_string(),
            message: e.to_string(),
        })?;
        self.kv.put(category.key(), raw).await
    }
}
