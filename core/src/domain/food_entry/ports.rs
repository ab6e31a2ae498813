use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{entities::FoodEntry, errors::StoreError};

/// Repository for persisted food entries
#[cfg_attr(test, mockall::automock)]
pub trait FoodEntryRepository: Send + Sync {
    /// Insert a new entry in a single statement
    fn insert(&self, entry: FoodEntry) -> impl Future<Output = Result<FoodEntry, StoreError>> + Send;

    /// Overwrite every column of an existing entry
    fn update(&self, entry: FoodEntry) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn get_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<FoodEntry>, StoreError>> + Send;

    /// Entries with `start <= date_added < end`, most recent first
    fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<FoodEntry>, StoreError>> + Send;

    /// Every entry, most recent first
    fn list_all(&self) -> impl Future<Output = Result<Vec<FoodEntry>, StoreError>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
