use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::food_entry::{entities::FoodEntry, errors::StoreError, ports::FoodEntryRepository},
    entity::food_entries::{ActiveModel, Column, Entity, Model},
};

#[derive(Debug, Clone)]
pub struct SqliteFoodEntryRepository {
    pub db: DatabaseConnection,
}

impl SqliteFoodEntryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_entries(models: Vec<Model>) -> Result<Vec<FoodEntry>, StoreError> {
    models.iter().map(FoodEntry::try_from).collect()
}

impl FoodEntryRepository for SqliteFoodEntryRepository {
    async fn insert(&self, entry: FoodEntry) -> Result<FoodEntry, StoreError> {
        let active_model = ActiveModel::try_from(&entry)?;

        Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create food entry: {}", e);
                StoreError::WriteFailed(e.to_string())
            })?;

        Ok(entry)
    }

    async fn update(&self, entry: FoodEntry) -> Result<(), StoreError> {
        let active_model = ActiveModel::try_from(&entry)?;

        let result = Entity::update_many()
            .set(active_model)
            .filter(Column::Id.eq(entry.id.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update food entry: {}", e);
                StoreError::WriteFailed(e.to_string())
            })?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(entry.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete food entry: {}", e);
                StoreError::WriteFailed(e.to_string())
            })?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FoodEntry>, StoreError> {
        let model = Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get food entry: {}", e);
                StoreError::ReadFailed(e.to_string())
            })?;

        model.as_ref().map(FoodEntry::try_from).transpose()
    }

    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FoodEntry>, StoreError> {
        let models = Entity::find()
            .filter(Column::DateAdded.gte(start.timestamp_millis()))
            .filter(Column::DateAdded.lt(end.timestamp_millis()))
            .order_by_desc(Column::DateAdded)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list food entries by day: {}", e);
                StoreError::ReadFailed(e.to_string())
            })?;

        to_entries(models)
    }

    async fn list_all(&self) -> Result<Vec<FoodEntry>, StoreError> {
        let models = Entity::find()
            .order_by_desc(Column::DateAdded)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list food entries: {}", e);
                StoreError::ReadFailed(e.to_string())
            })?;

        to_entries(models)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Entity::find().count(&self.db).await.map_err(|e| {
            error!("Failed to count food entries: {}", e);
            StoreError::ReadFailed(e.to_string())
        })
    }
}
