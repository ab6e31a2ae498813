use chrono::{DateTime, TimeZone, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::food_analysis::entities::NutritionRecord;

use super::{
    entities::{FoodEntry, FoodEntryConfig, MacroTotals, MacroType},
    errors::StoreError,
    ports::FoodEntryRepository,
    value_objects::DayWindow,
};

/// The food journal: persisted entries and their per-day aggregates.
pub struct NutritionStore<R: FoodEntryRepository> {
    repository: R,
}

impl<R: FoodEntryRepository> NutritionStore<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, record, image_data), fields(title = %record.title))]
    pub async fn create(
        &self,
        record: NutritionRecord,
        image_data: Option<Vec<u8>>,
        date_added: Option<DateTime<Utc>>,
    ) -> Result<FoodEntry, StoreError> {
        let entry = FoodEntry::new(FoodEntryConfig {
            record,
            image_data,
            date_added,
        });

        let entry = self.repository.insert(entry).await?;
        info!(id = %entry.id, "food entry created");

        Ok(entry)
    }

    #[instrument(skip(self, record, image_data))]
    pub async fn update(
        &self,
        id: Uuid,
        record: NutritionRecord,
        image_data: Option<Vec<u8>>,
        date_added: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let mut entry = self.get(id).await?;
        entry.update(record, image_data, date_added);

        self.repository.update(entry).await
    }

    #[instrument(skip(self))]
    pub async fn update_macro(
        &self,
        id: Uuid,
        macro_type: MacroType,
        value: u32,
    ) -> Result<(), StoreError> {
        let mut entry = self.get(id).await?;
        entry.set_macro(macro_type, value);

        self.repository.update(entry).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.repository.delete(id).await?;
        info!(%id, "food entry deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<FoodEntry, StoreError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn list_all(&self) -> Result<Vec<FoodEntry>, StoreError> {
        self.repository.list_all().await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.repository.count().await
    }

    /// Entries of the local calendar day containing `date`, most recent first.
    pub async fn list_by_day(&self, date: DateTime<Utc>) -> Result<Vec<FoodEntry>, StoreError> {
        self.list_in_window(DayWindow::local(date)).await
    }

    pub async fn list_by_day_in<Tz: TimeZone>(
        &self,
        date: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<Vec<FoodEntry>, StoreError> {
        self.list_in_window(DayWindow::in_zone(date, tz)).await
    }

    pub async fn aggregate_macros(&self, date: DateTime<Utc>) -> Result<MacroTotals, StoreError> {
        let entries = self.list_by_day(date).await?;
        Ok(MacroTotals::from_entries(&entries))
    }

    pub async fn aggregate_macros_in<Tz: TimeZone>(
        &self,
        date: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<MacroTotals, StoreError> {
        let entries = self.list_by_day_in(date, tz).await?;
        Ok(MacroTotals::from_entries(&entries))
    }

    async fn list_in_window(&self, window: DayWindow) -> Result<Vec<FoodEntry>, StoreError> {
        self.repository.list_between(window.start, window.end).await
    }
}
