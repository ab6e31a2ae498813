use chrono::DateTime;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::{
    domain::{
        food_analysis::entities::{Ingredient, NutritionRecord},
        food_entry::{entities::FoodEntry, errors::StoreError},
    },
    entity::food_entries::{ActiveModel, Model},
};

impl TryFrom<&Model> for FoodEntry {
    type Error = StoreError;

    fn try_from(model: &Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| corrupt(&model.id, format!("invalid id: {e}")))?;

        let ingredients: Vec<Ingredient> = serde_json::from_str(&model.ingredients)
            .map_err(|e| corrupt(&model.id, format!("invalid ingredients: {e}")))?;

        let date_added = DateTime::from_timestamp_millis(model.date_added)
            .ok_or_else(|| corrupt(&model.id, format!("invalid date_added {}", model.date_added)))?;

        Ok(Self {
            id,
            record: NutritionRecord {
                title: model.title.clone(),
                protein_grams: column_u32(model, "protein_grams", model.protein_grams)?,
                carbs_grams: column_u32(model, "carbs_grams", model.carbs_grams)?,
                fats_grams: column_u32(model, "fats_grams", model.fats_grams)?,
                health_score: column_u32(model, "health_score", model.health_score)?,
                ingredients,
                dish_count: column_u32(model, "dish_count", model.dish_count)?,
                total_calories: column_u32(model, "total_calories", model.total_calories)?,
            },
            image_data: model.image_data.clone(),
            date_added,
        })
    }
}

impl TryFrom<Model> for FoodEntry {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Self::try_from(&model)
    }
}

impl TryFrom<&FoodEntry> for ActiveModel {
    type Error = StoreError;

    fn try_from(entry: &FoodEntry) -> Result<Self, Self::Error> {
        let ingredients = serde_json::to_string(&entry.record.ingredients)
            .map_err(|e| StoreError::WriteFailed(format!("ingredients: {e}")))?;

        Ok(Self {
            id: Set(entry.id.to_string()),
            title: Set(entry.record.title.clone()),
            protein_grams: Set(i64::from(entry.record.protein_grams)),
            carbs_grams: Set(i64::from(entry.record.carbs_grams)),
            fats_grams: Set(i64::from(entry.record.fats_grams)),
            health_score: Set(i64::from(entry.record.health_score)),
            dish_count: Set(i64::from(entry.record.dish_count)),
            total_calories: Set(i64::from(entry.record.total_calories)),
            ingredients: Set(ingredients),
            image_data: Set(entry.image_data.clone()),
            date_added: Set(entry.date_added.timestamp_millis()),
        })
    }
}

fn column_u32(model: &Model, column: &str, value: i64) -> Result<u32, StoreError> {
    u32::try_from(value).map_err(|_| corrupt(&model.id, format!("{column} out of range: {value}")))
}

fn corrupt(id: &str, reason: String) -> StoreError {
    StoreError::ReadFailed(format!("food entry {id}: {reason}"))
}
