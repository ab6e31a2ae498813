use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{generate_timestamp, truncate_to_millis},
    food_analysis::entities::NutritionRecord,
};

/// A nutrition record as kept in the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: NutritionRecord,
    pub image_data: Option<Vec<u8>>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FoodEntryConfig {
    pub record: NutritionRecord,
    pub image_data: Option<Vec<u8>>,
    pub date_added: Option<DateTime<Utc>>,
}

impl FoodEntry {
    pub fn new(config: FoodEntryConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            record: config.record,
            image_data: config.image_data,
            date_added: truncate_to_millis(config.date_added.unwrap_or(now)),
        }
    }

    /// Replaces the record; image and date are only touched when given.
    pub fn update(
        &mut self,
        record: NutritionRecord,
        image_data: Option<Vec<u8>>,
        date_added: Option<DateTime<Utc>>,
    ) {
        self.record = record;

        if let Some(image) = image_data {
            self.image_data = Some(image);
        }
        if let Some(date) = date_added {
            self.date_added = truncate_to_millis(date);
        }
    }

    pub fn set_macro(&mut self, macro_type: MacroType, value: u32) {
        match macro_type {
            MacroType::Calories => self.record.total_calories = value,
            MacroType::Protein => self.record.protein_grams = value,
            MacroType::Carbs => self.record.carbs_grams = value,
            MacroType::Fats => self.record.fats_grams = value,
        }
    }

    pub fn macro_value(&self, macro_type: MacroType) -> u32 {
        match macro_type {
            MacroType::Calories => self.record.total_calories,
            MacroType::Protein => self.record.protein_grams,
            MacroType::Carbs => self.record.carbs_grams,
            MacroType::Fats => self.record.fats_grams,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroType {
    Calories,
    Protein,
    Carbs,
    Fats,
}

impl MacroType {
    pub const ALL: [MacroType; 4] = [
        MacroType::Calories,
        MacroType::Protein,
        MacroType::Carbs,
        MacroType::Fats,
    ];
}

/// Summed macros of one day. Widened to `u64` so sums never overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: u64,
    pub protein: u64,
    pub carbs: u64,
    pub fats: u64,
}

impl MacroTotals {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a FoodEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut totals, entry| {
            totals.add(&entry.record);
            totals
        })
    }

    pub fn add(&mut self, record: &NutritionRecord) {
        self.calories += u64::from(record.total_calories);
        self.protein += u64::from(record.protein_grams);
        self.carbs += u64::from(record.carbs_grams);
        self.fats += u64::from(record.fats_grams);
    }

    pub fn get(&self, macro_type: MacroType) -> u64 {
        match macro_type {
            MacroType::Calories => self.calories,
            MacroType::Protein => self.protein,
            MacroType::Carbs => self.carbs,
            MacroType::Fats => self.fats,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
