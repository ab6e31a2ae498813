use serde::{Deserialize, Serialize};

/// Validated nutrition data for one analyzed meal.
///
/// `total_calories` is reported by the model and is not required to match the
/// sum of the ingredient calories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRecord {
    pub title: String,
    pub protein_grams: u32,
    pub carbs_grams: u32,
    pub fats_grams: u32,
    pub health_score: u32,
    pub ingredients: Vec<Ingredient>,
    pub dish_count: u32,
    pub total_calories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub calories: f64,
}

impl NutritionRecord {
    /// An empty ingredient list is how the model reports that no food was
    /// found in the picture.
    pub fn is_food_detected(&self) -> bool {
        !self.ingredients.is_empty()
    }

    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}

impl Ingredient {
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        Self {
            name: name.into(),
            calories,
        }
    }
}
