use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "food_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub protein_grams: i64,
    pub carbs_grams: i64,
    pub fats_grams: i64,
    pub health_score: i64,
    pub dish_count: i64,
    pub total_calories: i64,
    /// JSON array of `{name, calories}` records.
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    #[sea_orm(column_type = "Blob", nullable)]
    pub image_data: Option<Vec<u8>>,
    /// Unix milliseconds.
    #[sea_orm(indexed)]
    pub date_added: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
